use anyhow::{Context as _, Result};
use tracing::info;

use auth_cell::{AuthService, SignUpForm};

use super::Context;
use crate::render;

pub async fn signup(ctx: &Context, form: SignUpForm) -> Result<()> {
    // Checked here too so every field problem is listed at once.
    if let Err(errors) = form.validate() {
        anyhow::bail!("{}", errors);
    }

    let auth = AuthService::new(&ctx.config)?;
    auth.register(&form).await.context("Registration failed")?;

    info!("Registered {}", form.username);
    println!("Account created for {}. You can now log in.", form.username);
    Ok(())
}

pub async fn login(ctx: &Context, username: &str, password: &str) -> Result<()> {
    let auth = AuthService::new(&ctx.config)?;
    auth.login(username, password).await.context("Login failed")?;

    println!("Logged in as {}.", username);
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.sessions.clear()?;
    println!("Logged out.");
    Ok(())
}

pub async fn me(ctx: &Context) -> Result<()> {
    let auth = AuthService::new(&ctx.config)?;
    let user = auth.current_user().await?;
    render::print_user(&user);
    Ok(())
}
