use std::path::Path;

use anyhow::Result;

use profile_cell::{ProfileService, ProfileUpdate};

use super::Context;
use crate::render;

pub async fn show(ctx: &Context) -> Result<()> {
    let token = ctx.token()?;
    let view = ProfileService::new(&ctx.config)?.load(&token).await?;
    render::print_profile(&view);
    Ok(())
}

/// Applies the given changes on top of the stored profile.
pub async fn edit(ctx: &Context, changes: ProfileUpdate) -> Result<()> {
    let token = ctx.token()?;
    let service = ProfileService::new(&ctx.config)?;

    let view = service.load(&token).await?;
    let update = merge(ProfileUpdate::from_view(&view), changes);
    service.update(&update, &token).await?;

    println!("Profile updated.");
    Ok(())
}

pub async fn photo(ctx: &Context, path: &Path) -> Result<()> {
    let token = ctx.token()?;
    ProfileService::new(&ctx.config)?
        .upload_photo(path, &token)
        .await?;
    println!("Photo uploaded.");
    Ok(())
}

fn merge(current: ProfileUpdate, changes: ProfileUpdate) -> ProfileUpdate {
    ProfileUpdate {
        username: changes.username.or(current.username),
        first_name: changes.first_name.or(current.first_name),
        last_name: changes.last_name.or(current.last_name),
        email: changes.email.or(current.email),
        photo: changes.photo.or(current.photo),
        experience_start_date: changes.experience_start_date.or(current.experience_start_date),
        state: changes.state.or(current.state),
        city: changes.city.or(current.city),
        street: changes.street.or(current.street),
        spoken_languages: changes.spoken_languages.or(current.spoken_languages),
        zoom_link: changes.zoom_link.or(current.zoom_link),
        visit_price: changes.visit_price.or(current.visit_price),
        phone_number: changes.phone_number.or(current.phone_number),
        specialization_id: changes.specialization_id.or(current.specialization_id),
        assurances: changes.assurances.or(current.assurances),
        latitude: changes.latitude.or(current.latitude),
        longitude: changes.longitude.or(current.longitude),
    }
}
