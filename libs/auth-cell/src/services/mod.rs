pub mod auth;

pub use auth::{fetch_current_user, AuthService};
