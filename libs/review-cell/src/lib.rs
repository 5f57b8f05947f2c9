pub mod models;
pub mod services;

pub use models::*;
pub use services::ReviewService;
