pub mod client;

pub use client::{ApiClient, Query};
pub use reqwest::Method;
