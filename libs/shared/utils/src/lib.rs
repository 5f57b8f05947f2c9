pub mod jwt;
pub mod session;
pub mod test_utils;

pub use session::{Session, SessionStore};
