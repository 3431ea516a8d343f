//! Use-case layer.

mod user_service;

pub use user_service::{UserManager, UserService};
