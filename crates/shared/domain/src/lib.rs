//! Domain layer - the `User` entity and the rules that guard it.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! input validation, password hashing and the factory that composes them.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{ConfigError, DomainError, DomainResult, ValidationKind};
pub use password::{Argon2Hasher, HashConfig, Password, PasswordHasher};
pub use user::{User, UserChanges, UserFactory, UserResponse};
pub use validation::{UserRules, UserValidator};
