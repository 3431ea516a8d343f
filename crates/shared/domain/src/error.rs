//! Domain-level errors.
//!
//! These errors represent business rule violations and failures of the
//! hashing primitive. They are independent of infrastructure concerns
//! (HTTP, database).

use thiserror::Error;

/// Which rule a validation failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Username is outside the allowed character range
    UsernameLength,
    /// Email does not have a `local@domain.tld` shape
    EmailFormat,
    /// Password is shorter than the minimum
    PasswordLength,
    /// Password lacks a letter or a digit
    PasswordStrength,
}

impl ValidationKind {
    /// Name of the input field the rule applies to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationKind::UsernameLength => "username",
            ValidationKind::EmailFormat => "email",
            ValidationKind::PasswordLength | ValidationKind::PasswordStrength => "password",
        }
    }
}

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied data broke a rule
    #[error("{message}")]
    Validation {
        kind: ValidationKind,
        message: String,
    },

    /// The password hashing primitive failed
    #[error("Password hashing failed: {cause}")]
    Hashing { cause: String },
}

impl DomainError {
    /// Create a validation error
    pub fn validation(kind: ValidationKind, msg: impl Into<String>) -> Self {
        DomainError::Validation {
            kind,
            message: msg.into(),
        }
    }

    /// Create a hashing error
    pub fn hashing(cause: impl Into<String>) -> Self {
        DomainError::Hashing {
            cause: cause.into(),
        }
    }

    /// Validation kind, if this is a validation error
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation { kind, .. } => Some(*kind),
            DomainError::Hashing { .. } => None,
        }
    }
}

/// Errors raised while building validators or hashers from configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid email pattern: {0}")]
    EmailPattern(#[from] regex::Error),

    #[error("Invalid username bounds: min {min} > max {max}")]
    UsernameBounds { min: usize, max: usize },

    #[error("Invalid password hash parameters: {0}")]
    HashParams(String),
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
