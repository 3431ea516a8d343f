//! Domain-level constants.
//!
//! These constants define the default business rules. Callers that need
//! different limits pass them explicitly through [`crate::UserRules`] and
//! [`crate::HashConfig`].

// =============================================================================
// Validation
// =============================================================================

/// Minimum username length, in characters
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length, in characters
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Conventional `local@domain.tld` address shape
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

// =============================================================================
// Password hashing (Argon2id)
// =============================================================================

/// Default Argon2 memory cost in KiB
pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19_456;

/// Default Argon2 iteration count
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;

/// Default Argon2 degree of parallelism
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;
