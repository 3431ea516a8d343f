//! Password hashing.
//!
//! Hashing sits behind the [`PasswordHasher`] trait so the cost can be tuned
//! per deployment and swapped in tests. [`Argon2Hasher`] is the production
//! implementation: Argon2id with a fresh random salt on every call.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARGON2_ITERATIONS, DEFAULT_ARGON2_MEMORY_KIB, DEFAULT_ARGON2_PARALLELISM,
};
use crate::error::{ConfigError, DomainError, DomainResult};

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }
}

/// One-way, salted password hashing.
pub trait PasswordHasher: Send + Sync + std::fmt::Debug {
    /// Hash a plaintext secret. Output is a self-describing PHC string.
    fn hash(&self, plain_text: &str) -> DomainResult<String>;

    /// Check a plaintext secret against a stored hash.
    fn verify(&self, plain_text: &str, hash: &str) -> bool;
}

/// Argon2id hasher with configurable cost.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher, rejecting parameters Argon2 cannot run with.
    pub fn new(config: HashConfig) -> Result<Self, ConfigError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| ConfigError::HashParams(e.to_string()))?;

        Ok(Self { params })
    }

    #[inline]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        // Cost parameters are read back from the PHC string.
        self.argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hashed password value object.
///
/// Only ever holds the hash; there is no way to get the plaintext back.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext secret with the given hasher.
    ///
    /// Strength rules are not checked here; see [`crate::UserValidator`].
    pub fn hash_with(plain_text: &str, hasher: &dyn PasswordHasher) -> DomainResult<Self> {
        let hash = hasher.hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Wrap an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext secret against this hash.
    pub fn verify(&self, plain_text: &str, hasher: &dyn PasswordHasher) -> bool {
        hasher.verify(plain_text, &self.hash)
    }
}
