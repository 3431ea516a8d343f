//! User domain entity, factory and related types.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ConfigError, DomainResult};
use crate::password::{Argon2Hasher, HashConfig, Password, PasswordHasher};
use crate::validation::{UserRules, UserValidator};

/// User domain entity.
///
/// Fields are private: a `User` is either produced by [`UserFactory`] or
/// rehydrated from storage, so it always satisfies the validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: Uuid,
    username: String,
    email: String,
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Rebuild a user from a stored row.
    ///
    /// Trusts its input; only storage adapters should call this.
    pub fn from_persisted(
        id: Uuid,
        username: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
            updated_at,
        }
    }

    /// Set the identifier assigned by storage.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Whether storage has assigned an identifier yet
    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Stored hash as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Field changes for an existing user. `None` leaves a field untouched.
#[derive(Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Plaintext; hashed by [`UserFactory::update_fields`]
    pub password: Option<String>,
}

// Never print a plaintext password
impl std::fmt::Debug for UserChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserChanges")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Builds and modifies users, enforcing validation and password hashing.
#[derive(Debug, Clone)]
pub struct UserFactory {
    validator: UserValidator,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserFactory {
    /// Create a factory from a validator and a hasher.
    pub fn new(validator: UserValidator, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { validator, hasher }
    }

    /// Create a factory backed by Argon2 from explicit configuration.
    pub fn from_config(rules: UserRules, hashing: HashConfig) -> Result<Self, ConfigError> {
        let validator = UserValidator::new(rules)?;
        let hasher = Arc::new(Argon2Hasher::new(hashing)?);
        Ok(Self::new(validator, hasher))
    }

    /// Hasher used for new and changed passwords
    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.hasher.as_ref()
    }

    /// Build a new user.
    ///
    /// Validates username, then email, then password, stopping at the first
    /// failure. The password is hashed only after every check has passed.
    /// The identifier is left nil for storage to assign.
    pub fn new_user(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        self.validator.validate_username(username)?;
        self.validator.validate_email(email)?;
        self.validator.validate_password(password)?;

        let password = Password::hash_with(password, self.hasher())?;
        let now = Utc::now();

        Ok(User {
            id: Uuid::nil(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password.into_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply field changes to an existing user.
    ///
    /// Every supplied field goes through the same checks as [`Self::new_user`]
    /// and a new password is re-hashed. Nothing is applied unless all checks
    /// pass. `id` and `created_at` are kept.
    pub fn update_fields(&self, existing: User, changes: UserChanges) -> DomainResult<User> {
        if let Some(username) = &changes.username {
            self.validator.validate_username(username)?;
        }
        if let Some(email) = &changes.email {
            self.validator.validate_email(email)?;
        }
        if let Some(password) = &changes.password {
            self.validator.validate_password(password)?;
        }

        let password_hash = match &changes.password {
            Some(password) => Password::hash_with(password, self.hasher())?.into_string(),
            None => existing.password_hash,
        };

        Ok(User {
            id: existing.id,
            username: changes.username.unwrap_or(existing.username),
            email: changes.email.unwrap_or(existing.email),
            password_hash,
            created_at: existing.created_at,
            updated_at: Utc::now().max(existing.created_at),
        })
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Display name
    pub username: String,
    /// User email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainError, ValidationKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hasher that counts calls and can be told to fail.
    #[derive(Debug, Default)]
    struct CountingHasher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingHasher {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, plain_text: &str) -> DomainResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::hashing("primitive unavailable"));
            }
            Ok(format!("hashed:{}:{}", n, plain_text.len()))
        }

        fn verify(&self, _plain_text: &str, _hash: &str) -> bool {
            false
        }
    }

    fn counting_factory() -> (UserFactory, Arc<CountingHasher>) {
        let hasher = Arc::new(CountingHasher::default());
        let validator = UserValidator::new(UserRules::default()).unwrap();
        (UserFactory::new(validator, hasher.clone()), hasher)
    }

    fn argon2_factory() -> UserFactory {
        UserFactory::from_config(
            UserRules::default(),
            HashConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_user_success() {
        let factory = argon2_factory();
        let user = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap();

        assert_eq!(user.username(), "testuser");
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.created_at(), user.updated_at());
        assert_ne!(user.password_hash(), "password123");
        assert!(user.password().verify("password123", factory.hasher()));
        assert!(!user.password().verify("password124", factory.hasher()));
    }

    #[test]
    fn test_new_user_leaves_id_for_storage() {
        let (factory, _) = counting_factory();
        let user = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap();

        assert!(user.id().is_nil());
        assert!(!user.has_id());

        let id = Uuid::new_v4();
        let stored = user.with_id(id);
        assert_eq!(stored.id(), id);
        assert!(stored.has_id());
    }

    #[test]
    fn test_new_user_rejections() {
        let (factory, _) = counting_factory();
        let cases = [
            ("te", "test@example.com", "password123", ValidationKind::UsernameLength),
            ("testuser12345678901234567890", "test@example.com", "password123", ValidationKind::UsernameLength),
            ("testuser", "test@example", "password123", ValidationKind::EmailFormat),
            ("testuser", "test@example.com", "pass123", ValidationKind::PasswordLength),
            ("testuser", "test@example.com", "password", ValidationKind::PasswordStrength),
        ];

        for (username, email, password, expected) in cases {
            let err = factory.new_user(username, email, password).unwrap_err();
            assert_eq!(err.validation_kind(), Some(expected), "{username} / {email} / {password}");
        }
    }

    #[test]
    fn test_new_user_short_circuits_in_order() {
        let (factory, hasher) = counting_factory();

        // Bad username and bad email: only the username error is reported
        let err = factory.new_user("ab", "not-an-email", "short").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::UsernameLength));

        // Bad email and bad password: only the email error is reported
        let err = factory.new_user("testuser", "not-an-email", "short").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::EmailFormat));

        assert_eq!(hasher.calls(), 0);
    }

    #[test]
    fn test_hasher_not_invoked_on_validation_failure() {
        let (factory, hasher) = counting_factory();

        assert!(factory.new_user("ab", "test@example.com", "password123").is_err());
        assert!(factory.new_user("testuser", "test@", "password123").is_err());
        assert!(factory.new_user("testuser", "test@example.com", "12345678").is_err());
        assert_eq!(hasher.calls(), 0);

        assert!(factory.new_user("testuser", "test@example.com", "password123").is_ok());
        assert_eq!(hasher.calls(), 1);
    }

    #[test]
    fn test_hashing_failure_is_not_a_validation_error() {
        let hasher = Arc::new(CountingHasher {
            fail: true,
            ..CountingHasher::default()
        });
        let validator = UserValidator::new(UserRules::default()).unwrap();
        let factory = UserFactory::new(validator, hasher);

        let err = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap_err();
        assert!(matches!(err, DomainError::Hashing { .. }));
        assert_eq!(err.validation_kind(), None);
    }

    #[test]
    fn test_update_fields_revalidates_and_rehashes() {
        let (factory, hasher) = counting_factory();
        let original = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap()
            .with_id(Uuid::new_v4());

        let updated = factory
            .update_fields(
                original.clone(),
                UserChanges {
                    username: Some("renamed".to_string()),
                    email: Some("renamed@example.com".to_string()),
                    password: Some("newpassword1".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert!(updated.updated_at() >= original.updated_at());
        assert_eq!(updated.username(), "renamed");
        assert_eq!(updated.email(), "renamed@example.com");
        assert_ne!(updated.password_hash(), "newpassword1");
        assert_ne!(updated.password_hash(), original.password_hash());
        assert_eq!(hasher.calls(), 2);
    }

    #[test]
    fn test_update_fields_keeps_omitted_fields() {
        let (factory, hasher) = counting_factory();
        let original = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap();

        let updated = factory
            .update_fields(
                original.clone(),
                UserChanges {
                    email: Some("other@example.com".to_string()),
                    ..UserChanges::default()
                },
            )
            .unwrap();

        assert_eq!(updated.username(), "testuser");
        assert_eq!(updated.email(), "other@example.com");
        assert_eq!(updated.password_hash(), original.password_hash());
        assert_eq!(hasher.calls(), 1);
    }

    #[test]
    fn test_update_fields_rejects_raw_weak_password() {
        let (factory, hasher) = counting_factory();
        let original = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap();

        let err = factory
            .update_fields(
                original,
                UserChanges {
                    username: Some("renamed".to_string()),
                    password: Some("newpassword".to_string()),
                    ..UserChanges::default()
                },
            )
            .unwrap_err();

        assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordStrength));
        assert_eq!(hasher.calls(), 1);
    }

    #[test]
    fn test_changes_debug_redacts_password() {
        let changes = UserChanges {
            username: Some("renamed".to_string()),
            password: Some("newpassword1".to_string()),
            ..UserChanges::default()
        };
        let debug = format!("{:?}", changes);

        assert!(debug.contains("renamed"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("newpassword1"));
        assert!(format!("{:?}", UserChanges::default()).contains("password: None"));
    }

    #[test]
    fn test_serialization_hides_hash() {
        let (factory, _) = counting_factory();
        let user = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "testuser");
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn test_user_response_from_user() {
        let (factory, _) = counting_factory();
        let user = factory
            .new_user("testuser", "test@example.com", "password123")
            .unwrap();
        let response = UserResponse::from(&user);

        assert_eq!(response.id, user.id());
        assert_eq!(response.username, "testuser");
        assert_eq!(response.created_at, response.updated_at);
    }
}
