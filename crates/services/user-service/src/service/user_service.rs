//! User service - Handles user-related business logic.
//!
//! Every write goes through [`UserFactory`], so stored users are always
//! validated and carry a hashed password.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{User, UserChanges, UserFactory};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, hash and persist a new user
    async fn create_user(&self, username: &str, email: &str, password: &str) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply field changes to a user. Supplied fields are fully re-validated.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Permanently delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    factory: Arc<UserFactory>,
}

impl UserManager {
    /// Create new user service instance with repository and factory
    pub fn new(repo: Arc<dyn UserRepository>, factory: Arc<UserFactory>) -> Self {
        Self { repo, factory }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        let user = self.factory.new_user(username, email, password)?;
        let user = self.repo.create(&user).await?;

        info!(user_id = %user.id(), "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let existing = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        let password_changed = changes.password.is_some();

        let updated = self.factory.update_fields(existing, changes)?;
        let user = self.repo.update(&updated).await?;

        info!(user_id = %id, password_changed, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
