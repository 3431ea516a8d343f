//! Application state shared by all handlers.

use std::sync::Arc;

use domain::UserFactory;

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Application state (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User use cases
    pub user_service: Arc<dyn UserService>,
    /// Database connection, used for health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM repository and user service over a database.
    pub fn from_database(database: Arc<Database>, factory: Arc<UserFactory>) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(repo, factory));

        Self::new(user_service, database)
    }

    /// Create state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
