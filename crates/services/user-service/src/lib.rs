//! User Service Library
//!
//! HTTP CRUD service for users. Input is validated and passwords are hashed
//! by the `domain` crate before anything reaches the database.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use domain::UserFactory;

use crate::api::{create_router, AppState};
use crate::config::UserServiceConfig;
use crate::infra::Database;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Reject bad rules or hash cost before touching the database
    let factory = Arc::new(UserFactory::from_config(config.rules, config.hashing)?);

    let db = Arc::new(Database::connect(&config.database).await?);
    let app = create_router(AppState::from_database(db, factory));

    let addr = config.service.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("User service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_last().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for migration in status {
                let marker = if migration.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, migration.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
