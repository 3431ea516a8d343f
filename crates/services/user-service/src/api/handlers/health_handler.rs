//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub database: ServiceStatus,
}

/// Dependency status
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(example = "healthy")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Health check with database connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = database_status(state.database.ping().await);

    let healthy = database.error.is_none();
    let overall = if healthy { "healthy" } else { "degraded" };
    let response = HealthResponse {
        status: overall.to_string(),
        database,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

/// Driver errors are logged, never sent to the client.
fn database_status(ping: Result<(), DbErr>) -> ServiceStatus {
    match ping {
        Ok(()) => ServiceStatus {
            status: "healthy".to_string(),
            error: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            ServiceStatus {
                status: "unhealthy".to_string(),
                error: Some("unreachable".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_status_healthy() {
        let status = database_status(Ok(()));
        assert_eq!(status.status, "healthy");
        assert!(status.error.is_none());
    }

    #[test]
    fn test_database_status_hides_driver_error() {
        let status = database_status(Err(DbErr::Custom(
            "connection refused: postgres://app:secret@db:5432/users".to_string(),
        )));

        assert_eq!(status.status, "unhealthy");
        assert_eq!(status.error.as_deref(), Some("unreachable"));
    }
}
