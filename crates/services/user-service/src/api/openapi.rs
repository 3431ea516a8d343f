//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use domain::UserResponse;

/// OpenAPI documentation for the user service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        version = "0.1.0",
        description = "User CRUD API with validated input and Argon2 password hashing",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::get_user,
        user_handler::list_users,
        user_handler::update_user,
        user_handler::delete_user,
        health_handler::health,
    ),
    components(
        schemas(
            UserResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::MessageResponse,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
        )
    ),
    tags(
        (name = "Users", description = "User management"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
