//! # API REST
//!
//! REST API for the labtrack diagnostic-test tracker.
//!
//! Handles:
//! - HTTP endpoints with axum (`/tests`, `/tests/{id}`, `/health`)
//! - Status-code mapping for validation, not-found, method and store errors
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for wire types and `labtrack-core` for the data operations.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

pub use error::ApiError;

use api_shared::{DeleteTestRes, ErrorRes, FieldErrorRes, HealthRes, TestReq, TestRes};
use axum::{routing::get, Router};
use labtrack_core::TestService;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub test_service: Arc<TestService>,
}

impl AppState {
    pub fn new(test_service: TestService) -> Self {
        Self {
            test_service: Arc::new(test_service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_tests,
        handlers::create_test,
        handlers::get_test,
        handlers::update_test,
        handlers::delete_test,
    ),
    components(schemas(HealthRes, TestReq, TestRes, DeleteTestRes, ErrorRes, FieldErrorRes))
)]
pub struct ApiDoc;

/// Build the REST application.
///
/// Methods a route does not serve are answered with `405` and a JSON error body.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tests",
            get(handlers::list_tests)
                .post(handlers::create_test)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/tests/:id",
            get(handlers::get_test)
                .put(handlers::update_test)
                .delete(handlers::delete_test)
                .fallback(handlers::method_not_allowed),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
