//! Request handlers for the `/tests` resource.
//!
//! Store access is synchronous, so every handler moves its service call onto the blocking
//! thread pool and awaits the result.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{DeleteTestRes, ErrorRes, HealthRes, HealthService, TestReq, TestRes};
use axum::{
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::StatusCode,
    response::Json,
};
use labtrack_core::{DiagnosticTest, TestInput, TestResult};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not touch the store.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/tests",
    responses(
        (status = 200, description = "All diagnostic tests", body = [TestRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all diagnostic tests
///
/// Returns every stored record in the store's natural order. No sorting or filtering.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be read.
#[axum::debug_handler]
pub async fn list_tests(State(state): State<AppState>) -> Result<Json<Vec<TestRes>>, ApiError> {
    let service = state.test_service.clone();
    let tests = run_blocking(move || service.list()).await?;
    Ok(Json(tests.into_iter().map(to_res).collect()))
}

#[utoipa::path(
    post,
    path = "/tests",
    request_body = TestReq,
    responses(
        (status = 201, description = "Diagnostic test created", body = TestRes),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a diagnostic test
///
/// Validates the body and stores a new record with a server-assigned ID.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not valid JSON for a test,
/// - `patientName`, `testType` or `result` is missing or blank, or
/// - `testDate` is missing or not a valid date.
///
/// Returns `500 Internal Server Error` if the store write fails.
#[axum::debug_handler]
pub async fn create_test(
    State(state): State<AppState>,
    payload: Result<Json<TestReq>, JsonRejection>,
) -> Result<(StatusCode, Json<TestRes>), ApiError> {
    let Json(req) = payload?;
    let service = state.test_service.clone();
    let created = run_blocking(move || service.create(to_input(req))).await?;
    Ok((StatusCode::CREATED, Json(to_res(created))))
}

#[utoipa::path(
    get,
    path = "/tests/{id}",
    params(("id" = String, Path, description = "Test ID (32 lowercase hex characters)")),
    responses(
        (status = 200, description = "Diagnostic test", body = TestRes),
        (status = 400, description = "Invalid test ID", body = ErrorRes),
        (status = 404, description = "Test result not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch one diagnostic test
#[axum::debug_handler]
pub async fn get_test(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<TestRes>, ApiError> {
    let service = state.test_service.clone();
    let test = run_blocking(move || service.get(&id)).await?;
    Ok(Json(to_res(test)))
}

#[utoipa::path(
    put,
    path = "/tests/{id}",
    params(("id" = String, Path, description = "Test ID (32 lowercase hex characters)")),
    request_body = TestReq,
    responses(
        (status = 200, description = "Diagnostic test updated", body = TestRes),
        (status = 400, description = "Invalid test ID or validation failed", body = ErrorRes),
        (status = 404, description = "Test result not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Replace a diagnostic test
///
/// Applies the same validation as create, then replaces every field except the ID.
///
/// # Errors
/// Returns `400 Bad Request` for a malformed ID or invalid body, `404 Not Found` if no record
/// has this ID, and `500 Internal Server Error` if the store write fails.
#[axum::debug_handler]
pub async fn update_test(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    payload: Result<Json<TestReq>, JsonRejection>,
) -> Result<Json<TestRes>, ApiError> {
    let Json(req) = payload?;
    let service = state.test_service.clone();
    let updated = run_blocking(move || service.update(&id, to_input(req))).await?;
    Ok(Json(to_res(updated)))
}

#[utoipa::path(
    delete,
    path = "/tests/{id}",
    params(("id" = String, Path, description = "Test ID (32 lowercase hex characters)")),
    responses(
        (status = 200, description = "Diagnostic test deleted", body = DeleteTestRes),
        (status = 400, description = "Invalid test ID", body = ErrorRes),
        (status = 404, description = "Test result not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Delete a diagnostic test
#[axum::debug_handler]
pub async fn delete_test(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<DeleteTestRes>, ApiError> {
    let service = state.test_service.clone();
    run_blocking(move || service.delete(&id)).await?;
    Ok(Json(DeleteTestRes {
        message: "Test result deleted successfully".into(),
    }))
}

/// Fallback for any method the `/tests` routes do not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> TestResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

fn to_input(req: TestReq) -> TestInput {
    TestInput {
        patient_name: req.patient_name,
        test_type: req.test_type,
        result: req.result,
        test_date: req.test_date,
        notes: req.notes,
    }
}

fn to_res(test: DiagnosticTest) -> TestRes {
    TestRes {
        id: test.id.to_string(),
        patient_name: test.patient_name.into_inner(),
        test_type: test.test_type.into_inner(),
        result: test.result.into_inner(),
        test_date: test.test_date.to_canonical(),
        notes: test.notes,
    }
}
