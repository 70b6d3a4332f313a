//! End-to-end tests of the `/tests` resource, driving the axum router in-process against an
//! on-disk SQLite database in a temporary directory.

use api_rest::{router, AppState};
use api_shared::{DeleteTestRes, ErrorRes, TestRes};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use labtrack_core::{CoreConfig, TestService};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const UNKNOWN_ID: &str = "0123456789abcdef0123456789abcdef";

struct TestApp {
    app: Router,
    temp_dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = CoreConfig::new(temp_dir.path().join("labtrack.db")).expect("valid config");
        let service = TestService::new(&cfg).expect("service should initialise");
        Self {
            app: router(AppState::new(service)),
            temp_dir,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body should be JSON")
        };
        (status, value)
    }

    async fn create(&self, patient: &str) -> TestRes {
        let (status, body) = self
            .send(Method::POST, "/tests", Some(valid_body(patient)))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_value(body).expect("created body should be a test")
    }
}

fn valid_body(patient: &str) -> Value {
    json!({
        "patientName": patient,
        "testType": "Full blood count",
        "result": "Normal",
        "testDate": "2024-03-01T08:30:00Z",
        "notes": "Fasting sample"
    })
}

#[tokio::test]
async fn test_create_returns_201_with_assigned_id() {
    let app = TestApp::new();

    let created = app.create("Jane Doe").await;

    assert_eq!(created.id.len(), 32);
    assert_eq!(created.patient_name, "Jane Doe");
    assert_eq!(created.test_type, "Full blood count");
    assert_eq!(created.result, "Normal");
    assert_eq!(created.test_date, "2024-03-01T08:30:00.000Z");
    assert_eq!(created.notes, "Fasting sample");
}

#[tokio::test]
async fn test_create_without_notes_defaults_to_empty() {
    let app = TestApp::new();
    let mut body = valid_body("Jane Doe");
    body.as_object_mut().unwrap().remove("notes");

    let (status, body) = app.send(Method::POST, "/tests", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["notes"], "");
}

#[tokio::test]
async fn test_create_missing_required_field_returns_400_and_persists_nothing() {
    let app = TestApp::new();

    for field in ["patientName", "testType", "result", "testDate"] {
        let mut body = valid_body("Jane Doe");
        body.as_object_mut().unwrap().remove(field);

        let (status, body) = app.send(Method::POST, "/tests", Some(body)).await;
        let error: ErrorRes = serde_json::from_value(body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert!(error.details.iter().any(|d| d.field == field));
    }

    let (status, list) = app.send(Method::GET, "/tests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_with_invalid_date_returns_400() {
    let app = TestApp::new();
    let mut body = valid_body("Jane Doe");
    body["testDate"] = json!("not-a-date");

    let (status, body) = app.send(Method::POST, "/tests", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "testDate");
}

#[tokio::test]
async fn test_create_with_five_digit_year_returns_400_and_list_still_works() {
    let app = TestApp::new();
    let mut body = valid_body("Jane Doe");
    body["testDate"] = json!("+12345-01-01");

    let (status, body) = app.send(Method::POST, "/tests", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "testDate");

    let (status, list) = app.send(Method::GET, "/tests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tests")
        .header("content-type", "application/json")
        .body(Body::from("{\"patientName\": "))
        .unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, &format!("/tests/{UNKNOWN_ID}"), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Test result not found");
}

#[tokio::test]
async fn test_malformed_id_returns_400_on_every_item_route() {
    let app = TestApp::new();
    let uri = "/tests/not-a-valid-id";

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(valid_body("Jane Doe"))),
        (Method::DELETE, None),
    ] {
        let (status, body) = app.send(method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(body["error"], "Invalid test ID");
    }
}

#[tokio::test]
async fn test_get_after_create_returns_matching_record() {
    let app = TestApp::new();
    let created = app.create("Jane Doe").await;

    let (status, body) = app
        .send(Method::GET, &format!("/tests/{}", created.id), None)
        .await;
    let fetched: TestRes = serde_json::from_value(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_then_get_returns_updated_fields() {
    let app = TestApp::new();
    let created = app.create("Jane Doe").await;
    let uri = format!("/tests/{}", created.id);

    let update = json!({
        "patientName": "Jane Smith",
        "testType": "Lipid panel",
        "result": "LDL elevated",
        "testDate": "2024-04-02",
        "notes": ""
    });
    let (status, body) = app.send(Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    let updated: TestRes = serde_json::from_value(body).unwrap();

    let (_, body) = app.send(Method::GET, &uri, None).await;
    let fetched: TestRes = serde_json::from_value(body).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(fetched, updated);
    assert_eq!(fetched.patient_name, "Jane Smith");
    assert_eq!(fetched.result, "LDL elevated");
    assert_eq!(fetched.test_date, "2024-04-02T00:00:00.000Z");
}

#[tokio::test]
async fn test_update_validates_input() {
    let app = TestApp::new();
    let created = app.create("Jane Doe").await;
    let mut body = valid_body("Jane Doe");
    body["result"] = json!("");

    let (status, body) = app
        .send(Method::PUT, &format!("/tests/{}", created.id), Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "result");
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/tests/{UNKNOWN_ID}"),
            Some(valid_body("Jane Doe")),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404_and_second_delete_returns_404() {
    let app = TestApp::new();
    let created = app.create("Jane Doe").await;
    let uri = format!("/tests/{}", created.id);

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    let confirmation: DeleteTestRes = serde_json::from_value(body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmation.message, "Test result deleted successfully");

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_after_deleting_one_of_n_returns_n_minus_one() {
    let app = TestApp::new();
    let mut created = Vec::new();
    for patient in ["Ada", "Grace", "Katherine", "Dorothy"] {
        created.push(app.create(patient).await);
    }
    let removed = created[2].id.clone();

    let (status, _) = app
        .send(Method::DELETE, &format!("/tests/{removed}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::GET, "/tests", None).await;
    let listed: Vec<TestRes> = serde_json::from_value(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.len(), created.len() - 1);
    assert!(listed.iter().all(|t| t.id != removed));
}

#[tokio::test]
async fn test_unsupported_methods_return_405() {
    let app = TestApp::new();
    let item = format!("/tests/{UNKNOWN_ID}");

    for (method, uri) in [
        (Method::DELETE, "/tests"),
        (Method::PUT, "/tests"),
        (Method::PATCH, "/tests"),
        (Method::POST, item.as_str()),
        (Method::PATCH, item.as_str()),
    ] {
        let (status, body) = app.send(method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_store_failure_returns_500_with_generic_message() {
    let app = TestApp::new();
    std::fs::remove_file(app.temp_dir.path().join("labtrack.db")).unwrap();

    let (status, body) = app.send(Method::GET, "/tests", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal error");
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}
