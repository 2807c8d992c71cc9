//! Integration tests for the account RPC router.

use std::sync::{Arc, OnceLock};

use account_service::AccountService;
use account_store::InMemoryAccountStore;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let service = AccountService::in_memory(InMemoryAccountStore::new());
    account_service::create_app(Arc::new(service), get_metrics_handle())
}

async fn call(
    app: &axum::Router,
    method: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/account.v1.AccountService/{method}"))
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_unknown_user_returns_null_user() {
    let app = setup();

    let (status, json) = call(&app, "GetUser", serde_json::json!({ "user_id": "nobody" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["user"].is_null());
}

#[tokio::test]
async fn test_demo_scenario_over_rpc() {
    let app = setup();

    let (status, _) = call(
        &app,
        "UpsertUser",
        serde_json::json!({ "user_id": "uid_demo", "display_name": "Demo User" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        "SetRole",
        serde_json::json!({ "user_id": "uid_demo", "role": "customer" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = call(&app, "GetUser", serde_json::json!({ "user_id": "uid_demo" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["user_id"], "uid_demo");
    assert_eq!(json["user"]["display_name"], "Demo User");
    assert!(json["user"]["email"].is_null());
}

#[tokio::test]
async fn test_list_addresses_omits_empty_list() {
    let app = setup();

    let (status, json) = call(
        &app,
        "ListAddresses",
        serde_json::json!({ "user_id": "uid_demo" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("addresses").is_none());
}

#[tokio::test]
async fn test_set_role_rejects_unknown_role() {
    let app = setup();

    let (status, json) = call(
        &app,
        "SetRole",
        serde_json::json!({ "user_id": "u1", "role": "superuser" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "invalid_argument");
}

#[tokio::test]
async fn test_set_role_for_unknown_user_is_failed_precondition() {
    let app = setup();

    let (status, json) = call(
        &app,
        "SetRole",
        serde_json::json!({ "user_id": "ghost", "role": "collector" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "failed_precondition");
}

#[tokio::test]
async fn test_upsert_device_token() {
    let app = setup();
    call(&app, "UpsertUser", serde_json::json!({ "user_id": "u1" })).await;

    let (status, json) = call(
        &app,
        "UpsertDeviceToken",
        serde_json::json!({ "user_id": "u1", "token": "tok1", "platform": "android" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({}));
}

#[tokio::test]
async fn test_upsert_device_token_rejects_unknown_platform() {
    let app = setup();

    let (status, json) = call(
        &app,
        "UpsertDeviceToken",
        serde_json::json!({ "user_id": "u1", "token": "tok1", "platform": "blackberry" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "invalid_argument");
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let app = setup();
    call(&app, "GetUser", serde_json::json!({ "user_id": "u1" })).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_undecodable_request_is_counted_as_failure() {
    let app = setup();
    call(
        &app,
        "UpsertDeviceToken",
        serde_json::json!({ "user_id": "u1", "token": "tok1", "platform": "pager" }),
    )
    .await;

    let rendered = get_metrics_handle().render();
    let failures: Vec<&str> = rendered
        .lines()
        .filter(|line| line.starts_with("account_rpc_failures_total{"))
        .collect();
    assert!(
        failures.iter().any(|line| line.contains(r#"method="UpsertDeviceToken""#)
            && line.contains(r#"code="invalid_argument""#)),
        "{rendered}"
    );
    assert!(
        rendered
            .lines()
            .any(|line| line.starts_with("account_rpc_requests_total{")
                && line.contains(r#"method="UpsertDeviceToken""#)),
        "{rendered}"
    );
}
