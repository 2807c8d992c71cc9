//! Gateway over real account and collecting servers on ephemeral ports.

use std::sync::{Arc, OnceLock};

use account_service::AccountService;
use account_store::InMemoryAccountStore;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use collecting::{CollectingService, InMemoryOrderStore};
use common::account::User;
use common::{Platform, Role, RpcCode};
use gateway::{AccountBackend, BackendError, Backends, GatewaySchema};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
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

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    gateway::config::base_url(&addr.to_string())
}

async fn start_backends() -> Backends {
    let account = AccountService::in_memory(InMemoryAccountStore::new());
    let account_url = serve(account_service::create_app(
        Arc::new(account),
        get_metrics_handle(),
    ))
    .await;

    let orders = CollectingService::new(InMemoryOrderStore::new());
    let collect_url =
        serve(collecting::create_app(Arc::new(orders), get_metrics_handle())).await;

    Backends::connect(&account_url, &collect_url)
}

async fn execute(schema: &GatewaySchema, query: &str) -> (Value, Vec<Value>) {
    let response = schema.execute(query).await;
    let errors = response
        .errors
        .iter()
        .map(|e| serde_json::to_value(e).unwrap())
        .collect();
    (response.data.into_json().unwrap(), errors)
}

#[tokio::test]
async fn test_demo_user_through_gateway() {
    let backends = start_backends().await;
    backends
        .account
        .upsert_user(&User {
            user_id: "uid_demo".to_string(),
            display_name: Some("Demo User".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    backends
        .account
        .set_role("uid_demo", Role::Customer)
        .await
        .unwrap();
    backends
        .account
        .upsert_device_token("uid_demo", "tok1", Platform::Android)
        .await
        .unwrap();
    let schema = gateway::build_schema(backends);

    let (data, errors) = execute(
        &schema,
        r#"{
            me(user_id: "uid_demo") { user_id display_name phone }
            myAddresses(user_id: "uid_demo") { id }
        }"#,
    )
    .await;

    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(
        data,
        json!({
            "me": { "user_id": "uid_demo", "display_name": "Demo User", "phone": null },
            "myAddresses": []
        })
    );
}

#[tokio::test]
async fn test_order_flow_through_gateway() {
    let schema = gateway::build_schema(start_backends().await);

    let (data, errors) = execute(
        &schema,
        r#"mutation {
            createOrder(input: { customer_id: "c1", full_text: "123 Demo St", note: "by the gate" }) {
                id status accepted_by note
            }
        }"#,
    )
    .await;
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(data["createOrder"]["status"], "created");
    assert_eq!(data["createOrder"]["accepted_by"], Value::Null);
    assert_eq!(data["createOrder"]["note"], "by the gate");
    let order_id = data["createOrder"]["id"].as_str().unwrap().to_string();

    let (data, _) = execute(&schema, "{ availableOrders { id } }").await;
    assert_eq!(data["availableOrders"], json!([{ "id": order_id }]));

    let (data, errors) = execute(
        &schema,
        &format!(
            r#"mutation {{
                acceptOrder(order_id: "{order_id}", collector_id: "col1") {{ status accepted_by }}
            }}"#
        ),
    )
    .await;
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(data["acceptOrder"], json!({ "status": "accepted", "accepted_by": "col1" }));

    let (data, _) = execute(&schema, "{ availableOrders { id } }").await;
    assert_eq!(data["availableOrders"], json!([]));

    let (_, errors) = execute(
        &schema,
        &format!(
            r#"mutation {{
                updateOrderStatus(order_id: "{order_id}", status: "complete", collector_id: "col1") {{ status }}
            }}"#
        ),
    )
    .await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["extensions"]["code"], "failed_precondition");
    assert_eq!(errors[0]["extensions"]["backend"], "collecting");
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backends = Backends::connect(&format!("http://{addr}"), &format!("http://{addr}"));
    let err = backends.account.get_user("u1").await.unwrap_err();

    assert!(matches!(err, BackendError::Transport { backend: "account", .. }));
    assert_eq!(err.code(), RpcCode::Unavailable);
}

#[tokio::test]
async fn test_graphql_over_http() {
    let schema = gateway::build_schema(start_backends().await);
    let app = gateway::create_app(schema, get_metrics_handle());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "query": r#"{ me(user_id: "nobody") { user_id } }"# }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"], json!({ "me": null }));
}
