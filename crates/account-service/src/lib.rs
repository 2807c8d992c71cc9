//! Account domain service.
//!
//! Exposes users, roles, addresses and device tokens as the
//! `account.v1.AccountService` RPC surface (JSON over HTTP, one `POST` route
//! per method), with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::account;
use common::rpc::method_path;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::RpcError;
pub use service::AccountService;

/// Creates the router with every RPC method, health and metrics.
pub fn create_app(service: Arc<AccountService>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let rpc = |method: &str| method_path(account::SERVICE, method);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(&rpc(account::GET_USER), post(routes::rpc::get_user))
        .route(&rpc(account::UPSERT_USER), post(routes::rpc::upsert_user))
        .route(&rpc(account::SET_ROLE), post(routes::rpc::set_role))
        .route(
            &rpc(account::LIST_ADDRESSES),
            post(routes::rpc::list_addresses),
        )
        .route(
            &rpc(account::UPSERT_DEVICE_TOKEN),
            post(routes::rpc::upsert_device_token),
        )
        .with_state(service)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
