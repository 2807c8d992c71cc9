//! Order-collecting service.
//!
//! Customers place waste pickup orders, collectors accept them one at a time
//! and walk them through `created -> accepted -> on_way -> complete`. Served as
//! `collecting.v1.CollectingService` over JSON/HTTP.

pub mod config;
pub mod error;
pub mod order;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::collecting;
use common::rpc::method_path;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{CollectingError, Result};
pub use order::{Order, OrderStatus};
pub use service::CollectingService;
pub use store::{InMemoryOrderStore, OrderStore};

/// Creates the router with every RPC method, health and metrics.
pub fn create_app<S: OrderStore + 'static>(
    service: Arc<CollectingService<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let rpc = |method: &str| method_path(collecting::SERVICE, method);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            &rpc(collecting::CREATE_ORDER),
            post(routes::rpc::create_order::<S>),
        )
        .route(
            &rpc(collecting::LIST_AVAILABLE_ORDERS),
            post(routes::rpc::list_available_orders::<S>),
        )
        .route(
            &rpc(collecting::ACCEPT_ORDER),
            post(routes::rpc::accept_order::<S>),
        )
        .route(
            &rpc(collecting::UPDATE_ORDER_STATUS),
            post(routes::rpc::update_order_status::<S>),
        )
        .route(&rpc(collecting::GET_ORDER), post(routes::rpc::get_order::<S>))
        .route(
            &rpc(collecting::CANCEL_ORDER),
            post(routes::rpc::cancel_order::<S>),
        )
        .route(
            &rpc(collecting::LIST_MY_ACTIVE_ORDERS),
            post(routes::rpc::list_my_active_orders::<S>),
        )
        .route(
            &rpc(collecting::LIST_MY_ORDERS),
            post(routes::rpc::list_my_orders::<S>),
        )
        .with_state(service)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
