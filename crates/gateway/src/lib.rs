//! GraphQL gateway.
//!
//! One public schema over the account and collecting services. Every field
//! resolves with a single backend call; arguments and results are reshaped in
//! [`translate`] so neither backend's wire format leaks into the schema.

pub mod clients;
pub mod config;
pub mod error;
pub mod schema;
pub mod translate;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use clients::{AccountBackend, Backends, CollectingBackend};
pub use config::Config;
pub use error::BackendError;
pub use schema::{GatewaySchema, build_schema};

/// POST /graphql
async fn graphql(State(schema): State<GatewaySchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// GET /graphql: GraphiQL explorer.
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok",
        service: "gateway",
    })
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}

/// Creates the gateway router: GraphQL, health and metrics.
pub fn create_app(schema: GatewaySchema, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/graphql", get(graphiql).post(graphql))
        .route("/health", get(health))
        .with_state(schema)
        .merge(metrics_router)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
