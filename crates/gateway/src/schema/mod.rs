//! The gateway's GraphQL schema.

mod mutation;
mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::clients::Backends;

pub type GatewaySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with both backends available to every resolver.
pub fn build_schema(backends: Backends) -> GatewaySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(backends.account)
        .data(backends.collecting)
        .finish()
}
