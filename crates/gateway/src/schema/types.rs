//! Public GraphQL object and input types.

use async_graphql::{ID, InputObject, SimpleObject};

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct User {
    pub user_id: ID,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Address {
    pub id: ID,
    pub full_text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub is_default: Option<bool>,
}

/// A pickup order as seen by gateway clients.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Order {
    pub id: ID,
    pub status: String,
    pub customer_id: ID,
    /// Collector holding the order, `null` until accepted.
    pub accepted_by: Option<String>,
    pub note: Option<String>,
}

/// Flat order form; the gateway nests it into the collecting service's shape.
#[derive(Debug, Clone, PartialEq, InputObject)]
#[graphql(rename_fields = "snake_case")]
pub struct CreateOrderInput {
    pub customer_id: ID,
    pub full_text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
}
