use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, ID, Object, Result};

use super::types::{CreateOrderInput, Order};
use crate::clients::CollectingBackend;
use crate::translate;

pub struct MutationRoot;

#[Object(rename_args = "snake_case")]
impl MutationRoot {
    async fn create_order(&self, ctx: &Context<'_>, input: CreateOrderInput) -> Result<Order> {
        let collecting = ctx.data::<Arc<dyn CollectingBackend>>()?;
        let order = collecting
            .create_order(&translate::create_order_request(input))
            .await
            .map_err(|e| e.extend())?;
        Ok(translate::order(order))
    }

    async fn accept_order(
        &self,
        ctx: &Context<'_>,
        order_id: ID,
        collector_id: ID,
    ) -> Result<Order> {
        let collecting = ctx.data::<Arc<dyn CollectingBackend>>()?;
        let order = collecting
            .accept_order(&order_id, &collector_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(translate::order(order))
    }

    /// Moves an accepted order to `on_way`, `complete` or `cancelled`.
    async fn update_order_status(
        &self,
        ctx: &Context<'_>,
        order_id: ID,
        status: String,
        collector_id: ID,
    ) -> Result<Order> {
        let collecting = ctx.data::<Arc<dyn CollectingBackend>>()?;
        let order = collecting
            .update_order_status(&order_id, &status, &collector_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(translate::order(order))
    }
}
