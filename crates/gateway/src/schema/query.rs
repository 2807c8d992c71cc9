use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, ID, Object, Result};

use super::types::{Address, Order, User};
use crate::clients::{AccountBackend, CollectingBackend};
use crate::translate;

pub struct QueryRoot;

#[Object(rename_args = "snake_case")]
impl QueryRoot {
    /// Profile of `user_id`, or `null` when the account service has none.
    async fn me(&self, ctx: &Context<'_>, user_id: ID) -> Result<Option<User>> {
        let account = ctx.data::<Arc<dyn AccountBackend>>()?;
        let user = account.get_user(&user_id).await.map_err(|e| e.extend())?;
        Ok(user.map(translate::user))
    }

    async fn my_addresses(&self, ctx: &Context<'_>, user_id: ID) -> Result<Vec<Address>> {
        let account = ctx.data::<Arc<dyn AccountBackend>>()?;
        let addresses = account
            .list_addresses(&user_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(addresses.into_iter().map(translate::address).collect())
    }

    /// Orders waiting for a collector, newest first. `limit` defaults to 10.
    async fn available_orders(&self, ctx: &Context<'_>, limit: Option<i32>) -> Result<Vec<Order>> {
        let collecting = ctx.data::<Arc<dyn CollectingBackend>>()?;
        let orders = collecting
            .list_available_orders(translate::available_orders_limit(limit))
            .await
            .map_err(|e| e.extend())?;
        Ok(orders.into_iter().map(translate::order).collect())
    }
}
