//! Order storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CollectingError, Result};
use crate::order::{Order, OrderStatus};

/// Trait for order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a new order. Fails if the id is taken.
    async fn create(&self, order: Order) -> Result<()>;

    /// Loads an order by id.
    async fn get(&self, order_id: &str) -> Result<Option<Order>>;

    /// Returns up to `limit` orders still waiting for a collector, newest first.
    async fn list_available(&self, limit: usize) -> Result<Vec<Order>>;

    /// Atomically hands a `created` order to `collector_id`.
    ///
    /// Fails if the order is gone, no longer `created`, or the collector already
    /// holds an active order.
    async fn accept(&self, order_id: &str, collector_id: &str) -> Result<Order>;

    /// Returns the accepted or on-the-way orders held by `collector_id`.
    async fn list_active_by_collector(&self, collector_id: &str) -> Result<Vec<Order>>;

    /// Returns a page of the orders placed by `customer_id`, newest first.
    async fn list_by_customer(
        &self,
        customer_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Order>>;

    /// Replaces a stored order if it is still at `expected_version`.
    async fn update(&self, order: Order, expected_version: i64) -> Result<()>;
}

/// In-memory order store.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id) {
            return Err(CollectingError::DuplicateOrder(order.id));
        }
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn get(&self, order_id: &str) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(order_id).cloned())
    }

    async fn list_available(&self, limit: usize) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut available: Vec<Order> = orders
            .values()
            .filter(|o| o.status == OrderStatus::Created)
            .cloned()
            .collect();
        available.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        available.truncate(limit);
        Ok(available)
    }

    async fn accept(&self, order_id: &str, collector_id: &str) -> Result<Order> {
        let mut orders = self.orders.write().await;

        if orders
            .values()
            .any(|o| o.is_held_by(collector_id) && o.status.is_active())
        {
            return Err(CollectingError::CollectorBusy(collector_id.to_string()));
        }

        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| CollectingError::OrderNotFound(order_id.to_string()))?;
        if order.status != OrderStatus::Created {
            return Err(CollectingError::AlreadyTaken(order_id.to_string()));
        }

        order.accept(collector_id);
        Ok(order.clone())
    }

    async fn list_active_by_collector(&self, collector_id: &str) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut active: Vec<Order> = orders
            .values()
            .filter(|o| o.is_held_by(collector_id) && o.status.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn list_by_customer(
        &self,
        customer_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut placed: Vec<Order> = orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        placed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(placed.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, order: Order, expected_version: i64) -> Result<()> {
        let mut orders = self.orders.write().await;
        let slot = orders
            .get_mut(&order.id)
            .ok_or_else(|| CollectingError::OrderNotFound(order.id.clone()))?;

        if slot.version != expected_version {
            return Err(CollectingError::ConcurrencyConflict {
                order_id: order.id,
                expected: expected_version,
                actual: slot.version,
            });
        }

        *slot = order;
        Ok(())
    }
}
