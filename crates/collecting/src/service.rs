//! Order service providing the collecting operations.

use common::collecting::{CreateOrderRequest, ListAvailableOrdersRequest, ListMyOrdersRequest};
use uuid::Uuid;

use crate::error::{CollectingError, Result};
use crate::order::{Order, OrderStatus};
use crate::store::OrderStore;

/// Page size used when a caller asks for zero or a negative number of orders.
pub const DEFAULT_AVAILABLE_LIMIT: usize = 20;

/// Page size for a customer's order history when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Service for placing and progressing pickup orders.
pub struct CollectingService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> CollectingService<S> {
    /// Creates a new service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Places a new order for a customer.
    #[tracing::instrument(skip(self, req), fields(customer_id = %req.customer_id))]
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<Order> {
        if req.customer_id.trim().is_empty() {
            return Err(CollectingError::InvalidArgument(
                "customer_id is required".to_string(),
            ));
        }

        let order = Order::place(Uuid::new_v4().to_string(), req);
        self.store.create(order.clone()).await?;
        tracing::info!(order_id = %order.id, "order created");
        Ok(order)
    }

    /// Lists orders still waiting for a collector.
    #[tracing::instrument(skip(self))]
    pub async fn list_available(&self, req: ListAvailableOrdersRequest) -> Result<Vec<Order>> {
        let limit = usize::try_from(req.limit)
            .ok()
            .filter(|&limit| limit > 0)
            .unwrap_or(DEFAULT_AVAILABLE_LIMIT);
        self.store.list_available(limit).await
    }

    /// Hands an order to a collector. A collector works one order at a time.
    #[tracing::instrument(skip(self))]
    pub async fn accept_order(&self, order_id: &str, collector_id: &str) -> Result<Order> {
        let order = self.store.accept(order_id, collector_id).await?;
        tracing::info!(%order_id, %collector_id, "order accepted");
        Ok(order)
    }

    /// Moves an order along its lifecycle on behalf of its collector.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: &str,
        status: &str,
        collector_id: &str,
    ) -> Result<Order> {
        let next: OrderStatus = status
            .parse()
            .map_err(|e: common::ParseEnumError| CollectingError::InvalidArgument(e.to_string()))?;

        let mut order = self.get_order(order_id).await?;
        let expected = order.version;
        if !order.is_held_by(collector_id) {
            return Err(CollectingError::NotOwner {
                order_id: order_id.to_string(),
                collector_id: collector_id.to_string(),
            });
        }
        if !order.status.can_transition(next) {
            return Err(CollectingError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        order.advance(next);
        self.store.update(order.clone(), expected).await?;
        tracing::info!(%order_id, status = %next, "order status updated");
        Ok(order)
    }

    /// Cancels an order on behalf of the customer who placed it, before any
    /// collector has accepted it.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        order_id: &str,
        customer_id: &str,
        reason: &str,
    ) -> Result<Order> {
        let mut order = self.get_order(order_id).await?;
        let expected = order.version;
        if order.customer_id != customer_id {
            return Err(CollectingError::NotCustomer {
                order_id: order_id.to_string(),
                customer_id: customer_id.to_string(),
            });
        }
        if order.status != OrderStatus::Created {
            return Err(CollectingError::CannotCancel {
                order_id: order_id.to_string(),
                status: order.status,
            });
        }

        order.cancel(reason);
        self.store.update(order.clone(), expected).await?;
        tracing::info!(%order_id, "order cancelled by customer");
        Ok(order)
    }

    /// Lists the orders a collector is currently working on.
    #[tracing::instrument(skip(self))]
    pub async fn list_my_active_orders(&self, collector_id: &str) -> Result<Vec<Order>> {
        self.store.list_active_by_collector(collector_id).await
    }

    /// Lists one page of a customer's orders, newest first.
    ///
    /// Pages are 1-based; `page < 1` reads the first page and `size <= 0`
    /// uses [`DEFAULT_PAGE_SIZE`].
    #[tracing::instrument(skip(self, req), fields(customer_id = %req.customer_id))]
    pub async fn list_my_orders(&self, req: ListMyOrdersRequest) -> Result<Vec<Order>> {
        let page = usize::try_from(req.page)
            .ok()
            .filter(|&page| page > 0)
            .unwrap_or(1);
        let size = usize::try_from(req.size)
            .ok()
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        self.store
            .list_by_customer(&req.customer_id, (page - 1).saturating_mul(size), size)
            .await
    }

    /// Loads an order by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<Order> {
        self.store
            .get(order_id)
            .await?
            .ok_or_else(|| CollectingError::OrderNotFound(order_id.to_string()))
    }
}
