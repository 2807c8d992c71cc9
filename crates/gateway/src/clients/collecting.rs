use async_trait::async_trait;
use common::collecting::{
    self, AcceptOrderRequest, CreateOrderRequest, ListAvailableOrdersRequest,
    ListAvailableOrdersResponse, Order, UpdateOrderStatusRequest,
};

use super::{CollectingBackend, RpcChannel};
use crate::error::BackendError;

/// HTTP client for `collecting.v1.CollectingService`.
#[derive(Debug, Clone)]
pub struct CollectingClient {
    channel: RpcChannel,
}

impl CollectingClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            channel: RpcChannel::new(http, base_url, collecting::SERVICE, "collecting"),
        }
    }
}

#[async_trait]
impl CollectingBackend for CollectingClient {
    #[tracing::instrument(skip(self, req), fields(customer_id = %req.customer_id))]
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, BackendError> {
        self.channel.call(collecting::CREATE_ORDER, req).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_available_orders(&self, limit: i32) -> Result<Vec<Order>, BackendError> {
        let res: ListAvailableOrdersResponse = self
            .channel
            .call(
                collecting::LIST_AVAILABLE_ORDERS,
                &ListAvailableOrdersRequest { limit },
            )
            .await?;
        Ok(res.orders)
    }

    #[tracing::instrument(skip(self))]
    async fn accept_order(
        &self,
        order_id: &str,
        collector_id: &str,
    ) -> Result<Order, BackendError> {
        let req = AcceptOrderRequest {
            order_id: order_id.to_string(),
            collector_id: collector_id.to_string(),
        };
        self.channel.call(collecting::ACCEPT_ORDER, &req).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
        collector_id: &str,
    ) -> Result<Order, BackendError> {
        let req = UpdateOrderStatusRequest {
            order_id: order_id.to_string(),
            status: status.to_string(),
            collector_id: collector_id.to_string(),
        };
        self.channel.call(collecting::UPDATE_ORDER_STATUS, &req).await
    }
}
