//! `collecting.v1.CollectingService` method handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use common::collecting::{
    self, AcceptOrderRequest, CancelOrderRequest, CreateOrderRequest, GetOrderRequest,
    ListAvailableOrdersRequest, ListAvailableOrdersResponse, ListMyActiveOrdersRequest,
    ListMyOrdersRequest, ListOrdersResponse, Order, UpdateOrderStatusRequest,
};

use crate::error::{CollectingError, Result};
use crate::service::CollectingService;
use crate::store::OrderStore;

type Payload<T> = std::result::Result<Json<T>, JsonRejection>;

fn record<T>(method: &'static str, result: &Result<T>) {
    metrics::counter!("collecting_rpc_requests_total", "method" => method).increment(1);
    if let Err(e) = result {
        metrics::counter!("collecting_rpc_failures_total", "method" => method, "code" => e.code().as_str())
            .increment(1);
        tracing::warn!(method, error = %e, "rpc failed");
    }
}

/// POST /collecting.v1.CollectingService/CreateOrder
pub async fn create_order<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<CreateOrderRequest>,
) -> Result<Json<Order>> {
    let result = match payload {
        Ok(Json(req)) => service.create_order(req).await,
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::CREATE_ORDER, &result);
    Ok(Json(result?.to_wire()))
}

/// POST /collecting.v1.CollectingService/ListAvailableOrders
pub async fn list_available_orders<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<ListAvailableOrdersRequest>,
) -> Result<Json<ListAvailableOrdersResponse>> {
    let result = match payload {
        Ok(Json(req)) => service.list_available(req).await,
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::LIST_AVAILABLE_ORDERS, &result);
    Ok(Json(ListAvailableOrdersResponse {
        orders: result?.iter().map(|o| o.to_wire()).collect(),
    }))
}

/// POST /collecting.v1.CollectingService/AcceptOrder
pub async fn accept_order<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<AcceptOrderRequest>,
) -> Result<Json<Order>> {
    let result = match payload {
        Ok(Json(req)) => service.accept_order(&req.order_id, &req.collector_id).await,
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::ACCEPT_ORDER, &result);
    Ok(Json(result?.to_wire()))
}

/// POST /collecting.v1.CollectingService/UpdateOrderStatus
pub async fn update_order_status<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<UpdateOrderStatusRequest>,
) -> Result<Json<Order>> {
    let result = match payload {
        Ok(Json(req)) => {
            service
                .update_status(&req.order_id, &req.status, &req.collector_id)
                .await
        }
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::UPDATE_ORDER_STATUS, &result);
    Ok(Json(result?.to_wire()))
}

/// POST /collecting.v1.CollectingService/GetOrder
pub async fn get_order<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<GetOrderRequest>,
) -> Result<Json<Order>> {
    let result = match payload {
        Ok(Json(req)) => service.get_order(&req.order_id).await,
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::GET_ORDER, &result);
    Ok(Json(result?.to_wire()))
}

/// POST /collecting.v1.CollectingService/CancelOrder
pub async fn cancel_order<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<CancelOrderRequest>,
) -> Result<Json<Order>> {
    let result = match payload {
        Ok(Json(req)) => {
            service
                .cancel_order(&req.order_id, &req.customer_id, &req.reason)
                .await
        }
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::CANCEL_ORDER, &result);
    Ok(Json(result?.to_wire()))
}

/// POST /collecting.v1.CollectingService/ListMyActiveOrders
pub async fn list_my_active_orders<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<ListMyActiveOrdersRequest>,
) -> Result<Json<ListOrdersResponse>> {
    let result = match payload {
        Ok(Json(req)) => service.list_my_active_orders(&req.collector_id).await,
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::LIST_MY_ACTIVE_ORDERS, &result);
    Ok(Json(ListOrdersResponse {
        orders: result?.iter().map(|o| o.to_wire()).collect(),
    }))
}

/// POST /collecting.v1.CollectingService/ListMyOrders
pub async fn list_my_orders<S: OrderStore>(
    State(service): State<Arc<CollectingService<S>>>,
    payload: Payload<ListMyOrdersRequest>,
) -> Result<Json<ListOrdersResponse>> {
    let result = match payload {
        Ok(Json(req)) => service.list_my_orders(req).await,
        Err(rejection) => Err(CollectingError::from(rejection)),
    };
    record(collecting::LIST_MY_ORDERS, &result);
    Ok(Json(ListOrdersResponse {
        orders: result?.iter().map(|o| o.to_wire()).collect(),
    }))
}
