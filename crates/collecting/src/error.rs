//! Collecting service errors with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{RpcCode, RpcStatus};
use thiserror::Error;

use crate::order::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum CollectingError {
    /// The request was malformed or missing a required field.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No order with this id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// An order with this id already exists.
    #[error("Order already exists: {0}")]
    DuplicateOrder(String),

    /// Another collector took the order first.
    #[error("Order already taken: {0}")]
    AlreadyTaken(String),

    /// The collector still has an accepted or on-the-way order.
    #[error("Collector {0} already has an active order")]
    CollectorBusy(String),

    /// Only the accepting collector may update the order.
    #[error("Collector {collector_id} does not hold order {order_id}")]
    NotOwner {
        order_id: String,
        collector_id: String,
    },

    /// The status change is not allowed.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Only the customer who placed the order may cancel it.
    #[error("Customer {customer_id} did not place order {order_id}")]
    NotCustomer {
        order_id: String,
        customer_id: String,
    },

    /// A collector already accepted the order.
    #[error("Order {order_id} cannot be cancelled once {status}")]
    CannotCancel {
        order_id: String,
        status: OrderStatus,
    },

    /// The order changed between read and write.
    #[error("Concurrency conflict for order {order_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        order_id: String,
        expected: i64,
        actual: i64,
    },
}

impl CollectingError {
    pub fn code(&self) -> RpcCode {
        match self {
            CollectingError::InvalidArgument(_) => RpcCode::InvalidArgument,
            CollectingError::OrderNotFound(_) => RpcCode::NotFound,
            CollectingError::DuplicateOrder(_) => RpcCode::AlreadyExists,
            CollectingError::AlreadyTaken(_)
            | CollectingError::CollectorBusy(_)
            | CollectingError::InvalidTransition { .. }
            | CollectingError::CannotCancel { .. } => RpcCode::FailedPrecondition,
            CollectingError::NotOwner { .. } | CollectingError::NotCustomer { .. } => {
                RpcCode::PermissionDenied
            }
            CollectingError::ConcurrencyConflict { .. } => RpcCode::Aborted,
        }
    }
}

impl IntoResponse for CollectingError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status =
            StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(RpcStatus::new(code, self.to_string()))).into_response()
    }
}

impl From<JsonRejection> for CollectingError {
    fn from(rejection: JsonRejection) -> Self {
        CollectingError::InvalidArgument(rejection.body_text())
    }
}

/// Convenience type alias for collecting results.
pub type Result<T> = std::result::Result<T, CollectingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_aborted() {
        let err = CollectingError::ConcurrencyConflict {
            order_id: "o1".to_string(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.code(), RpcCode::Aborted);
        assert_eq!(
            err.to_string(),
            "Concurrency conflict for order o1: expected version 2, found 3"
        );
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_cancel_errors() {
        let not_customer = CollectingError::NotCustomer {
            order_id: "o1".to_string(),
            customer_id: "c2".to_string(),
        };
        assert_eq!(not_customer.code(), RpcCode::PermissionDenied);

        let late = CollectingError::CannotCancel {
            order_id: "o1".to_string(),
            status: OrderStatus::Accepted,
        };
        assert_eq!(late.code(), RpcCode::FailedPrecondition);
        assert_eq!(late.to_string(), "Order o1 cannot be cancelled once accepted");
    }
}
