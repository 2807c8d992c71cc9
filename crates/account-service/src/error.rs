//! RPC error type with HTTP response mapping.

use account_store::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{RpcCode, RpcStatus};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failure of an account RPC, reported to the caller as an [`RpcStatus`].
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request was malformed or missing a required field.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The repository call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RpcError {
    pub fn code(&self) -> RpcCode {
        match self {
            RpcError::InvalidArgument(_) => RpcCode::InvalidArgument,
            RpcError::Store(err) => store_error_code(err),
        }
    }

    pub fn status(&self) -> RpcStatus {
        RpcStatus::new(self.code(), self.to_string())
    }
}

fn store_error_code(err: &StoreError) -> RpcCode {
    match err {
        StoreError::UnknownUser(_) => RpcCode::FailedPrecondition,
        StoreError::Database(sqlx::Error::Database(db_err))
            if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation) =>
        {
            RpcCode::FailedPrecondition
        }
        StoreError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
            RpcCode::Unavailable
        }
        _ => RpcCode::Internal,
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.code == RpcCode::Internal {
            tracing::error!(error = %status.message, "internal rpc error");
        }

        let http_status = StatusCode::from_u16(status.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (http_status, axum::Json(status)).into_response()
    }
}

impl From<JsonRejection> for RpcError {
    fn from(rejection: JsonRejection) -> Self {
        RpcError::InvalidArgument(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_maps_to_bad_request() {
        let response = RpcError::InvalidArgument("user_id is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_user_is_failed_precondition() {
        let err = RpcError::from(StoreError::UnknownUser("ghost".into()));
        assert_eq!(err.code(), RpcCode::FailedPrecondition);
        assert_eq!(err.status().message, "Unknown user: ghost");
    }

    #[test]
    fn pool_timeout_is_unavailable() {
        let err = RpcError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.code(), RpcCode::Unavailable);
    }

    #[test]
    fn other_store_errors_are_internal() {
        let err = RpcError::from(StoreError::InvalidColumn {
            column: "role",
            value: "root".into(),
        });
        assert_eq!(err.code(), RpcCode::Internal);
    }
}
