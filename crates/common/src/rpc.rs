//! RPC status envelope.
//!
//! Every backend reports a failed call as a JSON [`RpcStatus`] body together with an
//! HTTP status derived from its [`RpcCode`]. Successful calls carry the method's
//! response message instead.

use serde::{Deserialize, Serialize};

/// Canonical failure codes shared by the backends and the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
    PermissionDenied,
    /// A concurrent write won; the caller may re-read and retry.
    Aborted,
    Unavailable,
    Internal,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCode::InvalidArgument => "invalid_argument",
            RpcCode::NotFound => "not_found",
            RpcCode::AlreadyExists => "already_exists",
            RpcCode::FailedPrecondition => "failed_precondition",
            RpcCode::PermissionDenied => "permission_denied",
            RpcCode::Aborted => "aborted",
            RpcCode::Unavailable => "unavailable",
            RpcCode::Internal => "internal",
        }
    }

    /// HTTP status a server answers with for this code.
    pub fn http_status(&self) -> u16 {
        match self {
            RpcCode::InvalidArgument => 400,
            RpcCode::PermissionDenied => 403,
            RpcCode::NotFound => 404,
            RpcCode::AlreadyExists | RpcCode::FailedPrecondition | RpcCode::Aborted => 409,
            RpcCode::Internal => 500,
            RpcCode::Unavailable => 503,
        }
    }

    /// Best-effort code for a response whose body is not an [`RpcStatus`].
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 415 | 422 => RpcCode::InvalidArgument,
            401 | 403 => RpcCode::PermissionDenied,
            404 => RpcCode::NotFound,
            409 => RpcCode::FailedPrecondition,
            502..=504 => RpcCode::Unavailable,
            _ => RpcCode::Internal,
        }
    }
}

impl std::fmt::Display for RpcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body of a failed RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStatus {
    pub code: RpcCode,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Builds the request path of `method` on `service`, e.g.
/// `/account.v1.AccountService/GetUser`.
pub fn method_path(service: &str, method: &str) -> String {
    format!("/{service}/{method}")
}

/// Message for methods that return nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}
