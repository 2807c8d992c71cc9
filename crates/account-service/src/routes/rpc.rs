//! `account.v1.AccountService` method handlers.
//!
//! Each handler decodes the JSON request message, delegates to
//! [`AccountService`], and encodes the response message. Undecodable bodies
//! are answered with `invalid_argument`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use common::Empty;
use common::account::{
    self, GetUserRequest, GetUserResponse, ListAddressesRequest, ListAddressesResponse,
    SetRoleRequest, UpsertDeviceTokenRequest, User,
};

use crate::error::RpcError;
use crate::service::AccountService;

type Payload<T> = Result<Json<T>, JsonRejection>;

fn record<T>(method: &'static str, result: &Result<T, RpcError>) {
    metrics::counter!("account_rpc_requests_total", "method" => method).increment(1);
    if let Err(e) = result {
        metrics::counter!("account_rpc_failures_total", "method" => method, "code" => e.code().as_str())
            .increment(1);
        tracing::warn!(method, error = %e, "account rpc failed");
    }
}

/// POST /account.v1.AccountService/GetUser
pub async fn get_user(
    State(service): State<Arc<AccountService>>,
    payload: Payload<GetUserRequest>,
) -> Result<Json<GetUserResponse>, RpcError> {
    let result = match payload {
        Ok(Json(req)) => service.get_user(req).await,
        Err(rejection) => Err(RpcError::from(rejection)),
    };
    record(account::GET_USER, &result);
    Ok(Json(result?))
}

/// POST /account.v1.AccountService/UpsertUser
pub async fn upsert_user(
    State(service): State<Arc<AccountService>>,
    payload: Payload<User>,
) -> Result<Json<Empty>, RpcError> {
    let result = match payload {
        Ok(Json(req)) => service.upsert_user(req).await,
        Err(rejection) => Err(RpcError::from(rejection)),
    };
    record(account::UPSERT_USER, &result);
    Ok(Json(result?))
}

/// POST /account.v1.AccountService/SetRole
pub async fn set_role(
    State(service): State<Arc<AccountService>>,
    payload: Payload<SetRoleRequest>,
) -> Result<Json<Empty>, RpcError> {
    let result = match payload {
        Ok(Json(req)) => service.set_role(req).await,
        Err(rejection) => Err(RpcError::from(rejection)),
    };
    record(account::SET_ROLE, &result);
    Ok(Json(result?))
}

/// POST /account.v1.AccountService/ListAddresses
pub async fn list_addresses(
    State(service): State<Arc<AccountService>>,
    payload: Payload<ListAddressesRequest>,
) -> Result<Json<ListAddressesResponse>, RpcError> {
    let result = match payload {
        Ok(Json(req)) => service.list_addresses(req).await,
        Err(rejection) => Err(RpcError::from(rejection)),
    };
    record(account::LIST_ADDRESSES, &result);
    Ok(Json(result?))
}

/// POST /account.v1.AccountService/UpsertDeviceToken
pub async fn upsert_device_token(
    State(service): State<Arc<AccountService>>,
    payload: Payload<UpsertDeviceTokenRequest>,
) -> Result<Json<Empty>, RpcError> {
    let result = match payload {
        Ok(Json(req)) => service.upsert_device_token(req).await,
        Err(rejection) => Err(RpcError::from(rejection)),
    };
    record(account::UPSERT_DEVICE_TOKEN, &result);
    Ok(Json(result?))
}
