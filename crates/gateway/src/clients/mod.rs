//! Backend collaborators used by the resolvers.
//!
//! Resolvers only see the [`AccountBackend`] and [`CollectingBackend`] traits;
//! the HTTP implementations are built once at startup and injected into the
//! schema.

mod account;
mod channel;
mod collecting;

use std::sync::Arc;

use async_trait::async_trait;
use common::account::{Address, User};
use common::collecting::{CreateOrderRequest, Order};
use common::{Platform, Role};

pub use account::AccountClient;
pub use channel::RpcChannel;
pub use collecting::CollectingClient;

use crate::error::BackendError;

/// Operations of the account service.
///
/// Covers the whole `account.v1.AccountService` contract. The schema only
/// resolves through the reads; the writes are used to seed accounts.
#[async_trait]
pub trait AccountBackend: Send + Sync {
    /// `None` when the user has no profile.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, BackendError>;

    async fn upsert_user(&self, user: &User) -> Result<(), BackendError>;

    async fn set_role(&self, user_id: &str, role: Role) -> Result<(), BackendError>;

    /// Addresses newest first; an omitted list decodes as empty.
    async fn list_addresses(&self, user_id: &str) -> Result<Vec<Address>, BackendError>;

    async fn upsert_device_token(
        &self,
        user_id: &str,
        token: &str,
        platform: Platform,
    ) -> Result<(), BackendError>;
}

/// Operations of the collecting service.
#[async_trait]
pub trait CollectingBackend: Send + Sync {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, BackendError>;

    /// Orders waiting for a collector; an omitted list decodes as empty.
    async fn list_available_orders(&self, limit: i32) -> Result<Vec<Order>, BackendError>;

    async fn accept_order(&self, order_id: &str, collector_id: &str)
    -> Result<Order, BackendError>;

    async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
        collector_id: &str,
    ) -> Result<Order, BackendError>;
}

/// Both backends, as handed to the schema.
#[derive(Clone)]
pub struct Backends {
    pub account: Arc<dyn AccountBackend>,
    pub collecting: Arc<dyn CollectingBackend>,
}

impl Backends {
    /// HTTP clients for both services sharing one connection pool.
    pub fn connect(account_addr: &str, collect_addr: &str) -> Self {
        let http = reqwest::Client::new();
        Self {
            account: Arc::new(AccountClient::new(http.clone(), account_addr)),
            collecting: Arc::new(CollectingClient::new(http, collect_addr)),
        }
    }
}
