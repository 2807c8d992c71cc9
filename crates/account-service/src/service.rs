//! Account domain service: one repository call per RPC.

use std::sync::Arc;

use account_store::{
    AddressRepository, Database, DeviceRepository, InMemoryAccountStore, PgAddressRepository,
    PgDeviceRepository, PgRoleRepository, PgUserRepository, RoleRepository, UserRepository,
};
use common::Empty;
use common::account::{
    Address, GetUserRequest, GetUserResponse, ListAddressesRequest, ListAddressesResponse,
    SetRoleRequest, UpsertDeviceTokenRequest, User,
};

use crate::error::RpcError;

/// Orchestrates the account repositories behind the RPC surface.
///
/// Holds no state of its own. Each operation makes exactly one repository call
/// and surfaces its failure without retrying.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    addresses: Arc<dyn AddressRepository>,
    devices: Arc<dyn DeviceRepository>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        addresses: Arc<dyn AddressRepository>,
        devices: Arc<dyn DeviceRepository>,
    ) -> Self {
        Self {
            users,
            roles,
            addresses,
            devices,
        }
    }

    /// Service backed by the PostgreSQL repositories sharing one pool.
    pub fn with_postgres(db: Database) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(db.clone())),
            Arc::new(PgRoleRepository::new(db.clone())),
            Arc::new(PgAddressRepository::new(db.clone())),
            Arc::new(PgDeviceRepository::new(db)),
        )
    }

    /// Service backed by a single in-memory store.
    pub fn in_memory(store: InMemoryAccountStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, req: GetUserRequest) -> Result<GetUserResponse, RpcError> {
        let user = self.users.get_user(&req.user_id).await?;
        Ok(GetUserResponse {
            user: user.map(user_to_wire),
        })
    }

    #[tracing::instrument(skip(self, req), fields(user_id = %req.user_id))]
    pub async fn upsert_user(&self, req: User) -> Result<Empty, RpcError> {
        require("user_id", &req.user_id)?;
        self.users.upsert_user(&user_from_wire(req)).await?;
        Ok(Empty {})
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_role(&self, req: SetRoleRequest) -> Result<Empty, RpcError> {
        require("user_id", &req.user_id)?;
        self.roles.set_role(&req.user_id, req.role).await?;
        Ok(Empty {})
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_addresses(
        &self,
        req: ListAddressesRequest,
    ) -> Result<ListAddressesResponse, RpcError> {
        let addresses = self.addresses.list(&req.user_id).await?;
        Ok(ListAddressesResponse {
            addresses: addresses.into_iter().map(address_to_wire).collect(),
        })
    }

    #[tracing::instrument(skip(self, req), fields(user_id = %req.user_id, platform = %req.platform))]
    pub async fn upsert_device_token(
        &self,
        req: UpsertDeviceTokenRequest,
    ) -> Result<Empty, RpcError> {
        require("user_id", &req.user_id)?;
        require("token", &req.token)?;
        self.devices
            .upsert_token(&req.user_id, &req.token, req.platform)
            .await?;
        Ok(Empty {})
    }
}

fn require(field: &str, value: &str) -> Result<(), RpcError> {
    if value.trim().is_empty() {
        return Err(RpcError::InvalidArgument(format!("{field} is required")));
    }
    Ok(())
}

fn user_to_wire(user: account_store::User) -> User {
    User {
        user_id: user.user_id,
        email: user.email,
        phone: user.phone,
        display_name: user.display_name,
        avatar_url: user.avatar_url,
    }
}

fn user_from_wire(user: User) -> account_store::User {
    account_store::User {
        user_id: user.user_id,
        email: user.email,
        phone: user.phone,
        display_name: user.display_name,
        avatar_url: user.avatar_url,
    }
}

fn address_to_wire(address: account_store::Address) -> Address {
    Address {
        id: address.id,
        user_id: address.user_id,
        label: address.label,
        full_text: address.full_text,
        lat: address.lat,
        lng: address.lng,
        is_default: address.is_default,
    }
}
