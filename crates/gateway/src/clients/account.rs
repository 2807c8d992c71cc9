use async_trait::async_trait;
use common::account::{
    self, Address, GetUserRequest, GetUserResponse, ListAddressesRequest, ListAddressesResponse,
    SetRoleRequest, UpsertDeviceTokenRequest, User,
};
use common::{Empty, Platform, Role};

use super::{AccountBackend, RpcChannel};
use crate::error::BackendError;

/// HTTP client for `account.v1.AccountService`.
#[derive(Debug, Clone)]
pub struct AccountClient {
    channel: RpcChannel,
}

impl AccountClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            channel: RpcChannel::new(http, base_url, account::SERVICE, "account"),
        }
    }
}

#[async_trait]
impl AccountBackend for AccountClient {
    #[tracing::instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, BackendError> {
        let res: GetUserResponse = self
            .channel
            .call(
                account::GET_USER,
                &GetUserRequest {
                    user_id: user_id.to_string(),
                },
            )
            .await?;
        Ok(res.user)
    }

    #[tracing::instrument(skip(self, user), fields(user_id = %user.user_id))]
    async fn upsert_user(&self, user: &User) -> Result<(), BackendError> {
        let _: Empty = self.channel.call(account::UPSERT_USER, user).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn set_role(&self, user_id: &str, role: Role) -> Result<(), BackendError> {
        let req = SetRoleRequest {
            user_id: user_id.to_string(),
            role,
        };
        let _: Empty = self.channel.call(account::SET_ROLE, &req).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_addresses(&self, user_id: &str) -> Result<Vec<Address>, BackendError> {
        let res: ListAddressesResponse = self
            .channel
            .call(
                account::LIST_ADDRESSES,
                &ListAddressesRequest {
                    user_id: user_id.to_string(),
                },
            )
            .await?;
        Ok(res.addresses)
    }

    #[tracing::instrument(skip(self, token))]
    async fn upsert_device_token(
        &self,
        user_id: &str,
        token: &str,
        platform: Platform,
    ) -> Result<(), BackendError> {
        let req = UpsertDeviceTokenRequest {
            user_id: user_id.to_string(),
            token: token.to_string(),
            platform,
        };
        let _: Empty = self.channel.call(account::UPSERT_DEVICE_TOKEN, &req).await?;
        Ok(())
    }
}
