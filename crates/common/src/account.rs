//! `account.v1.AccountService` wire messages.

use serde::{Deserialize, Serialize};

use crate::types::{Platform, Role};

pub const SERVICE: &str = "account.v1.AccountService";

pub const GET_USER: &str = "GetUser";
pub const UPSERT_USER: &str = "UpsertUser";
pub const SET_ROLE: &str = "SetRole";
pub const LIST_ADDRESSES: &str = "ListAddresses";
pub const UPSERT_DEVICE_TOKEN: &str = "UpsertDeviceToken";

/// A user profile. Only `user_id` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub user_id: String,
}

/// `user` is `None` when no profile exists for the requested id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetUserResponse {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRoleRequest {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAddressesRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub full_text: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub is_default: bool,
}

/// Empty lists are left off the wire, so readers must treat a missing
/// `addresses` field as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListAddressesResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertDeviceTokenRequest {
    pub user_id: String,
    pub token: String,
    pub platform: Platform,
}
