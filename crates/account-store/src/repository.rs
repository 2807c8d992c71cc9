use async_trait::async_trait;
use common::{Platform, Role};

use crate::{Address, Device, NewAddress, Result, User};

/// Read/write access to user profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user, or replaces every profile field of an existing one.
    ///
    /// Fields left as `None` are stored as null; this is a full replace, not a
    /// patch.
    async fn upsert_user(&self, user: &User) -> Result<()>;

    /// Returns the user with this id, or `None` if there is none.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}

/// Role assignments. A user holds at most one role.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Assigns `role`, replacing any role the user already had.
    async fn set_role(&self, user_id: &str, role: Role) -> Result<()>;

    /// Returns the roles currently assigned: zero or one entries.
    async fn list_roles(&self, user_id: &str) -> Result<Vec<Role>>;
}

/// Postal addresses owned by users.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Returns the user's addresses, most recently inserted first.
    async fn list(&self, user_id: &str) -> Result<Vec<Address>>;

    /// Inserts the address, or updates label, text, coordinates and default
    /// flag of the row with the same `(user_id, full_text)`.
    async fn upsert(&self, address: &NewAddress) -> Result<()>;
}

/// Push-notification tokens.
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Records a token seen now. Always appends a row, even for a token the
    /// user already registered.
    async fn upsert_token(&self, user_id: &str, token: &str, platform: Platform) -> Result<()>;

    /// Returns the tokens of every user holding `role`, in no particular order.
    async fn list_tokens_for_role(&self, role: Role) -> Result<Vec<String>>;

    /// Returns the user's device rows, oldest first.
    async fn list_devices(&self, user_id: &str) -> Result<Vec<Device>>;
}
