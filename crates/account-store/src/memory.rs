use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{Platform, Role};
use tokio::sync::RwLock;

use crate::{
    Address, AddressRepository, Device, DeviceRepository, NewAddress, Result, RoleRepository,
    StoreError, User, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, User>,
    roles: HashMap<String, Role>,
    addresses: Vec<Address>,
    devices: Vec<Device>,
    next_address_id: i64,
    next_device_id: i64,
}

impl Tables {
    fn require_user(&self, user_id: &str) -> Result<()> {
        if self.users.contains_key(user_id) {
            Ok(())
        } else {
            Err(StoreError::UnknownUser(user_id.to_string()))
        }
    }
}

/// In-memory account store for testing.
///
/// Implements all four repository traits over one set of tables, with the
/// same observable behaviour as the PostgreSQL repositories: full-replace
/// upserts, a single role per user, `(user_id, full_text)` as the address key,
/// and append-only device tokens.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAccountStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Clears all tables.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

#[async_trait]
impl UserRepository for InMemoryAccountStore {
    async fn upsert_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }
}

#[async_trait]
impl RoleRepository for InMemoryAccountStore {
    async fn set_role(&self, user_id: &str, role: Role) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;
        tables.roles.insert(user_id.to_string(), role);
        Ok(())
    }

    async fn list_roles(&self, user_id: &str) -> Result<Vec<Role>> {
        let tables = self.tables.read().await;
        Ok(tables.roles.get(user_id).copied().into_iter().collect())
    }
}

#[async_trait]
impl AddressRepository for InMemoryAccountStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Address>> {
        let tables = self.tables.read().await;
        let mut addresses: Vec<Address> = tables
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        addresses.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(addresses)
    }

    async fn upsert(&self, address: &NewAddress) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(&address.user_id)?;

        if let Some(existing) = tables
            .addresses
            .iter_mut()
            .find(|a| a.user_id == address.user_id && a.full_text == address.full_text)
        {
            existing.label = address.label.clone();
            existing.lat = address.lat;
            existing.lng = address.lng;
            existing.is_default = address.is_default;
            return Ok(());
        }

        tables.next_address_id += 1;
        let id = tables.next_address_id;
        tables.addresses.push(Address {
            id,
            user_id: address.user_id.clone(),
            label: address.label.clone(),
            full_text: address.full_text.clone(),
            lat: address.lat,
            lng: address.lng,
            is_default: address.is_default,
        });
        Ok(())
    }
}

#[async_trait]
impl DeviceRepository for InMemoryAccountStore {
    async fn upsert_token(&self, user_id: &str, token: &str, platform: Platform) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;

        tables.next_device_id += 1;
        let id = tables.next_device_id;
        tables.devices.push(Device {
            id,
            user_id: user_id.to_string(),
            fcm_token: token.to_string(),
            platform,
            last_seen_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_tokens_for_role(&self, role: Role) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .devices
            .iter()
            .filter(|d| tables.roles.get(&d.user_id) == Some(&role))
            .map(|d| d.fcm_token.clone())
            .collect())
    }

    async fn list_devices(&self, user_id: &str) -> Result<Vec<Device>> {
        let tables = self.tables.read().await;
        Ok(tables
            .devices
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_user() -> User {
        User {
            user_id: "uid_demo".to_string(),
            email: Some("demo@example.com".to_string()),
            phone: Some("+84000000000".to_string()),
            display_name: Some("Demo User".to_string()),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn upsert_user_is_idempotent() {
        let store = InMemoryAccountStore::new();
        let user = demo_user();

        store.upsert_user(&user).await.unwrap();
        store.upsert_user(&user).await.unwrap();

        assert_eq!(store.user_count().await, 1);
        assert_eq!(store.get_user("uid_demo").await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn upsert_user_replaces_all_fields() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&demo_user()).await.unwrap();

        let replacement = User {
            display_name: Some("Renamed".to_string()),
            ..User::new("uid_demo")
        };
        store.upsert_user(&replacement).await.unwrap();

        let stored = store.get_user("uid_demo").await.unwrap().unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("Renamed"));
        assert!(stored.email.is_none());
        assert!(stored.phone.is_none());
    }

    #[tokio::test]
    async fn get_missing_user_returns_none() {
        let store = InMemoryAccountStore::new();
        assert!(store.get_user("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_role_replaces_previous_role() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();

        store.set_role("u1", Role::Customer).await.unwrap();
        store.set_role("u1", Role::Collector).await.unwrap();

        assert_eq!(store.list_roles("u1").await.unwrap(), vec![Role::Collector]);
    }

    #[tokio::test]
    async fn list_roles_is_empty_without_assignment() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();
        assert!(store.list_roles("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_role_for_unknown_user_fails() {
        let store = InMemoryAccountStore::new();
        let result = store.set_role("ghost", Role::Admin).await;
        assert!(matches!(result, Err(StoreError::UnknownUser(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn addresses_are_listed_newest_first() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();

        store.upsert(&NewAddress::new("u1", "1 First St")).await.unwrap();
        store.upsert(&NewAddress::new("u1", "2 Second St")).await.unwrap();

        let listed = store.list("u1").await.unwrap();
        let texts: Vec<_> = listed.iter().map(|a| a.full_text.as_str()).collect();
        assert_eq!(texts, vec!["2 Second St", "1 First St"]);
    }

    #[tokio::test]
    async fn address_upsert_updates_in_place_on_same_text() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();

        store
            .upsert(&NewAddress::new("u1", "123 Demo St").with_label("home"))
            .await
            .unwrap();
        store
            .upsert(
                &NewAddress::new("u1", "123 Demo St")
                    .with_label("office")
                    .with_coordinates(10.77, 106.7)
                    .as_default(),
            )
            .await
            .unwrap();

        let listed = store.list("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].label.as_deref(), Some("office"));
        assert_eq!(listed[0].lat, Some(10.77));
        assert!(listed[0].is_default);
    }

    #[tokio::test]
    async fn addresses_of_other_users_are_not_listed() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();
        store.upsert_user(&User::new("u2")).await.unwrap();
        store.upsert(&NewAddress::new("u2", "elsewhere")).await.unwrap();

        assert!(store.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tokens_are_listed_only_for_matching_role() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("collector")).await.unwrap();
        store.upsert_user(&User::new("customer")).await.unwrap();
        store.set_role("collector", Role::Collector).await.unwrap();
        store.set_role("customer", Role::Customer).await.unwrap();

        store
            .upsert_token("collector", "tok1", Platform::Android)
            .await
            .unwrap();
        store
            .upsert_token("customer", "tok2", Platform::Ios)
            .await
            .unwrap();

        assert_eq!(
            store.list_tokens_for_role(Role::Collector).await.unwrap(),
            vec!["tok1".to_string()]
        );
        assert_eq!(
            store.list_tokens_for_role(Role::Customer).await.unwrap(),
            vec!["tok2".to_string()]
        );
    }

    #[tokio::test]
    async fn repeated_token_registration_appends_rows() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();

        store.upsert_token("u1", "tok1", Platform::Web).await.unwrap();
        store.upsert_token("u1", "tok1", Platform::Web).await.unwrap();

        let devices = store.list_devices("u1").await.unwrap();
        assert_eq!(devices.len(), 2);
        assert!(devices[0].last_seen_at <= devices[1].last_seen_at);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryAccountStore::new();
        store.upsert_user(&User::new("u1")).await.unwrap();
        store.clear().await;
        assert_eq!(store.user_count().await, 0);
    }
}
