//! Account entities as stored.

use chrono::{DateTime, Utc};
use common::Platform;

/// A user profile keyed by an externally assigned id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub user_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    /// A user with only the id set.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

/// A stored address.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: i64,
    pub user_id: String,
    pub label: Option<String>,
    pub full_text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub is_default: bool,
}

/// Input of an address upsert. `(user_id, full_text)` identifies the row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAddress {
    pub user_id: String,
    pub label: Option<String>,
    pub full_text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub is_default: bool,
}

impl NewAddress {
    pub fn new(user_id: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            full_text: full_text.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// A registered push token.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: i64,
    pub user_id: String,
    pub fcm_token: String,
    pub platform: Platform,
    pub last_seen_at: DateTime<Utc>,
}
