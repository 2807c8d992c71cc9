//! Pickup orders and their status machine.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::ParseEnumError;
use common::collecting::{self, CustomerSnapshot, PickAddress, WasteItem};
use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Status transitions:
/// ```text
/// Created ──► Accepted ──► OnWay ──► Complete
///    │           │           │
///    └───────────┴───────────┴──► Cancelled
/// ```
///
/// The customer may cancel while the order is `Created`; after that only the
/// accepting collector moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by a customer, waiting for a collector.
    #[default]
    Created,

    /// Taken by a collector.
    Accepted,

    /// The collector is travelling to the pickup address.
    OnWay,

    /// Waste collected (terminal state).
    Complete,

    /// Order was cancelled (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order may move from this status to `next`.
    pub fn can_transition(&self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Created => {
                matches!(next, OrderStatus::Accepted | OrderStatus::Cancelled)
            }
            OrderStatus::Accepted => matches!(next, OrderStatus::OnWay | OrderStatus::Cancelled),
            OrderStatus::OnWay => matches!(next, OrderStatus::Complete | OrderStatus::Cancelled),
            OrderStatus::Complete | OrderStatus::Cancelled => false,
        }
    }

    /// Returns true while a collector is working on the order.
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Accepted | OrderStatus::OnWay)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Complete | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Accepted => "accepted",
            OrderStatus::OnWay => "on_way",
            OrderStatus::Complete => "complete",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(OrderStatus::Created),
            "accepted" => Ok(OrderStatus::Accepted),
            "on_way" => Ok(OrderStatus::OnWay),
            "complete" => Ok(OrderStatus::Complete),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ParseEnumError {
                kind: "order status",
                value: other.to_string(),
            }),
        }
    }
}

/// A waste pickup order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub accepted_by: Option<String>,
    pub pick_address: PickAddress,
    pub customer_snapshot: CustomerSnapshot,
    pub items: Vec<WasteItem>,
    pub total_weight: f64,
    pub estimated_price: f64,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    pub version: i64,
}

impl Order {
    /// Builds a freshly placed order at version 1.
    pub fn place(id: String, req: collecting::CreateOrderRequest) -> Self {
        let now = Utc::now();
        Self {
            id,
            customer_id: req.customer_id,
            status: OrderStatus::Created,
            accepted_by: None,
            pick_address: req.pick_address,
            customer_snapshot: req.customer_snapshot,
            items: req.items,
            total_weight: req.total_weight,
            estimated_price: req.estimated_price,
            note: req.note,
            created_at: now,
            updated_at: now,
            accepted_at: None,
            completed_at: None,
            cancel_reason: None,
            version: 1,
        }
    }

    /// Returns true if `collector_id` accepted this order.
    pub fn is_held_by(&self, collector_id: &str) -> bool {
        self.accepted_by.as_deref() == Some(collector_id)
    }

    /// Marks the order accepted by `collector_id`.
    pub fn accept(&mut self, collector_id: &str) {
        let now = Utc::now();
        self.status = OrderStatus::Accepted;
        self.accepted_by = Some(collector_id.to_string());
        self.accepted_at = Some(now);
        self.touch(now);
    }

    /// Moves the order to `next`. Callers check [`OrderStatus::can_transition`] first.
    pub fn advance(&mut self, next: OrderStatus) {
        let now = Utc::now();
        self.status = next;
        if next == OrderStatus::Complete {
            self.completed_at = Some(now);
        }
        self.touch(now);
    }

    /// Cancels the order, keeping the reason when one is given.
    pub fn cancel(&mut self, reason: &str) {
        if !reason.is_empty() {
            self.cancel_reason = Some(reason.to_string());
        }
        self.advance(OrderStatus::Cancelled);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }

    /// Wire representation; an unset collector becomes an empty string.
    pub fn to_wire(&self) -> collecting::Order {
        collecting::Order {
            id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            status: self.status.as_str().to_string(),
            accepted_by: self.accepted_by.clone().unwrap_or_default(),
            pick_address_snapshot: self.pick_address.clone(),
            customer_snapshot: self.customer_snapshot.clone(),
            items: self.items.clone(),
            total_weight: self.total_weight,
            estimated_price: self.estimated_price,
            note: self.note.clone(),
            version: self.version,
        }
    }
}
