//! Mapping between the public schema and the backends' wire messages.
//!
//! Optional gateway inputs are always filled with concrete defaults (`0` for
//! numbers, `""` for strings) before they reach a backend.

use async_graphql::ID;
use common::{account, collecting};

use crate::schema::types::{Address, CreateOrderInput, Order, User};

/// Page size forwarded when `availableOrders` is called without `limit`.
pub const DEFAULT_AVAILABLE_ORDERS_LIMIT: i32 = 10;

/// Nests the flat `createOrder` input into the collecting service's request.
pub fn create_order_request(input: CreateOrderInput) -> collecting::CreateOrderRequest {
    collecting::CreateOrderRequest {
        customer_id: input.customer_id.0,
        pick_address: collecting::PickAddress {
            full_text: input.full_text,
            lat: input.lat.unwrap_or(0.0),
            lng: input.lng.unwrap_or(0.0),
        },
        customer_snapshot: collecting::CustomerSnapshot {
            display_name: input.display_name.unwrap_or_default(),
            phone: input.phone.unwrap_or_default(),
        },
        items: Vec::new(),
        total_weight: 0.0,
        estimated_price: 0.0,
        note: input.note.unwrap_or_default(),
    }
}

pub fn available_orders_limit(limit: Option<i32>) -> i32 {
    limit.unwrap_or(DEFAULT_AVAILABLE_ORDERS_LIMIT)
}

pub fn user(wire: account::User) -> User {
    User {
        user_id: ID(wire.user_id),
        email: wire.email,
        phone: wire.phone,
        display_name: wire.display_name,
        avatar_url: wire.avatar_url,
    }
}

pub fn address(wire: account::Address) -> Address {
    Address {
        id: ID(wire.id.to_string()),
        full_text: wire.full_text,
        lat: wire.lat,
        lng: wire.lng,
        is_default: Some(wire.is_default),
    }
}

pub fn order(wire: collecting::Order) -> Order {
    Order {
        id: ID(wire.id),
        status: wire.status,
        customer_id: ID(wire.customer_id),
        accepted_by: Some(wire.accepted_by).filter(|c| !c.is_empty()),
        note: Some(wire.note),
    }
}
