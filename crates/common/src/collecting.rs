//! `collecting.v1.CollectingService` wire messages.

use serde::{Deserialize, Serialize};

pub const SERVICE: &str = "collecting.v1.CollectingService";

pub const CREATE_ORDER: &str = "CreateOrder";
pub const LIST_AVAILABLE_ORDERS: &str = "ListAvailableOrders";
pub const ACCEPT_ORDER: &str = "AcceptOrder";
pub const UPDATE_ORDER_STATUS: &str = "UpdateOrderStatus";
pub const GET_ORDER: &str = "GetOrder";
pub const CANCEL_ORDER: &str = "CancelOrder";
pub const LIST_MY_ACTIVE_ORDERS: &str = "ListMyActiveOrders";
pub const LIST_MY_ORDERS: &str = "ListMyOrders";

/// Where the waste is picked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickAddress {
    pub full_text: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

/// Customer details copied onto the order when it is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub pick_address: PickAddress,
    pub customer_snapshot: CustomerSnapshot,
    #[serde(default)]
    pub items: Vec<WasteItem>,
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default)]
    pub estimated_price: f64,
    #[serde(default)]
    pub note: String,
}

/// An order as reported by the collecting service.
///
/// `accepted_by` is an empty string until a collector accepts the order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub accepted_by: String,
    #[serde(default)]
    pub pick_address_snapshot: PickAddress,
    #[serde(default)]
    pub customer_snapshot: CustomerSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<WasteItem>,
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default)]
    pub estimated_price: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAvailableOrdersRequest {
    #[serde(default)]
    pub limit: i32,
}

/// Empty lists are left off the wire, like [`crate::account::ListAddressesResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListAvailableOrdersResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptOrderRequest {
    pub order_id: String,
    pub collector_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub order_id: String,
    pub status: String,
    pub collector_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOrderRequest {
    pub order_id: String,
}

/// Customer-side cancellation of an order nobody has accepted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: String,
    pub customer_id: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMyActiveOrdersRequest {
    pub collector_id: String,
}

/// `page` is 1-based; `page < 1` means 1 and `size <= 0` means 20.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMyOrdersRequest {
    pub customer_id: String,
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub size: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOrdersResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waste_item_kind_is_named_type_on_the_wire() {
        let item = WasteItem {
            kind: "plastic".to_string(),
            weight: 1.5,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "plastic");
    }

    #[test]
    fn unaccepted_order_omits_accepted_by() {
        let order = Order {
            id: "o1".to_string(),
            customer_id: "c1".to_string(),
            status: "created".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("accepted_by").is_none());

        let decoded: Order = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.accepted_by, "");
    }

    #[test]
    fn list_my_orders_paging_defaults_to_zero() {
        let req: ListMyOrdersRequest = serde_json::from_str(r#"{"customer_id":"c1"}"#).unwrap();
        assert_eq!((req.page, req.size), (0, 0));
    }

    #[test]
    fn missing_orders_field_decodes_empty() {
        let res: ListAvailableOrdersResponse = serde_json::from_str("{}").unwrap();
        assert!(res.orders.is_empty());
    }
}
