//! Order payload types.

use serde::{Deserialize, Serialize};

use super::common::{MailingAddress, MoneyBag, NodeList, UserError};

/// Order fields returned by list queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_financial_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_fulfillment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price_set: Option<MoneyBag>,
}

/// Full order shape returned by lookups and mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_financial_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_fulfillment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price_set: Option<MoneyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<MailingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<OrderCustomer>,
    #[serde(default)]
    pub line_items: NodeList<LineItem>,
}

/// Customer reference carried on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCustomer {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_unit_price_set: Option<MoneyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<LineItemVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemVariant {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

// Operation payloads.

#[derive(Debug, Deserialize)]
pub struct OrdersData {
    pub orders: NodeList<OrderSummary>,
}

#[derive(Debug, Deserialize)]
pub struct OrderData {
    pub order: Option<Order>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateData {
    pub order_create: Option<OrderPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateData {
    pub order_update: Option<OrderPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub order: Option<Order>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}
