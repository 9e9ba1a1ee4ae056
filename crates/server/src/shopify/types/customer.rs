//! Customer payload types.

use serde::{Deserialize, Serialize};

use super::common::{MailingAddress, NodeList, UserError};
use super::order::OrderSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Lifetime order count, returned by the API as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_orders: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_address: Option<MailingAddress>,
}

/// Customer with their recent orders, for the order-history lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerWithOrders {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub orders: NodeList<OrderSummary>,
}

// Operation payloads.

#[derive(Debug, Deserialize)]
pub struct CustomersData {
    pub customers: NodeList<Customer>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerOrdersData {
    pub customer: Option<CustomerWithOrders>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreateData {
    pub customer_create: Option<CustomerPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateData {
    pub customer_update: Option<CustomerPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub customer: Option<Customer>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}
