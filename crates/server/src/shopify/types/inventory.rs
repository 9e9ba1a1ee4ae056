//! Inventory and location payload types.
//!
//! An inventory item relates to a location through an inventory level.
//! Activation creates the level, adjustment moves quantities on an
//! existing level, deactivation removes the level; the three remain
//! separate operations because the platform models them as distinct
//! state transitions.

use serde::{Deserialize, Serialize};

use super::common::{Money, NodeList, UserError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships_inventory: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_shipping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Money>,
}

/// Named quantity on an inventory level (e.g. `available`, `on_hand`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityEntry {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub id: String,
    #[serde(default)]
    pub quantities: Vec<QuantityEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<InventoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// One quantity change applied by an adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryChange {
    pub name: String,
    pub delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_after_change: Option<i64>,
}

/// Group of changes produced by `inventoryAdjustQuantities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustmentGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub changes: Vec<InventoryChange>,
}

// Operation payloads.

#[derive(Debug, Deserialize)]
pub struct LocationsData {
    pub locations: NodeList<Location>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemsData {
    pub inventory_items: NodeList<InventoryItem>,
}

/// Inventory levels nested under one location.
#[derive(Debug, Deserialize)]
pub struct LocationLevelsData {
    pub location: Option<LocationWithLevels>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationWithLevels {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub inventory_levels: NodeList<InventoryLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustData {
    pub inventory_adjust_quantities: Option<InventoryAdjustPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustPayload {
    pub inventory_adjustment_group: Option<InventoryAdjustmentGroup>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryActivateData {
    pub inventory_activate: Option<InventoryActivatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryActivatePayload {
    pub inventory_level: Option<InventoryLevel>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDeactivateData {
    pub inventory_deactivate: Option<InventoryDeactivatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDeactivatePayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemUpdateData {
    pub inventory_item_update: Option<InventoryItemUpdatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemUpdatePayload {
    pub inventory_item: Option<InventoryItem>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}
