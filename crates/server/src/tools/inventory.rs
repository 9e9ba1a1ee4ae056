//! Inventory and location tools.
//!
//! The item-location association moves through three states: no
//! relationship, connected, and quantity-tracked. `connect-inventory-to-
//! location` creates the association with an absolute starting quantity,
//! `adjust-inventory` moves an existing quantity by a signed delta, and
//! `disconnect-inventory-from-location` removes the association. The
//! platform rejects an adjustment against a disconnected pair; that
//! rejection surfaces here as a business error.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::{
    InventoryActivateData, InventoryAdjustData, InventoryDeactivateData, InventoryItemUpdateData,
    InventoryItemsData, LocationLevelsData, LocationsData,
};
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, limit, required_str};

pub(super) fn inventory_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![
        Tool::new(
            "get-locations",
            "List the shop's inventory locations.",
            "fetch locations",
            InputSchema::new().field(
                Field::integer_min("limit", "Maximum number of locations to return", 1)
                    .default_value(json!(10)),
            ),
            handler(ctx, get_locations),
        ),
        Tool::new(
            "get-inventory-items",
            "List inventory items, optionally filtered by a search query \
             (e.g. sku:ABC-123).",
            "fetch inventory items",
            InputSchema::new()
                .field(Field::string("query", "Inventory item search query"))
                .field(
                    Field::integer_min("limit", "Maximum number of items to return", 1)
                        .default_value(json!(10)),
                ),
            handler(ctx, get_inventory_items),
        ),
        Tool::new(
            "get-inventory-levels",
            "List inventory levels at a location. Uses the configured \
             default location when locationId is omitted.",
            "fetch inventory levels",
            InputSchema::new()
                .field(Field::non_empty(
                    "locationId",
                    "Location ID (bare token or full gid)",
                ))
                .field(
                    Field::integer_min("limit", "Maximum number of levels to return", 1)
                        .default_value(json!(10)),
                ),
            handler(ctx, get_inventory_levels),
        ),
        Tool::new(
            "adjust-inventory",
            "Adjust available quantity by a signed delta at a location \
             where the item is already stocked.",
            "adjust inventory",
            InputSchema::new()
                .field(Field::non_empty("inventoryItemId", "Inventory item ID").required())
                .field(Field::non_empty("locationId", "Location ID").required())
                .field(
                    Field::integer(
                        "availableDelta",
                        "Quantity change (positive to add, negative to remove)",
                    )
                    .required(),
                )
                .field(
                    Field::string("reason", "Adjustment reason")
                        .default_value(json!("correction")),
                ),
            handler(ctx, adjust_inventory),
        ),
        Tool::new(
            "set-inventory-tracking",
            "Enable or disable quantity tracking for an inventory item.",
            "set inventory tracking",
            InputSchema::new()
                .field(Field::non_empty("inventoryItemId", "Inventory item ID").required())
                .field(Field::boolean("tracked", "Whether to track quantities").required()),
            handler(ctx, set_inventory_tracking),
        ),
        Tool::new(
            "connect-inventory-to-location",
            "Stock an inventory item at a location it is not yet connected \
             to, with an absolute starting quantity.",
            "connect inventory to location",
            InputSchema::new()
                .field(Field::non_empty("inventoryItemId", "Inventory item ID").required())
                .field(Field::non_empty("locationId", "Location ID").required())
                .field(
                    Field::integer_min("available", "Starting available quantity", 0).required(),
                ),
            handler(ctx, connect_inventory),
        ),
        Tool::new(
            "disconnect-inventory-from-location",
            "Remove an item-location association entirely. Takes the \
             inventory level ID returned by connect or by \
             get-inventory-levels.",
            "disconnect inventory from location",
            InputSchema::new().field(
                Field::non_empty("inventoryLevelId", "Inventory level ID").required(),
            ),
            handler(ctx, disconnect_inventory),
        ),
    ]
}

async fn get_locations(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let data: LocationsData = request(
        ctx.transport.as_ref(),
        &queries::GET_LOCATIONS,
        json!({ "first": limit(&input) }),
    )
    .await?;

    Ok(json!({ "locations": data.locations }))
}

async fn get_inventory_items(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let variables = json!({
        "first": limit(&input),
        "query": input.get("query").and_then(Value::as_str),
    });

    let data: InventoryItemsData = request(
        ctx.transport.as_ref(),
        &queries::GET_INVENTORY_ITEMS,
        variables,
    )
    .await?;

    Ok(json!({ "inventoryItems": data.inventory_items }))
}

async fn get_inventory_levels(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let location_id = match input.get("locationId").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => ctx.default_location_id.clone().ok_or_else(|| {
            ToolError::validation(
                "locationId",
                "is required when no default location is configured",
            )
        })?,
    };
    let location_id = qualify(ResourceKind::Location, &location_id);

    let data: LocationLevelsData = request(
        ctx.transport.as_ref(),
        &queries::GET_INVENTORY_LEVELS,
        json!({ "locationId": location_id, "first": limit(&input) }),
    )
    .await?;

    let location = data
        .location
        .ok_or_else(|| ToolError::Business(format!("Location {location_id} not found")))?;

    Ok(json!({
        "location": { "id": location.id, "name": location.name },
        "inventoryLevels": location.inventory_levels,
    }))
}

async fn adjust_inventory(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let item_id = qualify(
        ResourceKind::InventoryItem,
        required_str(&input, "inventoryItemId")?,
    );
    let location_id = qualify(ResourceKind::Location, required_str(&input, "locationId")?);
    let delta = input
        .get("availableDelta")
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolError::validation("availableDelta", "is required"))?;
    let reason = input
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or("correction");

    let variables = json!({
        "input": {
            "reason": reason,
            "name": "available",
            "changes": [{
                "delta": delta,
                "inventoryItemId": item_id,
                "locationId": location_id,
            }],
        }
    });

    let data: InventoryAdjustData = request(
        ctx.transport.as_ref(),
        &queries::ADJUST_INVENTORY,
        variables,
    )
    .await?;

    let payload = data
        .inventory_adjust_quantities
        .ok_or_else(|| ToolError::Business("empty inventoryAdjustQuantities payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "adjust inventory")?;

    let group = payload
        .inventory_adjustment_group
        .ok_or_else(|| ToolError::Business("no adjustment group returned".to_string()))?;

    Ok(json!({ "adjustmentGroup": group }))
}

async fn set_inventory_tracking(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let item_id = qualify(
        ResourceKind::InventoryItem,
        required_str(&input, "inventoryItemId")?,
    );
    let tracked = input
        .get("tracked")
        .and_then(Value::as_bool)
        .ok_or_else(|| ToolError::validation("tracked", "is required"))?;

    let data: InventoryItemUpdateData = request(
        ctx.transport.as_ref(),
        &queries::SET_INVENTORY_TRACKING,
        json!({ "id": item_id, "input": { "tracked": tracked } }),
    )
    .await?;

    let payload = data
        .inventory_item_update
        .ok_or_else(|| ToolError::Business("empty inventoryItemUpdate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "set inventory tracking")?;

    let item = payload
        .inventory_item
        .ok_or_else(|| ToolError::Business("no inventory item returned".to_string()))?;

    Ok(json!({ "inventoryItem": item }))
}

async fn connect_inventory(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let item_id = qualify(
        ResourceKind::InventoryItem,
        required_str(&input, "inventoryItemId")?,
    );
    let location_id = qualify(ResourceKind::Location, required_str(&input, "locationId")?);
    let available = input
        .get("available")
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolError::validation("available", "is required"))?;

    let data: InventoryActivateData = request(
        ctx.transport.as_ref(),
        &queries::ACTIVATE_INVENTORY,
        json!({
            "inventoryItemId": item_id,
            "locationId": location_id,
            "available": available,
        }),
    )
    .await?;

    let payload = data
        .inventory_activate
        .ok_or_else(|| ToolError::Business("empty inventoryActivate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "connect inventory to location")?;

    let level = payload
        .inventory_level
        .ok_or_else(|| ToolError::Business("no inventory level returned".to_string()))?;

    Ok(json!({ "inventoryLevel": level }))
}

async fn disconnect_inventory(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let level_id = qualify(
        ResourceKind::InventoryLevel,
        required_str(&input, "inventoryLevelId")?,
    );

    let data: InventoryDeactivateData = request(
        ctx.transport.as_ref(),
        &queries::DEACTIVATE_INVENTORY,
        json!({ "inventoryLevelId": level_id }),
    )
    .await?;

    let payload = data
        .inventory_deactivate
        .ok_or_else(|| ToolError::Business("empty inventoryDeactivate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "disconnect inventory from location")?;

    Ok(json!({ "success": true }))
}
