//! Fulfillment tools.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::FulfillmentCreateData;
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, merge_present, required_str};

pub(super) fn fulfillment_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![Tool::new(
        "create-fulfillment",
        "Fulfill a fulfillment order, optionally for a subset of its line \
         items, with optional tracking details.",
        "create fulfillment",
        InputSchema::new()
            .field(
                Field::non_empty("fulfillmentOrderId", "Fulfillment order ID").required(),
            )
            .field(
                Field::boolean("notifyCustomer", "Send the customer a shipping notification")
                    .default_value(json!(true)),
            )
            .field(Field::object(
                "trackingInfo",
                "Tracking details",
                InputSchema::new()
                    .field(Field::string("number", "Tracking number"))
                    .field(Field::string("company", "Carrier name"))
                    .field(Field::url("url", "Tracking URL")),
            ))
            .field(Field::object_array(
                "lineItems",
                "Subset of fulfillment order line items to fulfill",
                InputSchema::new()
                    .field(Field::non_empty("id", "Fulfillment order line item ID").required())
                    .field(Field::integer_min("quantity", "Quantity to fulfill", 1).required()),
            )),
        handler(ctx, create_fulfillment),
    )]
}

async fn create_fulfillment(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let fulfillment_order_id = qualify(
        ResourceKind::FulfillmentOrder,
        required_str(&input, "fulfillmentOrderId")?,
    );

    let mut by_order = Map::new();
    by_order.insert(
        "fulfillmentOrderId".to_string(),
        Value::String(fulfillment_order_id),
    );
    if let Some(items) = input.get("lineItems").and_then(Value::as_array) {
        let qualified: Vec<Value> = items
            .iter()
            .map(|item| {
                let id = item.get("id").and_then(Value::as_str).unwrap_or_default();
                json!({
                    "id": qualify(ResourceKind::FulfillmentOrderLineItem, id),
                    "quantity": item.get("quantity").cloned().unwrap_or(Value::Null),
                })
            })
            .collect();
        by_order.insert(
            "fulfillmentOrderLineItems".to_string(),
            Value::Array(qualified),
        );
    }

    let mut fulfillment = Map::new();
    fulfillment.insert(
        "lineItemsByFulfillmentOrder".to_string(),
        json!([by_order]),
    );
    merge_present(&mut fulfillment, "notifyCustomer", &input, "notifyCustomer");
    merge_present(&mut fulfillment, "trackingInfo", &input, "trackingInfo");

    let data: FulfillmentCreateData = request(
        ctx.transport.as_ref(),
        &queries::CREATE_FULFILLMENT,
        json!({ "fulfillment": fulfillment }),
    )
    .await?;

    let payload = data
        .fulfillment_create
        .ok_or_else(|| ToolError::Business("empty fulfillmentCreate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "create fulfillment")?;

    let created = payload
        .fulfillment
        .ok_or_else(|| ToolError::Business("no fulfillment returned".to_string()))?;

    Ok(json!({ "fulfillment": created }))
}
