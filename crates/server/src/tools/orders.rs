//! Order tools.
//!
//! `create-order` tolerates line items arriving as a JSON-encoded string
//! (some protocol clients double-encode nested arrays); the string is
//! deserialized and a bare object is wrapped into a one-element list
//! before per-item validation runs.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::{OrderCreateData, OrderData, OrderUpdateData, OrdersData};
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, limit, merge_present, required_str, search_query};

fn address_schema() -> InputSchema {
    InputSchema::new()
        .field(Field::string("address1", "Street address"))
        .field(Field::string("address2", "Apartment, suite, etc."))
        .field(Field::string("city", "City"))
        .field(Field::string("provinceCode", "Province or state code"))
        .field(Field::string("countryCode", "Country code (ISO 3166-1 alpha-2)"))
        .field(Field::string("zip", "Postal/ZIP code"))
        .field(Field::string("firstName", "First name"))
        .field(Field::string("lastName", "Last name"))
        .field(Field::string("phone", "Phone number"))
}

pub(super) fn order_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![
        Tool::new(
            "get-orders",
            "List orders, optionally filtered by status and a search query.",
            "fetch orders",
            InputSchema::new()
                .field(Field::enumeration(
                    "status",
                    "Order status filter",
                    &["any", "open", "closed", "cancelled"],
                ))
                .field(Field::string("query", "Additional search clause"))
                .field(
                    Field::integer_min("limit", "Maximum number of orders to return", 1)
                        .default_value(json!(10)),
                ),
            handler(ctx, get_orders),
        ),
        Tool::new(
            "get-order-by-id",
            "Get a single order by ID, including its line items.",
            "fetch order",
            InputSchema::new().field(
                Field::non_empty("orderId", "Order ID (bare token or full gid)").required(),
            ),
            handler(ctx, get_order_by_id),
        ),
        Tool::new(
            "create-order",
            "Create an order from variant line items. Each line item needs \
             a variantId and a positive quantity.",
            "create order",
            InputSchema::new()
                .field(
                    Field::json(
                        "lineItems",
                        "Line items: array of {variantId, quantity}; a JSON-encoded \
                         string is also accepted",
                    )
                    .required(),
                )
                .field(Field::email("email", "Customer email for the order"))
                .field(Field::non_empty("customerId", "Existing customer to attach"))
                .field(Field::string("note", "Order note"))
                .field(Field::string_array("tags", "Order tags"))
                .field(Field::object(
                    "shippingAddress",
                    "Shipping address",
                    address_schema(),
                )),
            handler(ctx, create_order),
        ),
        Tool::new(
            "update-order",
            "Update an existing order. Only the provided fields change.",
            "update order",
            InputSchema::new()
                .field(Field::non_empty("id", "Order ID (bare token or full gid)").required())
                .field(Field::string("note", "Order note"))
                .field(Field::email("email", "Contact email"))
                .field(Field::string_array("tags", "Order tags (replaces existing)"))
                .field(Field::object(
                    "shippingAddress",
                    "Shipping address",
                    address_schema(),
                )),
            handler(ctx, update_order),
        ),
    ]
}

async fn get_orders(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let mut clauses = Vec::new();
    if let Some(status) = input.get("status").and_then(Value::as_str)
        && status != "any"
    {
        clauses.push(format!("status:{status}"));
    }
    if let Some(query) = input.get("query").and_then(Value::as_str) {
        clauses.push(query.to_string());
    }

    let variables = json!({
        "first": limit(&input),
        "query": search_query(clauses),
    });

    let data: OrdersData =
        request(ctx.transport.as_ref(), &queries::GET_ORDERS, variables).await?;

    Ok(json!({ "orders": data.orders }))
}

async fn get_order_by_id(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let id = qualify(ResourceKind::Order, required_str(&input, "orderId")?);

    let data: OrderData = request(
        ctx.transport.as_ref(),
        &queries::GET_ORDER_BY_ID,
        json!({ "id": id }),
    )
    .await?;

    let order = data
        .order
        .ok_or_else(|| ToolError::Business(format!("Order {id} not found")))?;

    Ok(json!({ "order": order }))
}

/// Normalize the `lineItems` argument into validated line-item inputs.
///
/// Accepts an array of objects, a single object, or a JSON-encoded string
/// holding either. Every item must carry a non-empty `variantId` and a
/// strictly positive integer `quantity`.
fn normalize_line_items(raw: &Value) -> Result<Vec<Value>, ToolError> {
    let parsed;
    let value = match raw {
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s).map_err(|e| {
                ToolError::validation("lineItems", format!("must be valid JSON: {e}"))
            })?;
            &parsed
        }
        other => other,
    };

    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => {
            return Err(ToolError::validation(
                "lineItems",
                "must be an array of line items",
            ));
        }
    };

    if items.is_empty() {
        return Err(ToolError::validation("lineItems", "must not be empty"));
    }

    let mut normalized = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(ToolError::validation(
                format!("lineItems[{i}]"),
                "expected an object",
            ));
        };

        let variant_id = object
            .get("variantId")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ToolError::validation(
                    format!("lineItems[{i}].variantId"),
                    "is required and must be a non-empty string",
                )
            })?;

        let quantity = object
            .get("quantity")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                ToolError::validation(format!("lineItems[{i}].quantity"), "must be an integer")
            })?;
        if quantity < 1 {
            return Err(ToolError::validation(
                format!("lineItems[{i}].quantity"),
                "must be a positive integer",
            ));
        }

        normalized.push(json!({
            "variantId": qualify(ResourceKind::ProductVariant, variant_id),
            "quantity": quantity,
        }));
    }

    Ok(normalized)
}

async fn create_order(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let line_items = normalize_line_items(
        input
            .get("lineItems")
            .ok_or_else(|| ToolError::validation("lineItems", "is required"))?,
    )?;

    let mut order_input = Map::new();
    order_input.insert("lineItems".to_string(), Value::Array(line_items));
    merge_present(&mut order_input, "email", &input, "email");
    merge_present(&mut order_input, "note", &input, "note");
    merge_present(&mut order_input, "tags", &input, "tags");
    merge_present(&mut order_input, "shippingAddress", &input, "shippingAddress");
    if let Some(customer_id) = input.get("customerId").and_then(Value::as_str) {
        order_input.insert(
            "customerId".to_string(),
            Value::String(qualify(ResourceKind::Customer, customer_id)),
        );
    }

    let data: OrderCreateData = request(
        ctx.transport.as_ref(),
        &queries::CREATE_ORDER,
        json!({ "order": order_input }),
    )
    .await?;

    let payload = data
        .order_create
        .ok_or_else(|| ToolError::Business("empty orderCreate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "create order")?;

    let order = payload
        .order
        .ok_or_else(|| ToolError::Business("no order returned".to_string()))?;

    Ok(json!({ "order": order }))
}

async fn update_order(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let mut order_input = Map::new();
    order_input.insert(
        "id".to_string(),
        Value::String(qualify(ResourceKind::Order, required_str(&input, "id")?)),
    );
    merge_present(&mut order_input, "note", &input, "note");
    merge_present(&mut order_input, "email", &input, "email");
    merge_present(&mut order_input, "tags", &input, "tags");
    merge_present(&mut order_input, "shippingAddress", &input, "shippingAddress");

    let data: OrderUpdateData = request(
        ctx.transport.as_ref(),
        &queries::UPDATE_ORDER,
        json!({ "input": order_input }),
    )
    .await?;

    let payload = data
        .order_update
        .ok_or_else(|| ToolError::Business("empty orderUpdate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "update order")?;

    let order = payload
        .order
        .ok_or_else(|| ToolError::Business("no order returned".to_string()))?;

    Ok(json!({ "order": order }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_items_accept_encoded_string() {
        let raw = json!(r#"[{"variantId":"9","quantity":2}]"#);
        let items = normalize_line_items(&raw).expect("valid");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["variantId"], "gid://shopify/ProductVariant/9");
        assert_eq!(items[0]["quantity"], 2);
    }

    #[test]
    fn single_object_is_wrapped() {
        let raw = json!({"variantId": "9", "quantity": 1});
        let items = normalize_line_items(&raw).expect("valid");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn malformed_string_is_validation_error() {
        let err = normalize_line_items(&json!("not json")).unwrap_err();
        assert!(matches!(err, ToolError::Validation { .. }));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let raw = json!([{"variantId": "9", "quantity": 0}]);
        let err = normalize_line_items(&raw).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn missing_variant_is_rejected() {
        let raw = json!([{"quantity": 3}]);
        let err = normalize_line_items(&raw).unwrap_err();
        assert!(err.to_string().contains("variantId"));
    }
}
