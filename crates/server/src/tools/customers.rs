//! Customer tools.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::{
    CustomerCreateData, CustomerOrdersData, CustomerUpdateData, CustomersData,
};
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, limit, merge_present, required_str};

pub(super) fn customer_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![
        Tool::new(
            "get-customers",
            "Search customers. Accepts the platform's customer search \
             syntax (e.g. email, name, or tag filters).",
            "fetch customers",
            InputSchema::new()
                .field(Field::string("searchQuery", "Customer search query"))
                .field(
                    Field::integer_min("limit", "Maximum number of customers to return", 1)
                        .default_value(json!(10)),
                ),
            handler(ctx, get_customers),
        ),
        Tool::new(
            "get-customer-orders",
            "Get a customer's recent orders.",
            "fetch customer orders",
            InputSchema::new()
                .field(
                    Field::pattern("customerId", "Numeric customer ID", r"^\d+$").required(),
                )
                .field(
                    Field::integer_min("limit", "Maximum number of orders to return", 1)
                        .default_value(json!(10)),
                ),
            handler(ctx, get_customer_orders),
        ),
        Tool::new(
            "create-customer",
            "Create a new customer.",
            "create customer",
            InputSchema::new()
                .field(Field::email("email", "Customer email address").required())
                .field(Field::string("firstName", "First name"))
                .field(Field::string("lastName", "Last name"))
                .field(Field::string("phone", "Phone number"))
                .field(Field::string_array("tags", "Customer tags"))
                .field(Field::string("note", "Note about the customer")),
            handler(ctx, create_customer),
        ),
        Tool::new(
            "update-customer",
            "Update an existing customer. Only the provided fields change.",
            "update customer",
            InputSchema::new()
                .field(Field::pattern("id", "Numeric customer ID", r"^\d+$").required())
                .field(Field::string("firstName", "First name"))
                .field(Field::string("lastName", "Last name"))
                .field(Field::email("email", "Customer email address"))
                .field(Field::string("phone", "Phone number"))
                .field(Field::string_array("tags", "Customer tags (replaces existing)"))
                .field(Field::string("note", "Note about the customer"))
                .field(Field::boolean("taxExempt", "Whether the customer is tax exempt")),
            handler(ctx, update_customer),
        ),
    ]
}

async fn get_customers(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let variables = json!({
        "first": limit(&input),
        "query": input.get("searchQuery").and_then(Value::as_str),
    });

    let data: CustomersData =
        request(ctx.transport.as_ref(), &queries::GET_CUSTOMERS, variables).await?;

    Ok(json!({ "customers": data.customers }))
}

async fn get_customer_orders(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let id = qualify(ResourceKind::Customer, required_str(&input, "customerId")?);

    let data: CustomerOrdersData = request(
        ctx.transport.as_ref(),
        &queries::GET_CUSTOMER_ORDERS,
        json!({ "id": id, "first": limit(&input) }),
    )
    .await?;

    let customer = data
        .customer
        .ok_or_else(|| ToolError::Business(format!("Customer {id} not found")))?;

    Ok(json!({ "customer": { "id": customer.id, "email": customer.email }, "orders": customer.orders }))
}

async fn create_customer(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let mut customer_input = Map::new();
    customer_input.insert(
        "email".to_string(),
        Value::String(required_str(&input, "email")?.to_string()),
    );
    merge_present(&mut customer_input, "firstName", &input, "firstName");
    merge_present(&mut customer_input, "lastName", &input, "lastName");
    merge_present(&mut customer_input, "phone", &input, "phone");
    merge_present(&mut customer_input, "tags", &input, "tags");
    merge_present(&mut customer_input, "note", &input, "note");

    let data: CustomerCreateData = request(
        ctx.transport.as_ref(),
        &queries::CREATE_CUSTOMER,
        json!({ "input": customer_input }),
    )
    .await?;

    let payload = data
        .customer_create
        .ok_or_else(|| ToolError::Business("empty customerCreate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "create customer")?;

    let customer = payload
        .customer
        .ok_or_else(|| ToolError::Business("no customer returned".to_string()))?;

    Ok(json!({ "customer": customer }))
}

async fn update_customer(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let mut customer_input = Map::new();
    customer_input.insert(
        "id".to_string(),
        Value::String(qualify(
            ResourceKind::Customer,
            required_str(&input, "id")?,
        )),
    );
    merge_present(&mut customer_input, "firstName", &input, "firstName");
    merge_present(&mut customer_input, "lastName", &input, "lastName");
    merge_present(&mut customer_input, "email", &input, "email");
    merge_present(&mut customer_input, "phone", &input, "phone");
    merge_present(&mut customer_input, "tags", &input, "tags");
    merge_present(&mut customer_input, "note", &input, "note");
    merge_present(&mut customer_input, "taxExempt", &input, "taxExempt");

    let data: CustomerUpdateData = request(
        ctx.transport.as_ref(),
        &queries::UPDATE_CUSTOMER,
        json!({ "input": customer_input }),
    )
    .await?;

    let payload = data
        .customer_update
        .ok_or_else(|| ToolError::Business("empty customerUpdate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "update customer")?;

    let customer = payload
        .customer
        .ok_or_else(|| ToolError::Business("no customer returned".to_string()))?;

    Ok(json!({ "customer": customer }))
}
