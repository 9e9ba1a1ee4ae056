//! Product tools.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::{ProductCreateData, ProductData, ProductsData};
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, limit, merge_present, required_str, search_query};

pub(super) fn product_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![
        Tool::new(
            "get-products",
            "Search products by title. Returns a list of products with \
             their handle, status, vendor, and inventory totals.",
            "fetch products",
            InputSchema::new()
                .field(Field::string("searchTitle", "Filter products by title"))
                .field(
                    Field::integer_min("limit", "Maximum number of products to return", 1)
                        .default_value(json!(10)),
                ),
            handler(ctx, get_products),
        ),
        Tool::new(
            "get-product-by-id",
            "Get a single product by ID, including its variants and images.",
            "fetch product",
            InputSchema::new().field(
                Field::non_empty("productId", "Product ID (bare token or full gid)").required(),
            ),
            handler(ctx, get_product_by_id),
        ),
        Tool::new(
            "create-product",
            "Create a new product. Defaults to DRAFT status until published.",
            "create product",
            InputSchema::new()
                .field(Field::non_empty("title", "Product title").required())
                .field(Field::string("descriptionHtml", "Product description (HTML)"))
                .field(Field::string("vendor", "Vendor name"))
                .field(Field::string("productType", "Product type/category"))
                .field(Field::string_array("tags", "Product tags"))
                .field(
                    Field::enumeration(
                        "status",
                        "Product status",
                        &["ACTIVE", "DRAFT", "ARCHIVED"],
                    )
                    .default_value(json!("DRAFT")),
                ),
            handler(ctx, create_product),
        ),
    ]
}

async fn get_products(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let mut clauses = Vec::new();
    if let Some(title) = input.get("searchTitle").and_then(Value::as_str) {
        clauses.push(format!("title:*{title}*"));
    }

    let variables = json!({
        "first": limit(&input),
        "query": search_query(clauses),
    });

    let data: ProductsData =
        request(ctx.transport.as_ref(), &queries::GET_PRODUCTS, variables).await?;

    Ok(json!({ "products": data.products }))
}

async fn get_product_by_id(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let id = qualify(ResourceKind::Product, required_str(&input, "productId")?);

    let data: ProductData = request(
        ctx.transport.as_ref(),
        &queries::GET_PRODUCT_BY_ID,
        json!({ "id": id }),
    )
    .await?;

    let product = data
        .product
        .ok_or_else(|| ToolError::Business(format!("Product {id} not found")))?;

    Ok(json!({ "product": product }))
}

async fn create_product(ctx: ToolContext, input: Map<String, Value>) -> Result<Value, ToolError> {
    let mut product_input = Map::new();
    product_input.insert(
        "title".to_string(),
        Value::String(required_str(&input, "title")?.to_string()),
    );
    merge_present(&mut product_input, "descriptionHtml", &input, "descriptionHtml");
    merge_present(&mut product_input, "vendor", &input, "vendor");
    merge_present(&mut product_input, "productType", &input, "productType");
    merge_present(&mut product_input, "tags", &input, "tags");
    merge_present(&mut product_input, "status", &input, "status");

    let data: ProductCreateData = request(
        ctx.transport.as_ref(),
        &queries::CREATE_PRODUCT,
        json!({ "input": product_input }),
    )
    .await?;

    let payload = data
        .product_create
        .ok_or_else(|| ToolError::Business("empty productCreate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "create product")?;

    let product = payload
        .product
        .ok_or_else(|| ToolError::Business("no product returned".to_string()))?;

    Ok(json!({ "product": product }))
}
