//! Collection tools.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::CollectionCreateData;
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, merge_present, required_str};

const SORT_ORDERS: &[&str] = &[
    "ALPHA_ASC",
    "ALPHA_DESC",
    "BEST_SELLING",
    "CREATED",
    "CREATED_DESC",
    "MANUAL",
    "PRICE_ASC",
    "PRICE_DESC",
];

const RULE_COLUMNS: &[&str] = &[
    "TAG",
    "TITLE",
    "TYPE",
    "VENDOR",
    "VARIANT_PRICE",
    "VARIANT_INVENTORY",
];

const RULE_RELATIONS: &[&str] = &[
    "EQUALS",
    "NOT_EQUALS",
    "CONTAINS",
    "NOT_CONTAINS",
    "STARTS_WITH",
    "ENDS_WITH",
    "GREATER_THAN",
    "LESS_THAN",
];

fn rule_set_schema() -> InputSchema {
    InputSchema::new()
        .field(
            Field::boolean(
                "appliedDisjunctively",
                "Whether products matching any rule are included (true) or \
                 all rules must match (false)",
            )
            .default_value(json!(false)),
        )
        .field(Field::object_array(
            "rules",
            "Membership rules",
            InputSchema::new()
                .field(Field::enumeration("column", "Product attribute", RULE_COLUMNS).required())
                .field(
                    Field::enumeration("relation", "Comparison relation", RULE_RELATIONS)
                        .required(),
                )
                .field(Field::non_empty("condition", "Value to compare against").required()),
        ))
}

pub(super) fn collection_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![Tool::new(
        "create-collection",
        "Create a collection. Provide a ruleSet for a smart collection or \
         productsToAdd for a manual one.",
        "create collection",
        InputSchema::new()
            .field(Field::non_empty("title", "Collection title").required())
            .field(Field::string("descriptionHtml", "Collection description (HTML)"))
            .field(
                Field::enumeration("sortOrder", "Product sort order", SORT_ORDERS)
                    .default_value(json!("BEST_SELLING")),
            )
            .field(Field::object(
                "seo",
                "Search engine listing overrides",
                InputSchema::new()
                    .field(Field::string("title", "SEO title"))
                    .field(Field::string("description", "SEO description")),
            ))
            .field(Field::object(
                "ruleSet",
                "Smart collection membership rules",
                rule_set_schema(),
            ))
            .field(Field::string_array(
                "productsToAdd",
                "Product IDs to add to a manual collection",
            )),
        handler(ctx, create_collection),
    )]
}

async fn create_collection(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let mut collection_input = Map::new();
    collection_input.insert(
        "title".to_string(),
        Value::String(required_str(&input, "title")?.to_string()),
    );
    merge_present(&mut collection_input, "descriptionHtml", &input, "descriptionHtml");
    merge_present(&mut collection_input, "sortOrder", &input, "sortOrder");
    merge_present(&mut collection_input, "seo", &input, "seo");
    merge_present(&mut collection_input, "ruleSet", &input, "ruleSet");

    if let Some(products) = input.get("productsToAdd").and_then(Value::as_array) {
        let qualified: Vec<Value> = products
            .iter()
            .filter_map(Value::as_str)
            .map(|id| Value::String(qualify(ResourceKind::Product, id)))
            .collect();
        collection_input.insert("products".to_string(), Value::Array(qualified));
    }

    let data: CollectionCreateData = request(
        ctx.transport.as_ref(),
        &queries::CREATE_COLLECTION,
        json!({ "input": collection_input }),
    )
    .await?;

    let payload = data
        .collection_create
        .ok_or_else(|| ToolError::Business("empty collectionCreate payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "create collection")?;

    let collection = payload
        .collection
        .ok_or_else(|| ToolError::Business("no collection returned".to_string()))?;

    Ok(json!({ "collection": collection }))
}
