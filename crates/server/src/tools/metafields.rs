//! Metafield tools.

use serde_json::{Map, Value, json};
use shophand_core::{ResourceKind, qualify};

use crate::error::{ToolError, fail_on_user_errors};
use crate::schema::{Field, InputSchema};
use crate::shopify::types::MetafieldsSetData;
use crate::shopify::{queries, request};

use super::{Tool, ToolContext, handler, required_str};

const OWNER_TYPES: &[&str] = &[
    "PRODUCT",
    "PRODUCTVARIANT",
    "CUSTOMER",
    "ORDER",
    "COLLECTION",
    "LOCATION",
];

pub(super) fn metafield_tools(ctx: &ToolContext) -> Vec<Tool> {
    vec![Tool::new(
        "create-metafield",
        "Write a metafield on a resource. The owner id is qualified \
         according to ownerType.",
        "create metafield",
        InputSchema::new()
            .field(Field::non_empty("ownerId", "Owning resource ID").required())
            .field(Field::non_empty("namespace", "Metafield namespace").required())
            .field(Field::non_empty("key", "Metafield key").required())
            .field(Field::string("value", "Metafield value").required())
            .field(
                Field::non_empty(
                    "type",
                    "Metafield value type (e.g. single_line_text_field)",
                )
                .required(),
            )
            .field(
                Field::enumeration("ownerType", "Owning resource type", OWNER_TYPES)
                    .default_value(json!("PRODUCT")),
            ),
        handler(ctx, create_metafield),
    )]
}

async fn create_metafield(
    ctx: ToolContext,
    input: Map<String, Value>,
) -> Result<Value, ToolError> {
    let owner_type = input
        .get("ownerType")
        .and_then(Value::as_str)
        .unwrap_or("PRODUCT");
    let kind = ResourceKind::from_owner_type(owner_type)
        .ok_or_else(|| ToolError::validation("ownerType", "is not a supported owner type"))?;
    let owner_id = qualify(kind, required_str(&input, "ownerId")?);

    let variables = json!({
        "metafields": [{
            "ownerId": owner_id,
            "namespace": required_str(&input, "namespace")?,
            "key": required_str(&input, "key")?,
            "value": required_str(&input, "value")?,
            "type": required_str(&input, "type")?,
        }]
    });

    let data: MetafieldsSetData = request(
        ctx.transport.as_ref(),
        &queries::SET_METAFIELD,
        variables,
    )
    .await?;

    let payload = data
        .metafields_set
        .ok_or_else(|| ToolError::Business("empty metafieldsSet payload".to_string()))?;
    fail_on_user_errors(&payload.user_errors, "create metafield")?;

    let metafield = payload
        .metafields
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::Business("no metafield returned".to_string()))?;

    Ok(json!({ "metafield": metafield }))
}
