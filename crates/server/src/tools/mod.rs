//! Tool units and the registry/dispatcher.
//!
//! A tool pairs a declared input schema with an async handler. Handlers
//! receive input that has already passed validation (defaults applied,
//! unknown fields dropped) and perform exactly one round trip through the
//! shared transport: build variables with qualified identifiers, execute,
//! check business errors, flatten the payload.

mod collections;
mod customers;
mod fulfillments;
mod inventory;
mod metafields;
mod orders;
mod products;
mod registry;

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

pub use registry::{ToolRegistry, build_registry};

use crate::error::ToolError;
use crate::schema::InputSchema;
use crate::shopify::ShopifyTransport;

/// Dependencies injected into every tool at registration time.
#[derive(Clone)]
pub struct ToolContext {
    /// The shared transport; read-only after construction.
    pub transport: Arc<dyn ShopifyTransport>,
    /// Location consulted by inventory reads when the caller omits one.
    pub default_location_id: Option<String>,
}

type ToolHandler =
    Box<dyn Fn(Map<String, Value>) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// One named, independently invocable tool.
pub struct Tool {
    name: &'static str,
    description: &'static str,
    /// Label used in `Failed to <operation>` failure messages.
    operation: &'static str,
    schema: InputSchema,
    handler: ToolHandler,
}

impl Tool {
    fn new(
        name: &'static str,
        description: &'static str,
        operation: &'static str,
        schema: InputSchema,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name,
            description,
            operation,
            schema,
            handler,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    #[must_use]
    pub const fn schema(&self) -> &InputSchema {
        &self.schema
    }

    pub(crate) async fn run(&self, input: Map<String, Value>) -> Result<Value, ToolError> {
        (self.handler)(input).await
    }
}

/// Box an async handler function, giving it a clone of the context per call.
fn handler<F, Fut>(ctx: &ToolContext, f: F) -> ToolHandler
where
    F: Fn(ToolContext, Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
{
    let ctx = ctx.clone();
    Box::new(move |input| Box::pin(f(ctx.clone(), input)))
}

// =============================================================================
// Shared handler helpers
// =============================================================================

/// Fetch a string argument the schema marked required.
fn required_str<'a>(input: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::validation(key, "is required"))
}

/// The validated result-count limit (schemas default it to 10).
fn limit(input: &Map<String, Value>) -> i64 {
    input.get("limit").and_then(Value::as_i64).unwrap_or(10)
}

/// Conjoin filter clauses into one platform search string.
fn search_query(clauses: Vec<String>) -> Option<String> {
    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}

/// Copy an input field into a variables object under a new key, only when
/// the caller supplied it. Absent fields stay absent; no explicit nulls.
fn merge_present(
    variables: &mut Map<String, Value>,
    key: &str,
    input: &Map<String, Value>,
    field: &str,
) {
    if let Some(value) = input.get(field) {
        variables.insert(key.to_string(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_conjoins_with_and() {
        assert_eq!(search_query(vec![]), None);
        assert_eq!(
            search_query(vec!["status:open".into(), "financial_status:paid".into()]),
            Some("status:open AND financial_status:paid".into())
        );
    }

    #[test]
    fn merge_present_skips_absent_fields() {
        let mut variables = Map::new();
        let mut input = Map::new();
        input.insert("note".to_string(), Value::String("hi".into()));

        merge_present(&mut variables, "note", &input, "note");
        merge_present(&mut variables, "email", &input, "email");

        assert_eq!(variables.get("note"), Some(&Value::String("hi".into())));
        assert!(!variables.contains_key("email"));
    }
}
