//! Tool registry and dispatcher.
//!
//! Maps an external tool name plus a raw argument object to: schema
//! validation, tool execution, and serialization of the flattened result.
//! New tools are added by registration; the dispatch path never changes.

use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use crate::error::{ToolError, wrap_operation};

use super::{
    Tool, ToolContext, collections, customers, fulfillments, inventory, metafields, orders,
    products,
};

/// Registry of every invocable tool, keyed by unique name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Add a tool under its unique name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Configuration`] on a duplicate name; this is a
    /// startup bug and callers treat it as fatal.
    pub fn register(&mut self, tool: Tool) -> Result<(), ToolError> {
        if self.index.contains_key(tool.name()) {
            return Err(ToolError::Configuration(format!(
                "duplicate tool name: {}",
                tool.name()
            )));
        }
        self.index.insert(tool.name(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// All registered tools, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).and_then(|&i| self.tools.get(i))
    }

    /// Invoke a tool by name with a raw argument object.
    ///
    /// Validates the arguments against the tool's schema, runs the handler,
    /// and serializes the flattened result to a JSON string for the wire.
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] for an unregistered name;
    /// [`ToolError::Validation`] when the arguments fail the schema; any
    /// error escaping the handler, re-worded with the operation label.
    #[instrument(skip(self, raw_args), fields(tool = %name))]
    pub async fn invoke(&self, name: &str, raw_args: &Value) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let input = tool.schema().validate(raw_args)?;

        let result = tool
            .run(input)
            .await
            .map_err(|e| wrap_operation(e, tool.operation()))?;

        serde_json::to_string(&result)
            .map_err(|e| ToolError::Configuration(format!("failed to serialize result: {e}")))
    }
}

/// Wire every tool against the given context.
///
/// # Errors
///
/// Returns [`ToolError::Configuration`] if two tools share a name.
pub fn build_registry(ctx: &ToolContext) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::default();

    let all = products::product_tools(ctx)
        .into_iter()
        .chain(customers::customer_tools(ctx))
        .chain(orders::order_tools(ctx))
        .chain(inventory::inventory_tools(ctx))
        .chain(collections::collection_tools(ctx))
        .chain(metafields::metafield_tools(ctx))
        .chain(fulfillments::fulfillment_tools(ctx));

    for tool in all {
        registry.register(tool)?;
    }

    Ok(registry)
}
