//! End-to-end tests for the tool invocation pipeline.
//!
//! Every test drives the real registry against a scripted transport, so
//! validation, identifier qualification, variable building, business-error
//! handling, and payload flattening are all exercised exactly as in
//! production; only the network hop is substituted.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use shophand_server::error::{ToolError, TransportError};
use shophand_server::mcp::McpServer;
use shophand_server::shopify::ShopifyTransport;
use shophand_server::tools::{ToolContext, ToolRegistry, build_registry};

/// Transport double: returns one canned payload (or failure) and records
/// every (document, variables) pair it was asked to execute.
struct MockTransport {
    response: Result<Value, String>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    fn ok(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("lock").clone()
    }

    fn variables(&self, call: usize) -> Value {
        self.calls()
            .get(call)
            .map(|(_, v)| v.clone())
            .expect("call recorded")
    }
}

#[async_trait]
impl ShopifyTransport for MockTransport {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .expect("lock")
            .push((document.to_string(), variables));
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(TransportError::GraphQL(message.clone())),
        }
    }
}

fn registry_with(transport: &Arc<MockTransport>) -> ToolRegistry {
    let ctx = ToolContext {
        transport: Arc::clone(transport) as Arc<dyn ShopifyTransport>,
        default_location_id: None,
    };
    build_registry(&ctx).expect("registry builds")
}

fn parse(result: &str) -> Value {
    serde_json::from_str(result).expect("result is JSON")
}

fn product_payload(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Tide Clock",
        "handle": "tide-clock",
        "status": "ACTIVE",
        "vendor": "Harbor Goods",
        "productType": "Clock",
        "tags": ["coastal"],
        "totalInventory": 4,
        "variants": {"edges": [{"node": {
            "id": "gid://shopify/ProductVariant/9",
            "title": "Default",
            "price": "49.00",
            "sku": "TC-1",
            "inventoryQuantity": 4,
            "inventoryItem": {"id": "gid://shopify/InventoryItem/31"}
        }}]},
        "images": {"edges": []}
    })
}

// =============================================================================
// Lookup scenarios
// =============================================================================

#[tokio::test]
async fn get_product_by_id_qualifies_and_flattens() {
    let transport = MockTransport::ok(json!({
        "product": product_payload("gid://shopify/Product/123")
    }));
    let registry = registry_with(&transport);

    let result = registry
        .invoke("get-product-by-id", &json!({"productId": "123"}))
        .await
        .expect("success");

    // The bare token went out fully qualified.
    assert_eq!(
        transport.variables(0),
        json!({"id": "gid://shopify/Product/123"})
    );

    let value = parse(&result);
    assert_eq!(value["product"]["id"], "gid://shopify/Product/123");
    // Connections are flattened to plain arrays.
    assert_eq!(value["product"]["variants"][0]["sku"], "TC-1");
    assert_eq!(value["product"]["images"], json!([]));
}

#[tokio::test]
async fn get_product_by_id_not_found_is_business_error() {
    let transport = MockTransport::ok(json!({"product": null}));
    let registry = registry_with(&transport);

    let err = registry
        .invoke("get-product-by-id", &json!({"productId": "123"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Business(_)));
    assert!(err.to_string().contains("not found"));
    assert!(err.to_string().starts_with("Failed to fetch product"));
}

#[tokio::test]
async fn already_qualified_id_passes_through_unchanged() {
    let transport = MockTransport::ok(json!({
        "product": product_payload("gid://shopify/Product/123")
    }));
    let registry = registry_with(&transport);

    registry
        .invoke(
            "get-product-by-id",
            &json!({"productId": "gid://shopify/Product/123"}),
        )
        .await
        .expect("success");

    assert_eq!(
        transport.variables(0),
        json!({"id": "gid://shopify/Product/123"})
    );
}

// =============================================================================
// List defaults
// =============================================================================

#[tokio::test]
async fn omitted_limit_matches_explicit_default() {
    let transport = MockTransport::ok(json!({"products": {"edges": []}}));
    let registry = registry_with(&transport);

    registry
        .invoke("get-products", &json!({}))
        .await
        .expect("success");
    registry
        .invoke("get-products", &json!({"limit": 10}))
        .await
        .expect("success");

    let calls = transport.calls();
    assert_eq!(calls[0].1, calls[1].1);
    assert_eq!(calls[0].1["first"], 10);
}

#[tokio::test]
async fn search_title_becomes_query_clause() {
    let transport = MockTransport::ok(json!({"products": {"edges": []}}));
    let registry = registry_with(&transport);

    let result = registry
        .invoke("get-products", &json!({"searchTitle": "clock"}))
        .await
        .expect("success");

    assert_eq!(transport.variables(0)["query"], "title:*clock*");
    assert_eq!(parse(&result)["products"], json!([]));
}

#[tokio::test]
async fn order_filters_conjoin_with_and() {
    let transport = MockTransport::ok(json!({"orders": {"edges": []}}));
    let registry = registry_with(&transport);

    registry
        .invoke(
            "get-orders",
            &json!({"status": "open", "query": "email:a@b.com"}),
        )
        .await
        .expect("success");

    assert_eq!(
        transport.variables(0)["query"],
        "status:open AND email:a@b.com"
    );
}

// =============================================================================
// Mutation scenarios
// =============================================================================

#[tokio::test]
async fn create_product_omits_absent_optional_fields() {
    let transport = MockTransport::ok(json!({
        "productCreate": {
            "product": product_payload("gid://shopify/Product/7"),
            "userErrors": []
        }
    }));
    let registry = registry_with(&transport);

    registry
        .invoke("create-product", &json!({"title": "Tide Clock"}))
        .await
        .expect("success");

    let input = transport.variables(0)["input"].clone();
    assert_eq!(input["title"], "Tide Clock");
    // Declared default applies; everything else is absent, not null.
    assert_eq!(input["status"], "DRAFT");
    let keys: Vec<&String> = input.as_object().expect("object").keys().collect();
    assert!(!keys.iter().any(|k| *k == "descriptionHtml"));
    assert!(!keys.iter().any(|k| *k == "vendor"));
    assert!(!keys.iter().any(|k| *k == "tags"));
}

#[tokio::test]
async fn business_errors_short_circuit_before_payload() {
    // Payload is null alongside userErrors; touching it would panic or
    // produce a bogus result, so the error must come first.
    let transport = MockTransport::ok(json!({
        "productCreate": {
            "product": null,
            "userErrors": [{"field": ["input", "title"], "message": "has already been taken"}]
        }
    }));
    let registry = registry_with(&transport);

    let err = registry
        .invoke("create-product", &json!({"title": "Tide Clock"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Business(_)));
    assert_eq!(
        err.to_string(),
        "Failed to create product: input.title: has already been taken"
    );
}

#[tokio::test]
async fn adjust_inventory_sends_signed_delta_and_returns_reported_quantity() {
    let transport = MockTransport::ok(json!({
        "inventoryAdjustQuantities": {
            "inventoryAdjustmentGroup": {
                "reason": "correction",
                "changes": [{"name": "available", "delta": -3, "quantityAfterChange": 7}]
            },
            "userErrors": []
        }
    }));
    let registry = registry_with(&transport);

    let result = registry
        .invoke(
            "adjust-inventory",
            &json!({"inventoryItemId": "1", "locationId": "2", "availableDelta": -3}),
        )
        .await
        .expect("success");

    let change = transport.variables(0)["input"]["changes"][0].clone();
    assert_eq!(change["inventoryItemId"], "gid://shopify/InventoryItem/1");
    assert_eq!(change["locationId"], "gid://shopify/Location/2");
    assert_eq!(change["delta"], -3);

    // The reported quantity comes from the response, never recomputed.
    let value = parse(&result);
    assert_eq!(
        value["adjustmentGroup"]["changes"][0]["quantityAfterChange"],
        7
    );
}

#[tokio::test]
async fn create_order_parses_encoded_line_items_string() {
    let transport = MockTransport::ok(json!({
        "orderCreate": {
            "order": {
                "id": "gid://shopify/Order/55",
                "name": "#1001",
                "lineItems": {"edges": []}
            },
            "userErrors": []
        }
    }));
    let registry = registry_with(&transport);

    registry
        .invoke(
            "create-order",
            &json!({"lineItems": "[{\"variantId\":\"9\",\"quantity\":2}]"}),
        )
        .await
        .expect("success");

    let line_items = transport.variables(0)["order"]["lineItems"].clone();
    assert_eq!(line_items[0]["variantId"], "gid://shopify/ProductVariant/9");
    assert_eq!(line_items[0]["quantity"], 2);
}

#[tokio::test]
async fn create_order_rejects_malformed_line_items_string() {
    let transport = MockTransport::ok(json!({}));
    let registry = registry_with(&transport);

    let err = registry
        .invoke("create-order", &json!({"lineItems": "not json"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Validation { .. }));
    // Validation failed before any network call.
    assert!(transport.calls().is_empty());
}

// =============================================================================
// Default location resolution
// =============================================================================

#[tokio::test]
async fn inventory_levels_fall_back_to_configured_location() {
    let transport = MockTransport::ok(json!({
        "location": {
            "id": "gid://shopify/Location/77",
            "name": "Warehouse",
            "inventoryLevels": {"edges": []}
        }
    }));
    let ctx = ToolContext {
        transport: Arc::clone(&transport) as Arc<dyn ShopifyTransport>,
        default_location_id: Some("77".to_string()),
    };
    let registry = build_registry(&ctx).expect("registry builds");

    registry
        .invoke("get-inventory-levels", &json!({}))
        .await
        .expect("success");

    assert_eq!(
        transport.variables(0)["locationId"],
        "gid://shopify/Location/77"
    );
}

#[tokio::test]
async fn inventory_levels_without_location_or_default_fail_validation() {
    let transport = MockTransport::ok(json!({}));
    let registry = registry_with(&transport);

    let err = registry
        .invoke("get-inventory-levels", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Validation { .. }));
    assert!(err.to_string().contains("locationId"));
    assert!(transport.calls().is_empty());
}

// =============================================================================
// Error taxonomy at the registry boundary
// =============================================================================

#[tokio::test]
async fn unknown_tool_is_distinct_from_other_failures() {
    let transport = MockTransport::ok(json!({}));
    let registry = registry_with(&transport);

    let err = registry
        .invoke("delete-everything", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::UnknownTool(_)));
}

#[tokio::test]
async fn schema_violation_is_validation_error() {
    let transport = MockTransport::ok(json!({}));
    let registry = registry_with(&transport);

    let err = registry
        .invoke("get-products", &json!({"limit": 0}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Validation { .. }));
    assert!(err.to_string().contains("limit"));
}

#[tokio::test]
async fn transport_failure_is_wrapped_with_operation() {
    let transport = MockTransport::failing("Field 'productz' doesn't exist");
    let registry = registry_with(&transport);

    let err = registry
        .invoke("get-products", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Transport(_)));
    let message = err.to_string();
    assert!(message.starts_with("Failed to fetch products: "));
    assert!(message.contains("Field 'productz' doesn't exist"));
}

// =============================================================================
// Protocol loop
// =============================================================================

#[tokio::test]
async fn tools_list_advertises_all_tools() {
    let transport = MockTransport::ok(json!({}));
    let server = McpServer::new(registry_with(&transport));

    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
        .await
        .expect("response");

    let tools = response["result"]["tools"].as_array().expect("array");
    assert_eq!(tools.len(), 21);
    assert!(tools.iter().any(|t| t["name"] == "get-product-by-id"));
    assert!(
        tools
            .iter()
            .all(|t| t["inputSchema"]["type"] == "object")
    );
}

#[tokio::test]
async fn tools_call_wraps_result_as_text_content() {
    let transport = MockTransport::ok(json!({"products": {"edges": []}}));
    let server = McpServer::new(registry_with(&transport));

    let response = server
        .handle_line(
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get-products","arguments":{}}}"#,
        )
        .await
        .expect("response");

    assert_eq!(response["result"]["isError"], false);
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text");
    assert_eq!(parse(text)["products"], json!([]));
}

#[tokio::test]
async fn tools_call_reports_tool_failure_in_band() {
    let transport = MockTransport::ok(json!({"product": null}));
    let server = McpServer::new(registry_with(&transport));

    let response = server
        .handle_line(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get-product-by-id","arguments":{"productId":"123"}}}"#,
        )
        .await
        .expect("response");

    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text");
    assert!(text.contains("not found"));
}

#[tokio::test]
async fn unknown_tool_is_a_protocol_error() {
    let transport = MockTransport::ok(json!({}));
    let server = McpServer::new(registry_with(&transport));

    let response = server
        .handle_line(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"delete-everything","arguments":{}}}"#,
        )
        .await
        .expect("response");

    assert_eq!(response["error"]["code"], -32602);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn notifications_get_no_response() {
    let transport = MockTransport::ok(json!({}));
    let server = McpServer::new(registry_with(&transport));

    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;

    assert!(response.is_none());
}

#[tokio::test]
async fn unknown_method_and_parse_errors_are_answered() {
    let transport = MockTransport::ok(json!({}));
    let server = McpServer::new(registry_with(&transport));

    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#)
        .await
        .expect("response");
    assert_eq!(response["error"]["code"], -32601);

    let response = server.handle_line("{not json").await.expect("response");
    assert_eq!(response["error"]["code"], -32700);
}
