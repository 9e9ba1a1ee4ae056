//! MCP server loop over stdio.
//!
//! Newline-delimited JSON-RPC 2.0: one message per line on stdin, one
//! response per line on stdout. Logging goes to stderr so the protocol
//! stream stays clean. A malformed line or unknown method produces an
//! error response without ending the loop.

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::tools::ToolRegistry;

pub mod protocol;

use protocol::{
    INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION, error, success, tool_result,
};

/// The MCP-facing server: a registry behind a JSON-RPC dispatch loop.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    #[must_use]
    pub const fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve requests from stdin until EOF.
    ///
    /// # Errors
    ///
    /// Returns an error only when stdio itself fails; protocol-level
    /// problems are answered in-band.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut payload = response.to_string();
                payload.push('\n');
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle one raw message; `None` means no response (a notification).
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return Some(error(&Value::Null, PARSE_ERROR, &format!("parse error: {e}")));
            }
        };

        if request.jsonrpc != "2.0" {
            return request.id.as_ref().map(|id| {
                error(id, INVALID_REQUEST, "jsonrpc must be \"2.0\"")
            });
        }

        let Some(id) = request.id else {
            // Notifications get no response.
            debug!(method = %request.method, "notification");
            return None;
        };

        Some(self.handle_request(&id, &request.method, &request.params).await)
    }

    async fn handle_request(&self, id: &Value, method: &str, params: &Value) -> Value {
        match method {
            "initialize" => success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": "shophand",
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            ),
            "ping" => success(id, json!({})),
            "tools/list" => {
                let tools: Vec<Value> = self
                    .registry
                    .iter()
                    .map(|tool| {
                        json!({
                            "name": tool.name(),
                            "description": tool.description(),
                            "inputSchema": tool.schema().to_json_schema(),
                        })
                    })
                    .collect();
                success(id, json!({ "tools": tools }))
            }
            "tools/call" => self.handle_tool_call(id, params).await,
            _ => error(id, METHOD_NOT_FOUND, &format!("unknown method: {method}")),
        }
    }

    async fn handle_tool_call(&self, id: &Value, params: &Value) -> Value {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return error(id, INVALID_PARAMS, "tools/call requires a tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.registry.invoke(name, &arguments).await {
            Ok(text) => success(id, tool_result(text, false)),
            // An unknown tool is a protocol error, not a tool failure.
            Err(ToolError::UnknownTool(name)) => {
                error(id, INVALID_PARAMS, &format!("unknown tool: {name}"))
            }
            Err(e) => success(id, tool_result(e.to_string(), true)),
        }
    }
}
