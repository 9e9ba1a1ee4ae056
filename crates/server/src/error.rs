//! Error taxonomy for the tool invocation pipeline.
//!
//! Four failure classes, kept distinct end to end:
//!
//! - [`ToolError::Validation`] - caller input fails a schema constraint
//! - [`ToolError::Business`] - the platform accepted the request but
//!   rejected it for domain reasons (userErrors, not-found lookups)
//! - [`ToolError::Transport`] - the request never produced a usable
//!   payload (network, HTTP status, malformed body, GraphQL error array)
//! - [`ToolError::Configuration`] - process wiring mistakes, fatal at
//!   startup

use thiserror::Error;

use crate::shopify::types::UserError;

/// Transport-level failures from the GraphQL client.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed at the network layer.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// Authentication failed.
    #[error("unauthorized: invalid or expired access token")]
    Unauthorized,

    /// Response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// GraphQL-level errors array (malformed operation or authorization
    /// failure, not a business condition).
    #[error("GraphQL error: {0}")]
    GraphQL(String),
}

/// Failure of one tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raw input failed schema validation; names the offending field.
    #[error("validation error: field `{field}`: {message}")]
    Validation {
        /// The field that failed.
        field: String,
        /// The constraint that was violated.
        message: String,
    },

    /// Domain-level rejection reported by the platform.
    #[error("{0}")]
    Business(String),

    /// The request never completed cleanly.
    #[error("{0}")]
    Transport(String),

    /// Process wiring mistake (duplicate registration, missing default).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Tool name not present in the registry; a protocol-level error.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl From<TransportError> for ToolError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl ToolError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Fail if the mutation payload carried business errors.
///
/// A non-empty list short-circuits into one aggregated [`ToolError::Business`]
/// before any payload field is touched. Each entry is rendered as
/// `field: message`; hint text keyed off the field path (never off message
/// prose) is appended when it helps the caller correct the input.
///
/// # Errors
///
/// Returns `ToolError::Business` when `errors` is non-empty.
pub fn fail_on_user_errors(errors: &[UserError], operation: &str) -> Result<(), ToolError> {
    if errors.is_empty() {
        return Ok(());
    }

    let detail = errors
        .iter()
        .map(|e| {
            let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
            format!("{field}: {}", e.message)
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut message = format!("Failed to {operation}: {detail}");
    if let Some(hint) = hint_for_fields(errors) {
        message.push_str(" (");
        message.push_str(hint);
        message.push(')');
    }

    Err(ToolError::Business(message))
}

/// Map business-error field paths to a friendlier hint.
fn hint_for_fields(errors: &[UserError]) -> Option<&'static str> {
    let touches = |needle: &str| {
        errors.iter().any(|e| {
            e.field
                .as_ref()
                .is_some_and(|path| path.iter().any(|seg| seg.contains(needle)))
        })
    };

    if touches("variant") {
        Some("check that each variant id exists and is spelled as a bare token or full gid")
    } else if touches("customer") {
        Some("check that the customer id refers to an existing customer")
    } else {
        None
    }
}

/// Re-word an error escaping a tool handler with the operation label.
///
/// The variant is preserved so callers can still distinguish business from
/// transport failures; the message becomes `Failed to <operation>:
/// <original>` with the original text kept verbatim. Messages already
/// carrying the prefix (aggregated user errors) pass through unchanged, as
/// do validation errors, which are worded by the schema layer.
#[must_use]
pub fn wrap_operation(err: ToolError, operation: &str) -> ToolError {
    let prefix = format!("Failed to {operation}");
    match err {
        ToolError::Business(msg) => {
            if msg.starts_with(&prefix) {
                ToolError::Business(msg)
            } else {
                ToolError::Business(format!("{prefix}: {msg}"))
            }
        }
        ToolError::Transport(msg) => ToolError::Transport(format!("{prefix}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_error(field: Option<Vec<&str>>, message: &str) -> UserError {
        UserError {
            field: field.map(|f| f.into_iter().map(String::from).collect()),
            message: message.to_string(),
        }
    }

    #[test]
    fn empty_user_errors_pass() {
        assert!(fail_on_user_errors(&[], "create product").is_ok());
    }

    #[test]
    fn user_errors_aggregate_into_one_failure() {
        let errors = vec![
            user_error(Some(vec!["input", "sku"]), "SKU already taken"),
            user_error(None, "shop is frozen"),
        ];
        let err = fail_on_user_errors(&errors, "create product").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to create product: "));
        assert!(message.contains("input.sku: SKU already taken"));
        assert!(message.contains(": shop is frozen"));
    }

    #[test]
    fn variant_field_gets_hint() {
        let errors = vec![user_error(
            Some(vec!["lineItems", "0", "variantId"]),
            "not found",
        )];
        let err = fail_on_user_errors(&errors, "create order").unwrap_err();
        assert!(err.to_string().contains("variant id"));
    }

    #[test]
    fn wrap_prefixes_once() {
        let once = wrap_operation(ToolError::Business("boom".into()), "get products");
        assert_eq!(once.to_string(), "Failed to get products: boom");
        let twice = wrap_operation(once, "get products");
        assert_eq!(twice.to_string(), "Failed to get products: boom");
    }

    #[test]
    fn wrap_keeps_transport_class() {
        let err = wrap_operation(ToolError::Transport("connection reset".into()), "get orders");
        assert!(matches!(err, ToolError::Transport(_)));
        assert_eq!(err.to_string(), "Failed to get orders: connection reset");
    }

    #[test]
    fn wrap_leaves_validation_untouched() {
        let err = wrap_operation(ToolError::validation("limit", "must be positive"), "x");
        assert!(matches!(err, ToolError::Validation { .. }));
    }
}
