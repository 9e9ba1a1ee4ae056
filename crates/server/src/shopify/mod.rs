//! Shopify Admin API GraphQL transport.
//!
//! One [`AdminClient`] is constructed at process start from configuration
//! and shared, read-only, across all tool invocations. Tools depend on the
//! narrow [`ShopifyTransport`] capability rather than the concrete client,
//! which keeps initialization order structural and lets tests substitute a
//! scripted transport.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::config::ServerConfig;
use crate::error::TransportError;

pub mod queries;
pub mod types;

/// The single operation tools are allowed to perform against the store.
#[async_trait]
pub trait ShopifyTransport: Send + Sync {
    /// Execute one GraphQL document with variables and return the decoded
    /// `data` payload.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure, non-success status,
    /// a malformed body, or a GraphQL-level error array.
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, TransportError>;
}

/// Execute a document and decode the payload into a typed response.
///
/// # Errors
///
/// Returns [`TransportError::Malformed`] when the payload does not match
/// the expected operation shape, or any error from the underlying call.
pub async fn request<T: DeserializeOwned>(
    transport: &dyn ShopifyTransport,
    document: &str,
    variables: Value,
) -> Result<T, TransportError> {
    let data = transport.execute(document, variables).await?;
    serde_json::from_value(data).map_err(|e| TransportError::Malformed(e.to_string()))
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

/// Shopify Admin API GraphQL client.
///
/// Holds the endpoint and auth header resolved from configuration and a
/// single `reqwest::Client`. Performs exactly one HTTPS POST per call; no
/// retry, no batching, no caching.
pub struct AdminClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    /// Create the process-wide client from configuration.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint(),
            access_token: config.token().to_string(),
        }
    }
}

#[async_trait]
impl ShopifyTransport for AdminClient {
    #[instrument(skip(self, variables), fields(endpoint = %self.endpoint))]
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, TransportError> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TransportError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQLResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(TransportError::GraphQL(joined));
        }

        envelope
            .data
            .ok_or_else(|| TransportError::Malformed("no data in response".to_string()))
    }
}
