//! Server configuration resolved from command-line flags and environment.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE_DOMAIN` - Store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2025-01)
//! - `SHOPIFY_DEFAULT_LOCATION_ID` - Location used by inventory reads when
//!   the caller does not name one
//!
//! Each variable has a matching command-line flag that takes precedence.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Admin API version requested when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-01";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {0}: {1}")]
    Invalid(&'static str, String),
}

/// Resolved server configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ServerConfig {
    /// Store domain (e.g., your-store.myshopify.com).
    pub store_domain: String,
    /// Admin API version (e.g., 2025-01).
    pub api_version: String,
    /// Admin API access token (HIGH PRIVILEGE - full store access).
    pub access_token: SecretString,
    /// Location consulted by inventory reads when the caller omits one.
    pub default_location_id: Option<String>,
}

impl ServerConfig {
    /// Build and validate a configuration from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the domain or token is missing or the
    /// domain does not look like a bare hostname.
    pub fn new(
        store_domain: Option<String>,
        access_token: Option<String>,
        api_version: Option<String>,
        default_location_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let store_domain = store_domain
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::Missing("SHOPIFY_STORE_DOMAIN"))?;

        if store_domain.contains("://") || store_domain.contains('/') {
            return Err(ConfigError::Invalid(
                "SHOPIFY_STORE_DOMAIN",
                format!("expected a bare hostname, got `{store_domain}`"),
            ));
        }

        let access_token = access_token
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("SHOPIFY_ACCESS_TOKEN"))?;

        let api_version = api_version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            store_domain,
            api_version,
            access_token: access_token.into(),
            default_location_id: default_location_id.filter(|l| !l.is_empty()),
        })
    }

    /// The GraphQL endpoint this configuration points at.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.store_domain, self.api_version
        )
    }

    /// Expose the access token for the transport header.
    #[must_use]
    pub fn token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("default_location_id", &self.default_location_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let config = ServerConfig::new(
            Some("demo.myshopify.com".into()),
            Some("shpat_test".into()),
            None,
            None,
        )
        .expect("valid config");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(
            config.endpoint(),
            format!("https://demo.myshopify.com/admin/api/{DEFAULT_API_VERSION}/graphql.json")
        );
    }

    #[test]
    fn rejects_missing_credentials() {
        assert!(matches!(
            ServerConfig::new(None, Some("t".into()), None, None),
            Err(ConfigError::Missing("SHOPIFY_STORE_DOMAIN"))
        ));
        assert!(matches!(
            ServerConfig::new(Some("demo.myshopify.com".into()), None, None, None),
            Err(ConfigError::Missing("SHOPIFY_ACCESS_TOKEN"))
        ));
    }

    #[test]
    fn rejects_domain_with_scheme() {
        let err = ServerConfig::new(
            Some("https://demo.myshopify.com".into()),
            Some("t".into()),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("SHOPIFY_STORE_DOMAIN", _)));
    }

    #[test]
    fn debug_redacts_token() {
        let config = ServerConfig::new(
            Some("demo.myshopify.com".into()),
            Some("shpat_secret".into()),
            None,
            None,
        )
        .expect("valid config");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("shpat_secret"));
    }
}
