//! Metafield payload types.

use serde::{Deserialize, Serialize};

use super::common::UserError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metafield {
    pub id: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
    /// Metafield value type name (e.g. `single_line_text_field`).
    #[serde(rename = "type")]
    pub value_type: String,
}

// Operation payloads.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldsSetData {
    pub metafields_set: Option<MetafieldsSetPayload>,
}

/// `metafieldsSet` returns the written metafields as a plain list, not a
/// connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldsSetPayload {
    #[serde(default)]
    pub metafields: Vec<Metafield>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}
