//! Collection payload types.

use serde::{Deserialize, Serialize};

use super::common::UserError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_set: Option<CollectionRuleSet>,
}

/// Smart-collection membership rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRuleSet {
    pub applied_disjunctively: bool,
    #[serde(default)]
    pub rules: Vec<CollectionRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRule {
    pub column: String,
    pub relation: String,
    pub condition: String,
}

// Operation payloads.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCreateData {
    pub collection_create: Option<CollectionCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCreatePayload {
    pub collection: Option<Collection>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}
