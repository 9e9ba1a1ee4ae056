//! Shopify global-id handling.
//!
//! The Admin API addresses every resource by a fully qualified global id
//! of the form `gid://shopify/<ResourceType>/<token>`. Callers routinely
//! supply bare numeric tokens instead, so every id crossing the wire goes
//! through [`qualify`] first.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Scheme prefix shared by all Shopify global ids.
const GID_PREFIX: &str = "gid://";

/// Resource types addressable through the Admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Product,
    ProductVariant,
    Customer,
    Order,
    InventoryItem,
    InventoryLevel,
    Location,
    Collection,
    Fulfillment,
    FulfillmentOrder,
    FulfillmentOrderLineItem,
    Metafield,
}

impl ResourceKind {
    /// The type segment as it appears inside a global id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::ProductVariant => "ProductVariant",
            Self::Customer => "Customer",
            Self::Order => "Order",
            Self::InventoryItem => "InventoryItem",
            Self::InventoryLevel => "InventoryLevel",
            Self::Location => "Location",
            Self::Collection => "Collection",
            Self::Fulfillment => "Fulfillment",
            Self::FulfillmentOrder => "FulfillmentOrder",
            Self::FulfillmentOrderLineItem => "FulfillmentOrderLineItem",
            Self::Metafield => "Metafield",
        }
    }

    /// Map a metafield owner type name (e.g. `"PRODUCT"`) to the kind that
    /// qualifies its owner id. Unrecognized names return `None`.
    #[must_use]
    pub fn from_owner_type(owner_type: &str) -> Option<Self> {
        match owner_type {
            "PRODUCT" => Some(Self::Product),
            "PRODUCTVARIANT" | "PRODUCT_VARIANT" => Some(Self::ProductVariant),
            "CUSTOMER" => Some(Self::Customer),
            "ORDER" => Some(Self::Order),
            "COLLECTION" => Some(Self::Collection),
            "LOCATION" => Some(Self::Location),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualify an id into global-id form.
///
/// An id that already carries the `gid://` scheme is returned unchanged,
/// whatever resource type it encodes, which makes this function idempotent.
/// Empty ids are a caller error and are rejected by schema validation
/// before reaching this point.
#[must_use]
pub fn qualify(kind: ResourceKind, id: &str) -> String {
    if id.starts_with(GID_PREFIX) {
        id.to_owned()
    } else {
        format!("gid://shopify/{}/{id}", kind.as_str())
    }
}

/// Extract the trailing token from a global id.
///
/// Returns the substring after the last `/`; an id without separators is
/// returned whole.
#[must_use]
pub fn extract_token(global_id: &str) -> &str {
    global_id
        .rsplit_once('/')
        .map_or(global_id, |(_, token)| token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifies_bare_token() {
        assert_eq!(
            qualify(ResourceKind::Product, "123"),
            "gid://shopify/Product/123"
        );
        assert_eq!(
            qualify(ResourceKind::InventoryItem, "99"),
            "gid://shopify/InventoryItem/99"
        );
    }

    #[test]
    fn qualification_is_idempotent() {
        let once = qualify(ResourceKind::Order, "456");
        let twice = qualify(ResourceKind::Order, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn leaves_foreign_gid_untouched() {
        // Already-qualified ids pass through even if the type differs.
        let gid = "gid://shopify/Location/7";
        assert_eq!(qualify(ResourceKind::InventoryItem, gid), gid);
    }

    #[test]
    fn extracts_trailing_token() {
        assert_eq!(extract_token("gid://shopify/Product/123"), "123");
        assert_eq!(extract_token("123"), "123");
    }

    #[test]
    fn owner_type_mapping() {
        assert_eq!(
            ResourceKind::from_owner_type("PRODUCT"),
            Some(ResourceKind::Product)
        );
        assert_eq!(ResourceKind::from_owner_type("SHOP"), None);
    }
}
