//! Shared payload types: money, addresses, business errors, and the
//! paginated edge/node wrapper.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Money in shop currency, as returned inside `*Set` price fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    pub shop_money: Money,
}

/// Mailing address as returned on orders and customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Field-level business error reported inside a mutation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the input field the platform rejected.
    pub field: Option<Vec<String>>,
    /// Human-readable rejection reason.
    pub message: String,
}

/// One entry of a paginated connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Paginated connection wrapper `{edges: [{node: T}]}`.
///
/// `edges` defaults to empty so an absent list decodes to no entries
/// rather than an error.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Strip the edge/node wrappers, preserving order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

/// A list-valued field that arrives as a connection and leaves as a plain
/// ordered array.
///
/// Deserializes from `{edges: [{node: T}]}` (empty or absent edges become
/// an empty list) and serializes as `[T]`, so flattened results never
/// expose pagination wrappers.
#[derive(Debug, Clone)]
pub struct NodeList<T>(pub Vec<T>);

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> NodeList<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for NodeList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let connection = Connection::<T>::deserialize(deserializer)?;
        Ok(Self(connection.into_nodes()))
    }
}

impl<T: Serialize> Serialize for NodeList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn connection_round_trips_nodes_in_order() {
        let nodes = vec![1, 2, 3];
        let wire = json!({
            "edges": nodes.iter().map(|n| json!({"node": n})).collect::<Vec<_>>()
        });
        let connection: Connection<i64> = serde_json::from_value(wire).expect("decode");
        assert_eq!(connection.into_nodes(), nodes);
    }

    #[test]
    fn empty_edges_yield_empty_list() {
        let connection: Connection<i64> =
            serde_json::from_value(json!({"edges": []})).expect("decode");
        assert!(connection.into_nodes().is_empty());
    }

    #[test]
    fn absent_edges_yield_empty_list() {
        let connection: Connection<i64> = serde_json::from_value(json!({})).expect("decode");
        assert!(connection.into_nodes().is_empty());
    }

    #[test]
    fn node_list_decodes_connection_and_serializes_flat() {
        let list: NodeList<String> = serde_json::from_value(json!({
            "edges": [{"node": "a"}, {"node": "b"}]
        }))
        .expect("decode");
        assert_eq!(serde_json::to_value(&list).expect("encode"), json!(["a", "b"]));
    }
}
