//! GraphQL documents for the Admin API.
//!
//! Every tool issues exactly one of these operations. Documents are
//! hand-authored and composed from the reusable fragments below; each
//! static is assembled once on first use.

use std::sync::LazyLock;

// =============================================================================
// Fragments
// =============================================================================

const ADDRESS_FIELDS: &str = "\
fragment AddressFields on MailingAddress {
  address1
  address2
  city
  province
  country
  zip
  firstName
  lastName
  phone
}";

const PRODUCT_SUMMARY_FIELDS: &str = "\
fragment ProductSummaryFields on Product {
  id
  title
  handle
  status
  vendor
  productType
  totalInventory
}";

const VARIANT_FIELDS: &str = "\
fragment VariantFields on ProductVariant {
  id
  title
  price
  sku
  inventoryQuantity
  compareAtPrice
  inventoryItem {
    id
  }
}";

const PRODUCT_FIELDS: &str = "\
fragment ProductFields on Product {
  id
  title
  handle
  status
  descriptionHtml
  vendor
  productType
  tags
  totalInventory
  variants(first: 100) {
    edges {
      node {
        ...VariantFields
      }
    }
  }
  images(first: 20) {
    edges {
      node {
        id
        url
        altText
      }
    }
  }
}";

const CUSTOMER_FIELDS: &str = "\
fragment CustomerFields on Customer {
  id
  firstName
  lastName
  displayName
  email
  phone
  numberOfOrders
  tags
  note
  createdAt
  defaultAddress {
    ...AddressFields
  }
}";

const ORDER_SUMMARY_FIELDS: &str = "\
fragment OrderSummaryFields on Order {
  id
  name
  createdAt
  displayFinancialStatus
  displayFulfillmentStatus
  email
  totalPriceSet {
    shopMoney {
      amount
      currencyCode
    }
  }
}";

const ORDER_FIELDS: &str = "\
fragment OrderFields on Order {
  id
  name
  createdAt
  displayFinancialStatus
  displayFulfillmentStatus
  email
  note
  tags
  totalPriceSet {
    shopMoney {
      amount
      currencyCode
    }
  }
  shippingAddress {
    ...AddressFields
  }
  customer {
    id
    email
  }
  lineItems(first: 100) {
    edges {
      node {
        id
        title
        quantity
        originalUnitPriceSet {
          shopMoney {
            amount
            currencyCode
          }
        }
        variant {
          id
          sku
        }
      }
    }
  }
}";

const LOCATION_FIELDS: &str = "\
fragment LocationFields on Location {
  id
  name
  isActive
  shipsInventory
}";

const INVENTORY_ITEM_FIELDS: &str = "\
fragment InventoryItemFields on InventoryItem {
  id
  sku
  tracked
  requiresShipping
  unitCost {
    amount
    currencyCode
  }
}";

const INVENTORY_LEVEL_FIELDS: &str = "\
fragment InventoryLevelFields on InventoryLevel {
  id
  quantities(names: [\"available\", \"on_hand\"]) {
    name
    quantity
  }
  item {
    ...InventoryItemFields
  }
  location {
    id
    name
  }
}";

const COLLECTION_FIELDS: &str = "\
fragment CollectionFields on Collection {
  id
  title
  handle
  descriptionHtml
  sortOrder
  ruleSet {
    appliedDisjunctively
    rules {
      column
      relation
      condition
    }
  }
}";

const METAFIELD_FIELDS: &str = "\
fragment MetafieldFields on Metafield {
  id
  namespace
  key
  value
  type
}";

const FULFILLMENT_FIELDS: &str = "\
fragment FulfillmentFields on Fulfillment {
  id
  status
  createdAt
  trackingInfo {
    number
    company
    url
  }
}";

/// Join an operation with the fragments it spreads.
fn document(operation: &str, fragments: &[&str]) -> String {
    let mut parts = vec![operation];
    parts.extend_from_slice(fragments);
    parts.join("\n")
}

// =============================================================================
// Product operations
// =============================================================================

pub static GET_PRODUCTS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetProducts($first: Int!, $query: String) {
  products(first: $first, query: $query) {
    edges {
      node {
        ...ProductSummaryFields
      }
    }
  }
}",
        &[PRODUCT_SUMMARY_FIELDS],
    )
});

pub static GET_PRODUCT_BY_ID: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetProduct($id: ID!) {
  product(id: $id) {
    ...ProductFields
  }
}",
        &[PRODUCT_FIELDS, VARIANT_FIELDS],
    )
});

pub static CREATE_PRODUCT: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation ProductCreate($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      ...ProductFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[PRODUCT_FIELDS, VARIANT_FIELDS],
    )
});

// =============================================================================
// Customer operations
// =============================================================================

pub static GET_CUSTOMERS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetCustomers($first: Int!, $query: String) {
  customers(first: $first, query: $query) {
    edges {
      node {
        ...CustomerFields
      }
    }
  }
}",
        &[CUSTOMER_FIELDS, ADDRESS_FIELDS],
    )
});

pub static GET_CUSTOMER_ORDERS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetCustomerOrders($id: ID!, $first: Int!) {
  customer(id: $id) {
    id
    email
    orders(first: $first) {
      edges {
        node {
          ...OrderSummaryFields
        }
      }
    }
  }
}",
        &[ORDER_SUMMARY_FIELDS],
    )
});

pub static CREATE_CUSTOMER: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation CustomerCreate($input: CustomerInput!) {
  customerCreate(input: $input) {
    customer {
      ...CustomerFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[CUSTOMER_FIELDS, ADDRESS_FIELDS],
    )
});

pub static UPDATE_CUSTOMER: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation CustomerUpdate($input: CustomerInput!) {
  customerUpdate(input: $input) {
    customer {
      ...CustomerFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[CUSTOMER_FIELDS, ADDRESS_FIELDS],
    )
});

// =============================================================================
// Order operations
// =============================================================================

pub static GET_ORDERS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetOrders($first: Int!, $query: String) {
  orders(first: $first, query: $query) {
    edges {
      node {
        ...OrderSummaryFields
      }
    }
  }
}",
        &[ORDER_SUMMARY_FIELDS],
    )
});

pub static GET_ORDER_BY_ID: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetOrder($id: ID!) {
  order(id: $id) {
    ...OrderFields
  }
}",
        &[ORDER_FIELDS, ADDRESS_FIELDS],
    )
});

pub static CREATE_ORDER: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation OrderCreate($order: OrderCreateOrderInput!) {
  orderCreate(order: $order) {
    order {
      ...OrderFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[ORDER_FIELDS, ADDRESS_FIELDS],
    )
});

pub static UPDATE_ORDER: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation OrderUpdate($input: OrderInput!) {
  orderUpdate(input: $input) {
    order {
      ...OrderFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[ORDER_FIELDS, ADDRESS_FIELDS],
    )
});

// =============================================================================
// Inventory operations
// =============================================================================

pub static GET_LOCATIONS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetLocations($first: Int!) {
  locations(first: $first) {
    edges {
      node {
        ...LocationFields
      }
    }
  }
}",
        &[LOCATION_FIELDS],
    )
});

pub static GET_INVENTORY_ITEMS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetInventoryItems($first: Int!, $query: String) {
  inventoryItems(first: $first, query: $query) {
    edges {
      node {
        ...InventoryItemFields
      }
    }
  }
}",
        &[INVENTORY_ITEM_FIELDS],
    )
});

pub static GET_INVENTORY_LEVELS: LazyLock<String> = LazyLock::new(|| {
    document(
        "query GetInventoryLevels($locationId: ID!, $first: Int!) {
  location(id: $locationId) {
    id
    name
    inventoryLevels(first: $first) {
      edges {
        node {
          ...InventoryLevelFields
        }
      }
    }
  }
}",
        &[INVENTORY_LEVEL_FIELDS, INVENTORY_ITEM_FIELDS],
    )
});

pub static ADJUST_INVENTORY: LazyLock<String> = LazyLock::new(|| {
    "mutation InventoryAdjustQuantities($input: InventoryAdjustQuantitiesInput!) {
  inventoryAdjustQuantities(input: $input) {
    inventoryAdjustmentGroup {
      reason
      changes {
        name
        delta
        quantityAfterChange
      }
    }
    userErrors {
      field
      message
    }
  }
}"
    .to_string()
});

pub static ACTIVATE_INVENTORY: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation InventoryActivate($inventoryItemId: ID!, $locationId: ID!, $available: Int) {
  inventoryActivate(inventoryItemId: $inventoryItemId, locationId: $locationId, available: $available) {
    inventoryLevel {
      ...InventoryLevelFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[INVENTORY_LEVEL_FIELDS, INVENTORY_ITEM_FIELDS],
    )
});

pub static DEACTIVATE_INVENTORY: LazyLock<String> = LazyLock::new(|| {
    "mutation InventoryDeactivate($inventoryLevelId: ID!) {
  inventoryDeactivate(inventoryLevelId: $inventoryLevelId) {
    userErrors {
      field
      message
    }
  }
}"
    .to_string()
});

pub static SET_INVENTORY_TRACKING: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation InventoryItemUpdate($id: ID!, $input: InventoryItemInput!) {
  inventoryItemUpdate(id: $id, input: $input) {
    inventoryItem {
      ...InventoryItemFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[INVENTORY_ITEM_FIELDS],
    )
});

// =============================================================================
// Collection operations
// =============================================================================

pub static CREATE_COLLECTION: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation CollectionCreate($input: CollectionInput!) {
  collectionCreate(input: $input) {
    collection {
      ...CollectionFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[COLLECTION_FIELDS],
    )
});

// =============================================================================
// Metafield operations
// =============================================================================

pub static SET_METAFIELD: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields {
      ...MetafieldFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[METAFIELD_FIELDS],
    )
});

// =============================================================================
// Fulfillment operations
// =============================================================================

pub static CREATE_FULFILLMENT: LazyLock<String> = LazyLock::new(|| {
    document(
        "mutation FulfillmentCreate($fulfillment: FulfillmentInput!) {
  fulfillmentCreate(fulfillment: $fulfillment) {
    fulfillment {
      ...FulfillmentFields
    }
    userErrors {
      field
      message
    }
  }
}",
        &[FULFILLMENT_FIELDS],
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_carry_their_fragments() {
        assert!(GET_PRODUCT_BY_ID.contains("fragment ProductFields"));
        assert!(GET_PRODUCT_BY_ID.contains("fragment VariantFields"));
        assert!(GET_ORDERS.contains("fragment OrderSummaryFields"));
        assert!(GET_INVENTORY_LEVELS.contains("fragment InventoryItemFields"));
    }

    #[test]
    fn mutations_request_user_errors() {
        for doc in [
            &*CREATE_PRODUCT,
            &*CREATE_CUSTOMER,
            &*UPDATE_CUSTOMER,
            &*CREATE_ORDER,
            &*UPDATE_ORDER,
            &*ADJUST_INVENTORY,
            &*ACTIVATE_INVENTORY,
            &*DEACTIVATE_INVENTORY,
            &*SET_INVENTORY_TRACKING,
            &*CREATE_COLLECTION,
            &*SET_METAFIELD,
            &*CREATE_FULFILLMENT,
        ] {
            assert!(doc.contains("userErrors"), "missing userErrors in: {doc}");
        }
    }
}
