//! Typed response payloads for Admin API operations.
//!
//! One explicit response shape per GraphQL operation, decoded immediately
//! after the network call so downstream flattening operates on known
//! fields rather than untyped traversal.

mod collection;
mod common;
mod customer;
mod fulfillment;
mod inventory;
mod metafield;
mod order;
mod product;

pub use collection::{
    Collection, CollectionCreateData, CollectionCreatePayload, CollectionRule, CollectionRuleSet,
};
pub use common::{Connection, Edge, MailingAddress, Money, MoneyBag, NodeList, UserError};
pub use customer::{
    Customer, CustomerCreateData, CustomerOrdersData, CustomerPayload, CustomerUpdateData,
    CustomerWithOrders, CustomersData,
};
pub use fulfillment::{
    Fulfillment, FulfillmentCreateData, FulfillmentCreatePayload, TrackingInfo,
};
pub use inventory::{
    InventoryActivateData, InventoryActivatePayload, InventoryAdjustData, InventoryAdjustPayload,
    InventoryAdjustmentGroup, InventoryChange, InventoryDeactivateData, InventoryDeactivatePayload,
    InventoryItem, InventoryItemUpdateData, InventoryItemUpdatePayload, InventoryItemsData,
    InventoryLevel, Location, LocationLevelsData, LocationWithLevels, LocationsData, QuantityEntry,
};
pub use metafield::{Metafield, MetafieldsSetData, MetafieldsSetPayload};
pub use order::{
    LineItem, LineItemVariant, Order, OrderCreateData, OrderCustomer, OrderData, OrderPayload,
    OrderSummary, OrderUpdateData, OrdersData,
};
pub use product::{
    Product, ProductCreateData, ProductCreatePayload, ProductData, ProductImage, ProductSummary,
    ProductVariant, ProductsData, VariantInventoryItem,
};
