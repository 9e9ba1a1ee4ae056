//! Shophand server library.
//!
//! Exposes Shopify Admin API operations as schema-validated MCP tools.
//! Every tool invocation follows the same pipeline: validate the raw
//! argument object against the tool's declared schema, qualify resource
//! identifiers, render one GraphQL operation, execute it over the shared
//! transport client, surface business errors distinctly from transport
//! failures, and flatten the payload into a stable JSON shape.
//!
//! # Modules
//!
//! - [`config`] - Environment/flag configuration
//! - [`error`] - Error taxonomy and reshaping
//! - [`schema`] - Declarative tool input schemas and validation
//! - [`shopify`] - GraphQL transport client, documents, and typed payloads
//! - [`tools`] - Tool units and the registry/dispatcher
//! - [`mcp`] - JSON-RPC stdio protocol loop

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod mcp;
pub mod schema;
pub mod shopify;
pub mod tools;
