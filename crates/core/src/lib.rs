//! Shophand Core - Shared types library.
//!
//! This crate provides common types used by the Shophand MCP server:
//! global-id handling for Shopify resources and structurally validated
//! value types.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Global ids, resource kinds, and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
