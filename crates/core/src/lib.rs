//! Rocket Shoes Core - Shared domain types.
//!
//! This crate provides the common types used across the Rocket Shoes cart
//! components:
//! - `cart` - The cart engine (store, API client, persisted mirror)
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed product IDs and the catalog/cart/stock records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
