//! Core types for Rocket Shoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod product;

pub use id::*;
pub use product::{CartItem, CatalogProduct, StockLevel};
