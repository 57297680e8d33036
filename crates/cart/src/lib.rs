//! Rocket Shoes Cart - client-side cart engine.
//!
//! This crate owns the shopper's cart for a storefront session: an explicit
//! [`CartStore`] holding the in-memory item list, a persisted JSON mirror so
//! the cart survives restarts, and a thin REST client for the store API's
//! product and stock endpoints.
//!
//! # Architecture
//!
//! - [`config`] - Environment-driven configuration
//! - [`api`] - Store API client (products and stock, read-only)
//! - [`storage`] - The persisted cart mirror
//! - [`store`] - The stateful cart store and its three mutations
//! - [`notice`] - User-facing messages for failed operations
//!
//! The store is the only writer of cart state. Every mutation runs under a
//! single-writer lock, rebuilds the item list, persists the mirror, and only
//! then commits the new list, so callers never observe partial state and
//! concurrent mutations cannot clobber each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartStore};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::from_config(&config)?;
//!
//! let items = store.add_product(ProductId::new(1)).await?;
//! println!("{} item(s) in cart", items.len());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod notice;
pub mod storage;
pub mod store;

pub use api::{ApiError, StoreApiClient};
pub use config::{CartConfig, ConfigError};
pub use notice::{CartOp, failure_notice};
pub use storage::{CartStorage, StorageError};
pub use store::{CartError, CartStore};
