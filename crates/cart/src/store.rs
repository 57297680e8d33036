//! The cart store: the only stateful component of the engine.
//!
//! Owns the authoritative in-memory item list for the session and keeps the
//! persisted mirror in sync. All three mutations run under one lock held
//! across the full read-fetch-rebuild-persist cycle, so concurrent calls
//! queue up instead of clobbering each other's snapshot, and the mirror is
//! written before the new list is committed, so a failure at any point
//! leaves both memory and disk exactly as they were.
//!
//! Stock is consulted only while mutating. A committed entry's amount is
//! within the stock observed during the call that produced it; later drift
//! is tolerated until the next mutation re-queries.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::instrument;

use rocket_shoes_core::{CartItem, ProductId};

use crate::api::{ApiError, StoreApiClient};
use crate::config::CartConfig;
use crate::storage::{CartStorage, StorageError};

/// Errors returned by cart operations.
///
/// `OutOfStock` and `NotInCart` are normal business outcomes, not faults;
/// the other variants wrap failures of the store's collaborators.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the available stock (or stock is zero).
    #[error("Requested amount exceeds available stock")]
    OutOfStock,

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A store API lookup failed.
    #[error("Store API error: {0}")]
    Api(#[from] ApiError),

    /// Persisting the cart mirror failed.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The cart store.
///
/// Cheaply cloneable handle; all clones share the same state. Open it once
/// per session and pass it to whichever component needs cart access.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    api: StoreApiClient,
    storage: CartStorage,
    /// Single-writer funnel: mutations hold this lock from first read to
    /// final commit.
    items: Mutex<Vec<CartItem>>,
}

impl CartStore {
    /// Open the store, loading the persisted mirror as initial state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the mirror exists but cannot be read.
    pub fn open(api: StoreApiClient, storage: CartStorage) -> Result<Self, StorageError> {
        let items = storage.load()?;
        tracing::debug!(items = items.len(), "Cart store opened");

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                api,
                storage,
                items: Mutex::new(items),
            }),
        })
    }

    /// Open the store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the mirror
    /// cannot be read.
    pub fn from_config(config: &CartConfig) -> Result<Self, CartError> {
        let api = StoreApiClient::new(config)?;
        let storage = CartStorage::new(config.storage_path.clone());
        Ok(Self::open(api, storage)?)
    }

    /// A snapshot of the current cart.
    pub async fn items(&self) -> Vec<CartItem> {
        self.inner.items.lock().await.clone()
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// A product not yet in the cart enters with amount 1; an existing entry
    /// is bumped by 1. Rejected with `OutOfStock` when the product has zero
    /// stock or the bump would exceed it.
    ///
    /// # Errors
    ///
    /// `OutOfStock`, or `Api`/`Storage` when a collaborator fails. The cart
    /// is unchanged on every error path.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Vec<CartItem>, CartError> {
        let mut items = self.inner.items.lock().await;

        let stock = self.inner.api.get_stock(product_id).await?;
        if stock.amount == 0 {
            return Err(CartError::OutOfStock);
        }

        let product = self.inner.api.get_product(product_id).await?;

        let entry = match items.iter().find(|item| item.id == product_id) {
            None => CartItem::from_catalog(product, 1),
            Some(existing) => {
                let new_amount = existing.amount + 1;
                if new_amount > stock.amount {
                    return Err(CartError::OutOfStock);
                }
                existing.clone().with_amount(new_amount)
            }
        };

        let updated = upsert(&items, entry);
        self.commit(&mut items, updated)
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// `NotInCart` if no entry with this ID exists; `Storage` if persisting
    /// fails. The cart is unchanged on every error path.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Vec<CartItem>, CartError> {
        let mut items = self.inner.items.lock().await;

        if !items.iter().any(|item| item.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let updated = without(&items, product_id);
        self.commit(&mut items, updated)
    }

    /// Set the absolute quantity of a product already in the cart.
    ///
    /// A requested amount of zero or less is silently ignored, as is an ID
    /// not present in the cart; both return the current snapshot unchanged.
    ///
    /// # Errors
    ///
    /// `OutOfStock` when the requested amount exceeds available stock, or
    /// `Api`/`Storage` when a collaborator fails. The cart is unchanged on
    /// every error path.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Vec<CartItem>, CartError> {
        let mut items = self.inner.items.lock().await;

        if amount <= 0 {
            return Ok(items.clone());
        }

        let stock = self.inner.api.get_stock(product_id).await?;
        // An amount past u32::MAX is past any stock level.
        let requested = u32::try_from(amount).map_err(|_| CartError::OutOfStock)?;
        if requested > stock.amount {
            return Err(CartError::OutOfStock);
        }

        let updated = replace_amount(&items, product_id, requested);
        self.commit(&mut items, updated)
    }

    /// Persist the rebuilt list, then swap it in and hand back a snapshot.
    fn commit(
        &self,
        items: &mut Vec<CartItem>,
        updated: Vec<CartItem>,
    ) -> Result<Vec<CartItem>, CartError> {
        self.inner.storage.save(&updated)?;
        *items = updated;
        Ok(items.clone())
    }
}

// =============================================================================
// List rebuilding
// =============================================================================
//
// Every mutation produces a brand-new list. Entries are rebuilt by filtering
// and appending, so insertion order is not meaningful.

/// Rebuild with `entry` replacing any existing entry with the same ID.
fn upsert(items: &[CartItem], entry: CartItem) -> Vec<CartItem> {
    let mut updated: Vec<CartItem> = items
        .iter()
        .filter(|item| item.id != entry.id)
        .cloned()
        .collect();
    updated.push(entry);
    updated
}

/// Rebuild without any entry matching `id`.
fn without(items: &[CartItem], id: ProductId) -> Vec<CartItem> {
    items
        .iter()
        .filter(|item| item.id != id)
        .cloned()
        .collect()
}

/// Rebuild with the matching entry set to `amount`; other entries pass
/// through unchanged. An absent `id` yields an identical list.
fn replace_amount(items: &[CartItem], id: ProductId, amount: u32) -> Vec<CartItem> {
    items
        .iter()
        .map(|item| {
            if item.id == id {
                item.clone().with_amount(amount)
            } else {
                item.clone()
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rocket_shoes_core::CatalogProduct;
    use rust_decimal::Decimal;

    fn item(id: i64, amount: u32) -> CartItem {
        CartItem::from_catalog(
            CatalogProduct {
                id: ProductId::new(id),
                title: format!("Shoe {id}"),
                price: Decimal::new(17990, 2),
                image: format!("https://rocketshoes.example/images/shoe-{id}.jpg"),
            },
            amount,
        )
    }

    fn ids(items: &[CartItem]) -> Vec<i64> {
        items.iter().map(|i| i.id.as_i64()).collect()
    }

    #[test]
    fn test_upsert_appends_new_entry() {
        let updated = upsert(&[item(1, 1)], item(2, 1));
        assert_eq!(ids(&updated), vec![1, 2]);
    }

    #[test]
    fn test_upsert_replaces_existing_entry() {
        let updated = upsert(&[item(1, 1), item(2, 2)], item(1, 3));
        assert_eq!(ids(&updated), vec![2, 1]);
        assert_eq!(updated.last().unwrap().amount, 3);
        // Never two entries for one ID.
        assert_eq!(updated.iter().filter(|i| i.id == ProductId::new(1)).count(), 1);
    }

    #[test]
    fn test_without_removes_only_matching_id() {
        let updated = without(&[item(1, 1), item(2, 2)], ProductId::new(1));
        assert_eq!(ids(&updated), vec![2]);
    }

    #[test]
    fn test_without_absent_id_is_identity() {
        let items = vec![item(2, 1)];
        assert_eq!(without(&items, ProductId::new(5)), items);
    }

    #[test]
    fn test_replace_amount_touches_only_matching_entry() {
        let updated = replace_amount(&[item(1, 1), item(2, 2)], ProductId::new(2), 7);
        assert_eq!(updated.first().unwrap().amount, 1);
        assert_eq!(updated.last().unwrap().amount, 7);
    }

    #[test]
    fn test_replace_amount_absent_id_is_identity() {
        let items = vec![item(1, 2), item(2, 3)];
        assert_eq!(replace_amount(&items, ProductId::new(9), 5), items);
    }
}
