//! The persisted cart mirror.
//!
//! One JSON file holding the serialized item list. The file is read once
//! when the store opens and replaced wholesale after every successful
//! mutation; there are no partial updates, no versioning, and no migration
//! of older formats.
//!
//! A mirror that fails to parse is treated as an empty cart (with a
//! warning); the shopper re-adds items and the next successful mutation
//! overwrites the bad file.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use rocket_shoes_core::CartItem;

/// Errors that can occur while reading or writing the mirror.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on cart mirror: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the cart failed.
    #[error("Serialize error on cart mirror: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed storage for the cart mirror.
#[derive(Debug, Clone)]
pub struct CartStorage {
    path: PathBuf,
}

impl CartStorage {
    /// Create storage over the given mirror path.
    ///
    /// The file does not need to exist yet; a missing mirror reads as an
    /// empty cart.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted cart.
    ///
    /// A missing file is an empty cart. A file that fails to parse is also
    /// an empty cart: the mirror is a convenience copy, not a ledger, and
    /// refusing to open the store over it would block every operation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        match serde_json::from_str(&contents) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Cart mirror is corrupt, starting from an empty cart"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the persisted cart with the given items.
    ///
    /// Writes to a temporary sibling file and renames it over the mirror so
    /// a crash mid-write cannot leave a half-written file behind. Missing
    /// parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or a filesystem operation
    /// fails.
    pub fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(items)?;

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut tmp = std::fs::File::create(&tmp_path)?;
            tmp.write_all(json.as_bytes())?;
            tmp.sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rocket_shoes_core::{CatalogProduct, ProductId};
    use rust_decimal::Decimal;

    fn item(id: i64, amount: u32) -> CartItem {
        CartItem::from_catalog(
            CatalogProduct {
                id: ProductId::new(id),
                title: format!("Shoe {id}"),
                price: Decimal::new(9990, 2),
                image: format!("https://rocketshoes.example/images/shoe-{id}.jpg"),
            },
            amount,
        )
    }

    #[test]
    fn test_missing_mirror_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("cart.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("cart.json"));

        let items = vec![item(1, 2), item(5, 1)];
        storage.save(&items).unwrap();
        assert_eq!(storage.load().unwrap(), items);
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("cart.json"));

        storage.save(&[item(1, 2), item(5, 1)]).unwrap();
        storage.save(&[item(5, 3)]).unwrap();
        assert_eq!(storage.load().unwrap(), vec![item(5, 3)]);
    }

    #[test]
    fn test_corrupt_mirror_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = CartStorage::new(&path);
        assert!(storage.load().unwrap().is_empty());

        // The corrupt file stays in place until the next save overwrites it.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
        storage.save(&[item(2, 1)]).unwrap();
        assert_eq!(storage.load().unwrap(), vec![item(2, 1)]);
    }

    #[test]
    fn test_save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("state/rocket/cart.json"));
        storage.save(&[item(3, 1)]).unwrap();
        assert_eq!(storage.load().unwrap(), vec![item(3, 1)]);
    }
}
