//! Catalog, cart, and stock records.
//!
//! These are the wire and mirror shapes shared by the API client, the cart
//! store, and the persisted mirror. Prices use [`Decimal`] to keep money
//! exact; the store API serves them as JSON numbers and the persisted
//! mirror stores them as strings, both of which deserialize losslessly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product as served by the store catalog.
///
/// This is the narrower record returned by product fetches; it carries no
/// quantity. See [`CartItem`] for the in-cart shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
}

/// Available stock for a product.
///
/// Source of truth is the store API, not the cart; a cart entry's amount is
/// only guaranteed to be within stock as observed at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Catalog product ID.
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}

/// A cart entry: a catalog product plus the quantity in the cart.
///
/// The cart invariant keeps at most one entry per distinct [`ProductId`]
/// and every `amount` at 1 or more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
    /// Quantity in the cart.
    pub amount: u32,
}

impl CartItem {
    /// Build a cart entry from a catalog product and a quantity.
    #[must_use]
    pub fn from_catalog(product: CatalogProduct, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// The same entry with a different quantity.
    #[must_use]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Line total for this entry (`price * amount`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shoe() -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(1),
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Decimal::new(1799, 1), // 179.9
            image: "https://rocketshoes.example/images/shoe-1.jpg".to_string(),
        }
    }

    #[test]
    fn test_from_catalog_carries_all_fields() {
        let item = CartItem::from_catalog(shoe(), 2);
        assert_eq!(item.id, ProductId::new(1));
        assert_eq!(item.title, "Tênis de Caminhada Leve Confortável");
        assert_eq!(item.price, Decimal::new(1799, 1));
        assert_eq!(item.amount, 2);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::from_catalog(shoe(), 3);
        assert_eq!(item.line_total(), Decimal::new(5397, 1)); // 539.7
    }

    #[test]
    fn test_with_amount_replaces_quantity_only() {
        let item = CartItem::from_catalog(shoe(), 1).with_amount(4);
        assert_eq!(item.amount, 4);
        assert_eq!(item.price, Decimal::new(1799, 1));
    }

    #[test]
    fn test_catalog_product_deserializes_from_api_number_price() {
        // The store API serves prices as plain JSON numbers.
        let json = r#"{"id":2,"title":"Tênis VR Caminhada","price":139.9,"image":"https://rocketshoes.example/images/shoe-2.jpg"}"#;
        let product: CatalogProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.price.to_string(), "139.9");
    }

    #[test]
    fn test_cart_item_mirror_roundtrip() {
        let item = CartItem::from_catalog(shoe(), 2);
        let json = serde_json::to_string(&item).unwrap();
        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_stock_level_shape() {
        let stock: StockLevel = serde_json::from_str(r#"{"id":3,"amount":2}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(3));
        assert_eq!(stock.amount, 2);
    }
}
