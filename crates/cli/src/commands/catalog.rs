//! Catalog commands: product listings joined with stock levels.

use std::collections::HashMap;

use tracing::error;

use rocket_shoes_cart::{CartConfig, StoreApiClient};
use rocket_shoes_core::ProductId;

use super::cart::format_price;

/// List catalog products with their stock levels.
///
/// Fetches the product list and the stock list (optionally filtered to one
/// ID) and renders them side by side.
///
/// # Errors
///
/// Returns an error if configuration or either fetch fails.
pub async fn list(id: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let api = StoreApiClient::new(&config)?;

    let filter = id.map(ProductId::new);
    let products = api.get_products(filter).await.map_err(|e| {
        error!(error = %e, "Failed to fetch products");
        "Could not load the catalog"
    })?;
    let stock_levels = api.get_stock_levels(filter).await.map_err(|e| {
        error!(error = %e, "Failed to fetch stock levels");
        "Could not load the catalog"
    })?;

    let stock_by_id: HashMap<ProductId, u32> = stock_levels
        .into_iter()
        .map(|stock| (stock.id, stock.amount))
        .collect();

    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }

    for product in products {
        let in_stock = stock_by_id.get(&product.id).copied().unwrap_or(0);
        println!(
            "{:>6}  {:<44} {:>10}  ({in_stock} in stock)",
            product.id.as_i64(),
            product.title,
            format_price(product.price),
        );
    }

    Ok(())
}
