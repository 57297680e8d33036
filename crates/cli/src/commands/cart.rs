//! Cart commands: the three mutations plus display.
//!
//! Each command opens the store from environment configuration, runs one
//! operation, and renders the resulting cart. Failures are logged with
//! their typed cause; the shopper-facing notice becomes the command error.

use rust_decimal::Decimal;
use tracing::error;

use rocket_shoes_cart::{CartConfig, CartError, CartOp, CartStore, failure_notice};
use rocket_shoes_core::{CartItem, ProductId};

/// Open the cart store from environment configuration.
fn open_store() -> Result<CartStore, Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    Ok(CartStore::from_config(&config)?)
}

/// Add one unit of a product to the cart.
///
/// # Errors
///
/// Returns the shopper-facing notice if the operation fails.
pub async fn add(product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let items = run_op(CartOp::Add, store.add_product(ProductId::new(product_id)).await)?;
    render_cart(&items);
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns the shopper-facing notice if the operation fails.
pub async fn remove(product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let items = run_op(
        CartOp::Remove,
        store.remove_product(ProductId::new(product_id)).await,
    )?;
    render_cart(&items);
    Ok(())
}

/// Set the quantity of a product already in the cart.
///
/// # Errors
///
/// Returns the shopper-facing notice if the operation fails.
pub async fn set(product_id: i64, amount: i64) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let items = run_op(
        CartOp::UpdateAmount,
        store
            .update_product_amount(ProductId::new(product_id), amount)
            .await,
    )?;
    render_cart(&items);
    Ok(())
}

/// Show the current cart.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    render_cart(&store.items().await);
    Ok(())
}

/// Log a failed operation and convert it to its shopper-facing notice.
fn run_op(
    op: CartOp,
    result: Result<Vec<CartItem>, CartError>,
) -> Result<Vec<CartItem>, Box<dyn std::error::Error>> {
    result.map_err(|e| {
        error!(error = %e, ?op, "Cart operation failed");
        failure_notice(op, &e).into()
    })
}

/// Render the cart as a line-item listing with a subtotal.
fn render_cart(items: &[CartItem]) {
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }

    let mut subtotal = Decimal::ZERO;
    let mut count: u32 = 0;
    for item in items {
        let line_total = item.line_total();
        println!(
            "{:>6}  {:<44} x{:<3} @ {:>10}  {:>10}",
            item.id.as_i64(),
            item.title,
            item.amount,
            format_price(item.price),
            format_price(line_total),
        );
        subtotal += line_total;
        count += item.amount;
    }
    println!("{count} item(s), subtotal {}", format_price(subtotal));
}

/// Format a decimal amount as a price string.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_pads_to_cents() {
        assert_eq!(format_price(Decimal::new(1799, 1)), "$179.90");
        assert_eq!(format_price(Decimal::new(100, 0)), "$100.00");
    }
}
