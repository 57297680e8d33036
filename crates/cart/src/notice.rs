//! User-facing messages for failed cart operations.
//!
//! Cart operations return typed results; nothing is surfaced to the shopper
//! from inside the library. Presentation layers map a failed operation to
//! one of these transient notices and decide how to show it. Keeping the
//! mapping here means every surface uses identical wording.

use crate::store::CartError;

/// The cart operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    /// `CartStore::add_product`
    Add,
    /// `CartStore::remove_product`
    Remove,
    /// `CartStore::update_product_amount`
    UpdateAmount,
}

/// The notice to show a shopper for a failed operation.
///
/// Business-rule rejections get their precise message; every other failure
/// collapses to a generic per-operation notice, with the typed error left
/// to logs.
#[must_use]
pub const fn failure_notice(op: CartOp, error: &CartError) -> &'static str {
    match (op, error) {
        (_, CartError::OutOfStock) => "Requested quantity is out of stock",
        (CartOp::Add, _) => "Could not add the product",
        (CartOp::Remove, _) => "Could not remove the product",
        (CartOp::UpdateAmount, _) => "Could not change the product quantity",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use rocket_shoes_core::ProductId;

    #[test]
    fn test_out_of_stock_wins_over_operation() {
        for op in [CartOp::Add, CartOp::Remove, CartOp::UpdateAmount] {
            assert_eq!(
                failure_notice(op, &CartError::OutOfStock),
                "Requested quantity is out of stock"
            );
        }
    }

    #[test]
    fn test_generic_notices_are_per_operation() {
        let err = CartError::Api(ApiError::NotFound("product 9".to_string()));
        assert_eq!(failure_notice(CartOp::Add, &err), "Could not add the product");
        assert_eq!(
            failure_notice(CartOp::UpdateAmount, &err),
            "Could not change the product quantity"
        );
        assert_eq!(
            failure_notice(CartOp::Remove, &CartError::NotInCart(ProductId::new(5))),
            "Could not remove the product"
        );
    }
}
