use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::product::{Product, ProductId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("quantity must be a positive integer, got {requested}")]
    InvalidQuantity { requested: i64 },
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },
}

/// A purchase that passed the checkout rules, priced against the catalog state
/// it was checked with.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseTicket {
    pub product_id: ProductId,
    pub quantity: i64,
    pub total: Decimal,
}

/// Applies the purchase rules to the current catalog state and fixes the total
/// at `price * quantity`.
///
/// A non-positive quantity is rejected here even though callers may also guard
/// at the request boundary.
pub fn price_purchase(product: &Product, quantity: i64) -> Result<PurchaseTicket, CheckoutError> {
    if quantity <= 0 {
        return Err(CheckoutError::InvalidQuantity { requested: quantity });
    }
    if product.stock < quantity {
        return Err(CheckoutError::InsufficientStock {
            available: product.stock,
            requested: quantity,
        });
    }

    Ok(PurchaseTicket {
        product_id: product.id,
        quantity,
        total: product.price * Decimal::from(quantity),
    })
}
