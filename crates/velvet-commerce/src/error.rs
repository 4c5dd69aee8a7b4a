//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart, stock, and checkout code all speak this one taxonomy so the
/// boundary layer can map outcomes to responses without digging through
/// wrapped causes. IDs are carried as strings for uniform display.
#[derive(Error, Debug, PartialEq)]
pub enum CommerceError {
    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(String),

    /// Checkout attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The product appears in placed orders and cannot be deleted.
    #[error("Product is referenced by existing orders: {0}")]
    ProductInUse(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Underlying storage failed.
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl CommerceError {
    /// True for the lookup failures a boundary maps to "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CommerceError::UserNotFound(_)
                | CommerceError::ProductNotFound(_)
                | CommerceError::ItemNotFound(_)
        )
    }

    /// True when the request lost a race for stock and may succeed on retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CommerceError::InsufficientStock { .. })
    }
}
