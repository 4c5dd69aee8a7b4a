//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// `stock` is the authoritative on-hand count. It is only ever decremented
/// through the stock ledger's reserve operation; any read outside the ledger
/// is an advisory snapshot that may be stale by the time it is acted on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: Option<String>,
    /// Unit price. Catalog rule: at least one cent.
    pub price: Money,
    /// Units on hand. Never negative.
    pub stock: i64,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new product.
    pub fn new(name: impl Into<String>, price: Money, stock: i64, category_id: CategoryId) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: None,
            price,
            stock,
            image_url: None,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Check whether at least `quantity` units are on hand.
    pub fn in_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Change the unit price, recording the update time.
    ///
    /// Carts keep their own price snapshots, so a price change never touches
    /// lines already in a cart.
    pub fn set_price(&mut self, price: Money) {
        self.price = price;
        self.updated_at = current_timestamp();
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
