//! Cart and cart item types.

use crate::error::CommerceError;
use crate::ids::{CartId, CartItemId, ProductId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Every user has at most one cart, and a cart has at most one line per
/// product: adding a product that is already present folds into the existing
/// line instead of appending a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// Cart currency.
    pub currency: Currency,
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(user_id: UserId, currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            user_id,
            currency,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add `quantity` units of a product at the given unit price.
    ///
    /// If the product already has a line, the quantities are summed and the
    /// line's price snapshot is refreshed to `unit_price`; otherwise a new
    /// line is appended. Returns the affected line's ID.
    ///
    /// Fails with `InvalidQuantity` for non-positive quantities and
    /// `Overflow` if the folded quantity cannot be represented.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
    ) -> Result<CartItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            existing.unit_price = unit_price;
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        let item = CartItem::new(product_id, quantity, unit_price);
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Set a line's quantity.
    ///
    /// A non-positive quantity removes the line. The price snapshot is left
    /// untouched; only `add_item` re-syncs it with the catalog.
    ///
    /// Fails with `ItemNotFound` if no line with `item_id` exists.
    pub fn set_quantity(
        &mut self,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == item_id)
            .ok_or_else(|| CommerceError::ItemNotFound(item_id.to_string()))?;

        if quantity <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Remove a line from the cart. Returns whether anything was removed.
    pub fn remove_item(&mut self, item_id: &CartItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Remove every line whose ID appears in `snapshot`.
    ///
    /// Used when a checkout commits: only the lines that were part of the
    /// checked-out snapshot disappear, so anything added to the live cart in
    /// the meantime survives. Returns how many lines were removed.
    pub fn remove_items_of(&mut self, snapshot: &Cart) -> usize {
        let len_before = self.items.len();
        self.items
            .retain(|i| !snapshot.items.iter().any(|s| s.id == i.id));
        let removed = len_before - self.items.len();
        if removed > 0 {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by ID.
    pub fn item(&self, item_id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }

    /// Get a line by product ID.
    pub fn item_for_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of all line subtotals.
    ///
    /// Computed on demand from the snapshots; the total is never stored.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for item in &self.items {
            total = total
                .try_add(&item.subtotal()?)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }
}

/// One line of a cart.
///
/// `unit_price` is a snapshot taken when the product was last added. It may
/// drift from the live catalog price; checkout charges the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique line identifier.
    pub id: CartItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity. Always positive; a line that would hit zero is removed.
    pub quantity: i64,
    /// Unit price snapshot.
    pub unit_price: Money,
}

impl CartItem {
    fn new(product_id: ProductId, quantity: i64, unit_price: Money) -> Self {
        Self {
            id: CartItemId::generate(),
            product_id,
            quantity,
            unit_price,
        }
    }

    /// Quantity times unit price, checked.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        Cart::new(UserId::new("user-1"), Currency::USD)
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = cart();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total().unwrap(), Money::zero(Currency::USD));
    }

    #[test]
    fn test_add_item() {
        let mut cart = cart();
        let id = cart
            .add_item(ProductId::new("prod-1"), 2, Money::new(1000, Currency::USD))
            .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.item(&id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_same_product_folds_and_refreshes_price() {
        let mut cart = cart();
        let product_id = ProductId::new("prod-1");

        let first = cart
            .add_item(product_id.clone(), 1, Money::new(1000, Currency::USD))
            .unwrap();
        let second = cart
            .add_item(product_id.clone(), 2, Money::new(1200, Currency::USD))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.items.len(), 1);

        let line = cart.item_for_product(&product_id).unwrap();
        assert_eq!(line.quantity, 3);
        // The fold re-snapshots the price to the latest one seen.
        assert_eq!(line.unit_price, Money::new(1200, Currency::USD));
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = cart();
        let err = cart
            .add_item(ProductId::new("prod-1"), 0, Money::new(1000, Currency::USD))
            .unwrap_err();
        assert_eq!(err, CommerceError::InvalidQuantity(0));

        let err = cart
            .add_item(ProductId::new("prod-1"), -3, Money::new(1000, Currency::USD))
            .unwrap_err();
        assert_eq!(err, CommerceError::InvalidQuantity(-3));
    }

    #[test]
    fn test_add_overflow_on_fold() {
        let mut cart = cart();
        let product_id = ProductId::new("prod-1");
        cart.add_item(product_id.clone(), i64::MAX, Money::new(1, Currency::USD))
            .unwrap();
        let err = cart
            .add_item(product_id, 1, Money::new(1, Currency::USD))
            .unwrap_err();
        assert_eq!(err, CommerceError::Overflow);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = cart();
        let id = cart
            .add_item(ProductId::new("prod-1"), 1, Money::new(1000, Currency::USD))
            .unwrap();

        cart.set_quantity(&id, 5).unwrap();
        assert_eq!(cart.item(&id).unwrap().quantity, 5);
    }

    #[test]
    fn test_set_quantity_keeps_price_snapshot() {
        let mut cart = cart();
        let id = cart
            .add_item(ProductId::new("prod-1"), 1, Money::new(1000, Currency::USD))
            .unwrap();

        cart.set_quantity(&id, 4).unwrap();
        assert_eq!(cart.item(&id).unwrap().unit_price, Money::new(1000, Currency::USD));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = cart();
        let id = cart
            .add_item(ProductId::new("prod-1"), 3, Money::new(1000, Currency::USD))
            .unwrap();

        cart.set_quantity(&id, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_item() {
        let mut cart = cart();
        let err = cart.set_quantity(&CartItemId::new("missing"), 2).unwrap_err();
        assert_eq!(err, CommerceError::ItemNotFound("missing".to_string()));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = cart();
        let id = cart
            .add_item(ProductId::new("prod-1"), 1, Money::new(1000, Currency::USD))
            .unwrap();

        assert!(cart.remove_item(&id));
        assert!(cart.is_empty());
        // Second removal is a no-op.
        assert!(!cart.remove_item(&id));
    }

    #[test]
    fn test_clear() {
        let mut cart = cart();
        cart.add_item(ProductId::new("prod-1"), 1, Money::new(1000, Currency::USD))
            .unwrap();
        cart.add_item(ProductId::new("prod-2"), 2, Money::new(500, Currency::USD))
            .unwrap();

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = cart();
        cart.add_item(ProductId::new("prod-a"), 2, Money::new(1000, Currency::USD))
            .unwrap();
        cart.add_item(ProductId::new("prod-b"), 1, Money::new(500, Currency::USD))
            .unwrap();

        assert_eq!(cart.total().unwrap(), Money::new(2500, Currency::USD));
    }

    #[test]
    fn test_remove_items_of_snapshot() {
        let mut cart = cart();
        cart.add_item(ProductId::new("prod-a"), 2, Money::new(1000, Currency::USD))
            .unwrap();
        let snapshot = cart.clone();

        // A line added after the snapshot was taken survives the removal.
        cart.add_item(ProductId::new("prod-b"), 1, Money::new(500, Currency::USD))
            .unwrap();

        assert_eq!(cart.remove_items_of(&snapshot), 1);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, ProductId::new("prod-b"));
    }

    #[test]
    fn test_subtotal_overflow() {
        let mut cart = cart();
        cart.add_item(ProductId::new("prod-1"), 2, Money::new(i64::MAX, Currency::USD))
            .unwrap();
        assert_eq!(cart.total().unwrap_err(), CommerceError::Overflow);
    }
}
