//! Read-side cart views.
//!
//! What the API layer actually serves: cart lines joined with catalog
//! display fields and the derived money amounts, so clients never have to
//! do lookups or arithmetic of their own.

use crate::cart::{Cart, CartItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartId, CartItemId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A cart ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartView {
    /// Cart identifier.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Display lines.
    pub items: Vec<CartItemView>,
    /// Sum of all line subtotals.
    pub total: Money,
}

impl CartView {
    /// Assemble a view from a cart and its already-resolved lines.
    pub fn new(cart: &Cart, items: Vec<CartItemView>) -> Result<Self, CommerceError> {
        let total = Money::try_sum(items.iter().map(|i| &i.subtotal), cart.currency)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: cart.id.clone(),
            user_id: cart.user_id.clone(),
            created_at: cart.created_at,
            items,
            total,
        })
    }
}

/// One cart line ready for display.
///
/// `product_name` and `product_image_url` are `None` when the product has
/// since left the catalog; the line itself still renders from its snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemView {
    /// Line identifier.
    pub id: CartItemId,
    /// Cart this line belongs to.
    pub cart_id: CartId,
    /// Product on the line.
    pub product_id: ProductId,
    /// Product name, if still in the catalog.
    pub product_name: Option<String>,
    /// Product image, if still in the catalog.
    pub product_image_url: Option<String>,
    /// Unit price snapshot.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Quantity times unit price.
    pub subtotal: Money,
}

impl CartItemView {
    /// Resolve one cart line against the catalog product, if found.
    pub fn new(
        cart: &Cart,
        item: &CartItem,
        product: Option<&Product>,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            id: item.id.clone(),
            cart_id: cart.id.clone(),
            product_id: item.product_id.clone(),
            product_name: product.map(|p| p.name.clone()),
            product_image_url: product.and_then(|p| p.image_url.clone()),
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal()?,
        })
    }
}
