//! Cart mutation service.

use std::sync::Arc;

use tracing::debug;
use velvet_commerce::cart::{Cart, CartItemView, CartView};
use velvet_commerce::error::CommerceError;
use velvet_commerce::ids::{CartItemId, ProductId, UserId};
use velvet_commerce::money::Currency;
use velvet_store::{Catalog, CartRepository, UserDirectory};

/// Cart operations for registered users.
///
/// Stock checks here are advisory: they reject requests that are already
/// hopeless against the current count, but they reserve nothing. The only
/// authoritative stock claim happens inside the checkout engine.
pub struct CartService {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn Catalog>,
    carts: Arc<dyn CartRepository>,
    currency: Currency,
}

impl CartService {
    /// Create a service over the given repositories.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn Catalog>,
        carts: Arc<dyn CartRepository>,
    ) -> Self {
        Self {
            users,
            catalog,
            carts,
            currency: Currency::USD,
        }
    }

    /// Set the currency used for newly created carts.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Fetch the user's cart, creating an empty one on first touch.
    pub async fn cart(&self, user_id: &UserId) -> Result<CartView, CommerceError> {
        if !self.users.user_exists(user_id).await? {
            return Err(CommerceError::UserNotFound(user_id.to_string()));
        }

        let cart = match self.carts.cart_for_user(user_id).await? {
            Some(cart) => cart,
            None => {
                let cart = Cart::new(user_id.clone(), self.currency);
                self.carts.save(&cart).await?;
                debug!(user_id = %user_id, cart_id = %cart.id, "Created cart");
                cart
            }
        };
        self.view(&cart).await
    }

    /// Add `quantity` units of a product to the user's cart.
    ///
    /// The product must exist and currently have at least `quantity` units
    /// on hand; the check is against the increment alone, not the folded
    /// line total. The line's price snapshot is refreshed to the product's
    /// current price.
    pub async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !self.users.user_exists(user_id).await? {
            return Err(CommerceError::UserNotFound(user_id.to_string()));
        }
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        if !product.in_stock(quantity) {
            return Err(CommerceError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available: product.stock,
            });
        }

        let mut cart = match self.carts.cart_for_user(user_id).await? {
            Some(cart) => cart,
            None => Cart::new(user_id.clone(), self.currency),
        };
        cart.add_item(product.id.clone(), quantity, product.price)?;
        self.carts.save(&cart).await?;
        debug!(user_id = %user_id, product_id = %product_id, quantity, "Added item to cart");

        self.view(&cart).await
    }

    /// Set a cart line's quantity. Zero or less removes the line.
    ///
    /// A positive target quantity is advisory-checked against the product's
    /// full current stock (the line is being replaced, not incremented). The
    /// price snapshot is not refreshed.
    pub async fn set_quantity(
        &self,
        user_id: &UserId,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<CartView, CommerceError> {
        let mut cart = self
            .carts
            .cart_for_user(user_id)
            .await?
            .ok_or_else(|| CommerceError::ItemNotFound(item_id.to_string()))?;
        let product_id = cart
            .item(item_id)
            .ok_or_else(|| CommerceError::ItemNotFound(item_id.to_string()))?
            .product_id
            .clone();

        if quantity > 0 {
            let product = self
                .catalog
                .product(&product_id)
                .await?
                .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
            if !product.in_stock(quantity) {
                return Err(CommerceError::InsufficientStock {
                    product_id: product_id.to_string(),
                    requested: quantity,
                    available: product.stock,
                });
            }
        }

        cart.set_quantity(item_id, quantity)?;
        self.carts.save(&cart).await?;
        debug!(user_id = %user_id, item_id = %item_id, quantity, "Updated cart line");

        self.view(&cart).await
    }

    /// Remove a line from the user's cart.
    ///
    /// Fails with `ItemNotFound` when the line is absent; the cart is left
    /// untouched in that case.
    pub async fn remove_item(
        &self,
        user_id: &UserId,
        item_id: &CartItemId,
    ) -> Result<CartView, CommerceError> {
        let mut cart = self
            .carts
            .cart_for_user(user_id)
            .await?
            .ok_or_else(|| CommerceError::ItemNotFound(item_id.to_string()))?;

        if !cart.remove_item(item_id) {
            return Err(CommerceError::ItemNotFound(item_id.to_string()));
        }
        self.carts.save(&cart).await?;
        debug!(user_id = %user_id, item_id = %item_id, "Removed cart line");

        self.view(&cart).await
    }

    /// Empty the user's cart. Succeeds even when there is nothing to clear.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), CommerceError> {
        let Some(mut cart) = self.carts.cart_for_user(user_id).await? else {
            return Ok(());
        };
        if cart.is_empty() {
            return Ok(());
        }

        cart.clear();
        self.carts.save(&cart).await?;
        debug!(user_id = %user_id, "Cleared cart");
        Ok(())
    }

    async fn view(&self, cart: &Cart) -> Result<CartView, CommerceError> {
        let mut items = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            let product = self.catalog.product(&item.product_id).await?;
            items.push(CartItemView::new(cart, item, product.as_ref())?);
        }
        CartView::new(cart, items)
    }
}
