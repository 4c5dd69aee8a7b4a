//! Cart-to-order checkout engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use velvet_commerce::error::CommerceError;
use velvet_commerce::ids::{OrderId, ProductId, UserId};
use velvet_commerce::orders::{Order, OrderItem, OrderItemView, OrderView};
use velvet_store::{Catalog, CartRepository, OrderRepository, StockLedger, UserDirectory};

/// Progress marker for one checkout attempt.
///
/// An attempt moves strictly forward through these phases. Any error aborts
/// the attempt, and aborts after `Reserving` began undo their stock effects
/// before the error surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutPhase {
    /// User and cart checks, plus snapshotting the order lines.
    Validating,
    /// Claiming stock, product by product in ascending ID order.
    Reserving,
    /// Writing the order and clearing the cart as one unit of work.
    Committing,
    /// Order placed.
    Done,
}

impl CheckoutPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Validating => "validating",
            CheckoutPhase::Reserving => "reserving",
            CheckoutPhase::Committing => "committing",
            CheckoutPhase::Done => "done",
        }
    }
}

/// Converts a user's cart into a placed order.
///
/// The engine never trusts the advisory stock checks made while the cart
/// was being filled. Every checkout claims its stock through the ledger's
/// conditional decrement, so two attempts racing for the last units cannot
/// both win.
pub struct CheckoutEngine {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn Catalog>,
    carts: Arc<dyn CartRepository>,
    stock: Arc<dyn StockLedger>,
    orders: Arc<dyn OrderRepository>,
}

impl CheckoutEngine {
    /// Create an engine over the given repositories.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn Catalog>,
        carts: Arc<dyn CartRepository>,
        stock: Arc<dyn StockLedger>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            users,
            catalog,
            carts,
            stock,
            orders,
        }
    }

    /// Convert the user's cart into a pending order.
    ///
    /// On success the checked-out lines are gone from the cart, stock is
    /// decremented, and the persisted order is returned as a view. On any
    /// failure the order does not exist and stock is back to where this
    /// attempt found it; the cart is never touched by a failed attempt.
    ///
    /// Lines are charged at their cart price snapshots, not at the current
    /// catalog price.
    pub async fn checkout(&self, user_id: &UserId) -> Result<OrderView, CommerceError> {
        debug!(user_id = %user_id, phase = CheckoutPhase::Validating.as_str(), "Starting checkout");

        if !self.users.user_exists(user_id).await? {
            return Err(CommerceError::UserNotFound(user_id.to_string()));
        }
        let cart = self
            .carts
            .cart_for_user(user_id)
            .await?
            .filter(|cart| !cart.is_empty())
            .ok_or(CommerceError::EmptyCart)?;

        // Snapshot the order up front so arithmetic problems abort before
        // any stock is claimed.
        let items: Vec<OrderItem> = cart
            .items
            .iter()
            .map(OrderItem::from_cart_item)
            .collect::<Result<_, _>>()?;
        let order = Order::pending(cart.user_id.clone(), cart.currency, items)?;

        debug!(
            user_id = %user_id,
            phase = CheckoutPhase::Reserving.as_str(),
            lines = cart.items.len(),
            "Reserving stock"
        );

        // Ascending product ID keeps the claim order deterministic when
        // several checkouts overlap.
        let mut plan: Vec<(&ProductId, i64)> = cart
            .items
            .iter()
            .map(|item| (&item.product_id, item.quantity))
            .collect();
        plan.sort_by(|a, b| a.0.cmp(b.0));

        let mut reserved: Vec<(&ProductId, i64)> = Vec::with_capacity(plan.len());
        for (product_id, quantity) in plan {
            match self.stock.try_reserve(product_id, quantity).await {
                Ok(true) => reserved.push((product_id, quantity)),
                Ok(false) => {
                    // Advisory count for the error message; zero if even
                    // that read fails.
                    let available = self.stock.available(product_id).await.unwrap_or(0);
                    warn!(
                        user_id = %user_id,
                        product_id = %product_id,
                        requested = quantity,
                        available,
                        "Checkout lost the race for stock"
                    );
                    self.release_reserved(&reserved).await;
                    return Err(CommerceError::InsufficientStock {
                        product_id: product_id.to_string(),
                        requested: quantity,
                        available,
                    });
                }
                Err(err) => {
                    self.release_reserved(&reserved).await;
                    return Err(err);
                }
            }
        }

        debug!(
            user_id = %user_id,
            order_id = %order.id,
            phase = CheckoutPhase::Committing.as_str(),
            "Committing order"
        );

        let order = match self.orders.create(order, &cart).await {
            Ok(order) => order,
            Err(err) => {
                error!(
                    user_id = %user_id,
                    error = %err,
                    "Order persistence failed, releasing reservations"
                );
                self.release_reserved(&reserved).await;
                return Err(err);
            }
        };

        info!(
            order_id = %order.id,
            user_id = %user_id,
            total = %order.total,
            items = order.item_count(),
            phase = CheckoutPhase::Done.as_str(),
            "Order placed"
        );
        self.assemble_view(&order).await
    }

    /// Fetch a placed order as a view.
    pub async fn order(&self, order_id: &OrderId) -> Result<Option<OrderView>, CommerceError> {
        match self.orders.order(order_id).await? {
            Some(order) => Ok(Some(self.assemble_view(&order).await?)),
            None => Ok(None),
        }
    }

    /// All orders a user has placed, newest first, as views.
    pub async fn order_history(&self, user_id: &UserId) -> Result<Vec<OrderView>, CommerceError> {
        let orders = self.orders.orders_for_user(user_id).await?;
        let mut views = Vec::with_capacity(orders.len());
        for order in &orders {
            views.push(self.assemble_view(order).await?);
        }
        Ok(views)
    }

    /// Undo reservations in reverse acquisition order.
    ///
    /// Release failures are logged and skipped; whatever can be given back
    /// is, and operators reconcile the rest from the log.
    async fn release_reserved(&self, reserved: &[(&ProductId, i64)]) {
        for &(product_id, quantity) in reserved.iter().rev() {
            if let Err(err) = self.stock.release(product_id, quantity).await {
                error!(
                    product_id = %product_id,
                    quantity,
                    error = %err,
                    "Failed to release reserved stock"
                );
            }
        }
    }

    async fn assemble_view(&self, order: &Order) -> Result<OrderView, CommerceError> {
        let user_name = self
            .users
            .user(&order.user_id)
            .await?
            .map(|user| user.name);

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let product = self.catalog.product(&item.product_id).await?;
            items.push(OrderItemView::new(order, item, product.as_ref()));
        }
        Ok(OrderView::new(order, user_name, items))
    }
}
