//! Order and order item types.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order.
///
/// Checkout always creates orders as `Pending`; the later transitions are
/// driven by payment and fulfillment machinery outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if no further transitions are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// A placed order.
///
/// Orders are written once at checkout and never mutated here. Their line
/// items are historical snapshots: later catalog edits do not reach back
/// into an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Sum of line subtotals, fixed at checkout time.
    pub total: Money,
    /// Purchased lines.
    pub items: Vec<OrderItem>,
    /// Unix timestamp of placement.
    pub created_at: i64,
}

impl Order {
    /// Build a pending order from snapshot lines.
    ///
    /// The total is derived from the lines here, once, and persisted as a
    /// historical fact. Fails with `Overflow` if it cannot be represented.
    pub fn pending(
        user_id: UserId,
        currency: Currency,
        items: Vec<OrderItem>,
    ) -> Result<Self, CommerceError> {
        let total = Money::try_sum(items.iter().map(|i| &i.subtotal), currency)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: OrderId::generate(),
            user_id,
            status: OrderStatus::Pending,
            total,
            items,
            created_at: current_timestamp(),
        })
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Snapshot of one purchased line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique line identifier.
    pub id: OrderItemId,
    /// Product that was purchased.
    pub product_id: ProductId,
    /// Quantity purchased.
    pub quantity: i64,
    /// Unit price carried over from the cart line.
    pub unit_price: Money,
    /// Quantity times unit price at checkout time.
    pub subtotal: Money,
}

impl OrderItem {
    /// Snapshot a cart line into an order line.
    pub fn from_cart_item(item: &CartItem) -> Result<Self, CommerceError> {
        Ok(Self {
            id: OrderItemId::generate(),
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal()?,
        })
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
