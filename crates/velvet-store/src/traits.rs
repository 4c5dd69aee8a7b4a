//! Repository traits the storefront services are written against.

use async_trait::async_trait;
use velvet_commerce::cart::Cart;
use velvet_commerce::catalog::Product;
use velvet_commerce::error::CommerceError;
use velvet_commerce::ids::{OrderId, ProductId, UserId};
use velvet_commerce::orders::Order;
use velvet_commerce::users::User;

/// Read access to the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look up a product by ID.
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError>;
}

/// Read access to user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user by ID.
    async fn user(&self, id: &UserId) -> Result<Option<User>, CommerceError>;

    /// Existence probe for callers that only need the check.
    async fn user_exists(&self, id: &UserId) -> Result<bool, CommerceError>;
}

/// Persistence for shopping carts, keyed by owner.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Load a user's cart.
    ///
    /// Returns an owned copy: callers mutate or checkout against a stable
    /// snapshot, and nothing they do takes effect until [`save`] or an order
    /// commit writes it back.
    ///
    /// [`save`]: CartRepository::save
    async fn cart_for_user(&self, user_id: &UserId) -> Result<Option<Cart>, CommerceError>;

    /// Insert or replace a cart under its owner's key.
    async fn save(&self, cart: &Cart) -> Result<(), CommerceError>;
}

/// The authoritative stock count, with conditional decrement.
///
/// This is the only interface allowed to change stock levels. Reads of
/// `Product::stock` anywhere else are advisory.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Atomically decrement a product's stock by `quantity` if at least that
    /// many units remain.
    ///
    /// Returns `Ok(true)` when the decrement happened and `Ok(false)` when
    /// stock was insufficient. Two racing reservations can never both
    /// succeed past the available count.
    async fn try_reserve(&self, product_id: &ProductId, quantity: i64)
        -> Result<bool, CommerceError>;

    /// Give back a prior reservation.
    ///
    /// Only called to compensate a checkout attempt that reserved and then
    /// failed, so `quantity` always matches an earlier successful reserve.
    async fn release(&self, product_id: &ProductId, quantity: i64) -> Result<(), CommerceError>;

    /// Advisory read of the current available count.
    async fn available(&self, product_id: &ProductId) -> Result<i64, CommerceError>;
}

/// Persistence for placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order and clear the checked-out lines from the owner's
    /// live cart, as one unit of work: both writes land or neither does.
    ///
    /// Only the lines present in `checked_out` are cleared; anything the
    /// shopper added to the live cart after that snapshot was taken stays.
    async fn create(&self, order: Order, checked_out: &Cart) -> Result<Order, CommerceError>;

    /// Fetch a stored order by ID.
    async fn order(&self, id: &OrderId) -> Result<Option<Order>, CommerceError>;

    /// All orders placed by a user, newest first.
    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, CommerceError>;
}
