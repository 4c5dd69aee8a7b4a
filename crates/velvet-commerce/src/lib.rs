//! Commerce domain types for the Velvet storefront.
//!
//! This crate holds the pure domain model shared by the storage and checkout
//! layers:
//!
//! - **Catalog**: Products and categories
//! - **Users**: Registered shoppers
//! - **Cart**: One mutable cart per user, with price snapshots per line
//! - **Orders**: Immutable order records materialized at checkout
//! - **Money**: Cent-precision amounts with checked arithmetic
//!
//! # Example
//!
//! ```rust
//! use velvet_commerce::prelude::*;
//!
//! let product_id = ProductId::generate();
//! let mut cart = Cart::new(UserId::generate(), Currency::USD);
//!
//! cart.add_item(product_id.clone(), 2, Money::new(1000, Currency::USD))?;
//! cart.add_item(product_id, 1, Money::new(1000, Currency::USD))?;
//!
//! assert_eq!(cart.items.len(), 1);
//! assert_eq!(cart.items[0].quantity, 3);
//! assert_eq!(cart.total()?, Money::new(3000, Currency::USD));
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod users;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product};

    // Users
    pub use crate::users::User;

    // Cart
    pub use crate::cart::{Cart, CartItem, CartItemView, CartView};

    // Orders
    pub use crate::orders::{Order, OrderItem, OrderItemView, OrderStatus, OrderView};
}
