//! Cart operations and checkout for the Velvet storefront.
//!
//! Two entry points live here:
//!
//! - [`CartService`]: the mutable side. Add, re-quantity, remove and clear
//!   cart lines, with advisory stock checks that catch obvious mistakes
//!   early but reserve nothing.
//! - [`CheckoutEngine`]: the cart-to-order conversion. Validates, reserves
//!   stock atomically per product, and materializes the order; any failure
//!   after a partial reservation releases what was taken.
//!
//! Both are wired with the repository traits from `velvet-store`, so tests
//! and deployments choose the backing store.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use velvet_checkout::{CartService, CheckoutEngine};
//! use velvet_store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! store.seed_demo()?;
//!
//! let carts = CartService::new(store.clone(), store.clone(), store.clone());
//! let engine = CheckoutEngine::new(
//!     store.clone(),
//!     store.clone(),
//!     store.clone(),
//!     store.clone(),
//!     store.clone(),
//! );
//!
//! let user = velvet_commerce::UserId::new("user-admin");
//! carts.add_item(&user, &"prod-floral-perfume".into(), 2).await?;
//! let order = engine.checkout(&user).await?;
//! println!("placed {} for {}", order.id, order.total);
//! ```

mod engine;
mod service;

pub use engine::{CheckoutEngine, CheckoutPhase};
pub use service::CartService;
