//! Storage layer for the Velvet storefront.
//!
//! The checkout and cart services are written against the repository traits
//! in this crate, not against any concrete database. [`MemoryStore`] is the
//! in-process implementation used for development and tests; it honors the
//! same atomicity contracts a durable backend would:
//!
//! - stock reservations are conditional check-and-decrement, linearizable
//!   per product
//! - order creation and the matching cart cleanup commit as one unit of work
//! - loading a cart hands back an owned copy, so a checkout attempt works on
//!   a stable snapshot
//!
//! # Example
//!
//! ```rust
//! use velvet_store::{MemoryStore, StockLedger};
//! # async fn demo() -> Result<(), velvet_commerce::CommerceError> {
//!
//! let store = MemoryStore::new();
//! store.seed_demo()?;
//!
//! let floral = velvet_commerce::ProductId::new("prod-floral-perfume");
//! assert!(store.try_reserve(&floral, 2).await?);
//! assert_eq!(store.available(&floral).await?, 48);
//! # Ok(())
//! # }
//! ```

mod memory;
mod seed;
mod traits;

pub use memory::MemoryStore;
pub use traits::{Catalog, CartRepository, OrderRepository, StockLedger, UserDirectory};
