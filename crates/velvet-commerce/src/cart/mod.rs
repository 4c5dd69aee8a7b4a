//! Shopping cart module.
//!
//! One mutable cart per user, plus the read-side views the API layer serves.

mod cart;
mod view;

pub use cart::{Cart, CartItem};
pub use view::{CartItemView, CartView};
