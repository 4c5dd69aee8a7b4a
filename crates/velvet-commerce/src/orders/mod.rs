//! Order module.
//!
//! Immutable order records produced by checkout, and their display views.

mod order;
mod view;

pub use order::{Order, OrderItem, OrderStatus};
pub use view::{OrderItemView, OrderView};
