//! Product catalog module.
//!
//! Products and the flat categories they belong to.

mod category;
mod product;

pub use category::Category;
pub use product::Product;
