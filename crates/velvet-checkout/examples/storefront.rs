//! End-to-end walk through the storefront: seed, fill a cart, check out.
//!
//! Run with logs:
//!
//! ```bash
//! RUST_LOG=debug cargo run --example storefront
//! ```

use std::sync::Arc;

use velvet_checkout::{CartService, CheckoutEngine};
use velvet_commerce::{ProductId, UserId};
use velvet_store::MemoryStore;

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let store = Arc::new(MemoryStore::new());
    store.seed_demo()?;

    let carts = CartService::new(store.clone(), store.clone(), store.clone());
    let engine = CheckoutEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );

    let shopper = UserId::new("user-admin");
    carts
        .add_item(&shopper, &ProductId::new("prod-floral-perfume"), 2)
        .await?;
    let cart = carts
        .add_item(&shopper, &ProductId::new("prod-red-lipstick"), 1)
        .await?;

    println!("cart for {}:", shopper);
    for line in &cart.items {
        println!(
            "  {} x{} @ {} = {}",
            line.product_name.as_deref().unwrap_or("(unknown)"),
            line.quantity,
            line.unit_price,
            line.subtotal,
        );
    }
    println!("cart total: {}", cart.total);

    let order = engine.checkout(&shopper).await?;
    println!(
        "placed order {} ({}): {} across {} lines",
        order.id,
        order.status.as_str(),
        order.total,
        order.items.len(),
    );

    let history = engine.order_history(&shopper).await?;
    println!("order history now holds {} order(s)", history.len());

    Ok(())
}
