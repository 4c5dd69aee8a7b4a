//! In-memory store for development and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use velvet_commerce::cart::Cart;
use velvet_commerce::catalog::{Category, Product};
use velvet_commerce::error::CommerceError;
use velvet_commerce::ids::{CategoryId, OrderId, ProductId, UserId};
use velvet_commerce::orders::Order;
use velvet_commerce::users::User;

use crate::traits::{Catalog, CartRepository, OrderRepository, StockLedger, UserDirectory};

/// All tables behind one mutex.
///
/// A single lock is what makes the multi-table writes (order insert plus
/// cart cleanup) a unit of work, and the stock check-and-decrement
/// linearizable per product.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
    carts: HashMap<UserId, Cart>,
    orders: HashMap<OrderId, Order>,
}

/// In-memory implementation of every repository trait.
///
/// Reads hand out owned clones, never references into the tables, so the
/// lock is held only for the duration of each call and never across an
/// await point.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, CommerceError> {
        self.tables
            .lock()
            .map_err(|_| CommerceError::Persistence("store mutex poisoned".to_string()))
    }

    /// Insert or replace a user.
    pub fn insert_user(&self, user: User) -> Result<(), CommerceError> {
        self.tables()?.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Insert or replace a category.
    pub fn insert_category(&self, category: Category) -> Result<(), CommerceError> {
        self.tables()?
            .categories
            .insert(category.id.clone(), category);
        Ok(())
    }

    /// Insert or replace a product.
    pub fn insert_product(&self, product: Product) -> Result<(), CommerceError> {
        self.tables()?.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Replace an existing product row.
    ///
    /// Fails with `ProductNotFound` if the product was never inserted.
    pub fn update_product(&self, product: Product) -> Result<(), CommerceError> {
        let mut tables = self.tables()?;
        if !tables.products.contains_key(&product.id) {
            return Err(CommerceError::ProductNotFound(product.id.to_string()));
        }
        tables.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Remove a product row. Returns whether anything was removed.
    ///
    /// Fails with `ProductInUse` while any placed order references the
    /// product; order items are historical fact and must keep resolving.
    /// Cart lines are only snapshots, so a carted product can go away —
    /// views render its fields as absent and checkout rejects it.
    pub fn delete_product(&self, id: &ProductId) -> Result<bool, CommerceError> {
        let mut tables = self.tables()?;
        let referenced = tables
            .orders
            .values()
            .any(|order| order.items.iter().any(|item| &item.product_id == id));
        if referenced {
            return Err(CommerceError::ProductInUse(id.to_string()));
        }
        Ok(tables.products.remove(id).is_some())
    }

    /// Look up a category by ID.
    pub fn category(&self, id: &CategoryId) -> Result<Option<Category>, CommerceError> {
        Ok(self.tables()?.categories.get(id).cloned())
    }

    /// Number of stored orders, across all users.
    pub fn order_count(&self) -> Result<usize, CommerceError> {
        Ok(self.tables()?.orders.len())
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        Ok(self.tables()?.products.get(id).cloned())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn user(&self, id: &UserId) -> Result<Option<User>, CommerceError> {
        Ok(self.tables()?.users.get(id).cloned())
    }

    async fn user_exists(&self, id: &UserId) -> Result<bool, CommerceError> {
        Ok(self.tables()?.users.contains_key(id))
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn cart_for_user(&self, user_id: &UserId) -> Result<Option<Cart>, CommerceError> {
        Ok(self.tables()?.carts.get(user_id).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.tables()?
            .carts
            .insert(cart.user_id.clone(), cart.clone());
        Ok(())
    }
}

#[async_trait]
impl StockLedger for MemoryStore {
    async fn try_reserve(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let mut tables = self.tables()?;
        let product = tables
            .products
            .get_mut(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;

        if product.stock < quantity {
            return Ok(false);
        }
        // Check and decrement under the same lock acquisition.
        product.stock -= quantity;
        Ok(true)
    }

    async fn release(&self, product_id: &ProductId, quantity: i64) -> Result<(), CommerceError> {
        let mut tables = self.tables()?;
        let product = tables
            .products
            .get_mut(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        product.stock += quantity;
        Ok(())
    }

    async fn available(&self, product_id: &ProductId) -> Result<i64, CommerceError> {
        let tables = self.tables()?;
        let product = tables
            .products
            .get(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        Ok(product.stock)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: Order, checked_out: &Cart) -> Result<Order, CommerceError> {
        let mut tables = self.tables()?;
        if let Some(cart) = tables.carts.get_mut(&order.user_id) {
            cart.remove_items_of(checked_out);
        }
        tables.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn order(&self, id: &OrderId) -> Result<Option<Order>, CommerceError> {
        Ok(self.tables()?.orders.get(id).cloned())
    }

    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, CommerceError> {
        let tables = self.tables()?;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        // Generated IDs grow over time, which breaks the tie when two orders
        // land in the same second.
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use velvet_commerce::money::{Currency, Money};
    use velvet_commerce::orders::OrderItem;

    fn product(id: &str, stock: i64) -> Product {
        let mut p = Product::new(
            format!("Product {id}"),
            Money::new(1000, Currency::USD),
            stock,
            CategoryId::new("cat-1"),
        );
        p.id = ProductId::new(id);
        p
    }

    fn cart_with(user: &str, product_id: &str, quantity: i64) -> Cart {
        let mut cart = Cart::new(UserId::new(user), Currency::USD);
        cart.add_item(
            ProductId::new(product_id),
            quantity,
            Money::new(1000, Currency::USD),
        )
        .unwrap();
        cart
    }

    fn order_for(cart: &Cart) -> Order {
        let items: Vec<OrderItem> = cart
            .items
            .iter()
            .map(OrderItem::from_cart_item)
            .collect::<Result<_, _>>()
            .unwrap();
        Order::pending(cart.user_id.clone(), cart.currency, items).unwrap()
    }

    #[tokio::test]
    async fn test_reserve_boundary() {
        let store = MemoryStore::new();
        store.insert_product(product("prod-1", 5)).unwrap();
        let id = ProductId::new("prod-1");

        assert!(store.try_reserve(&id, 5).await.unwrap());
        assert_eq!(store.available(&id).await.unwrap(), 0);
        assert!(!store.try_reserve(&id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_reserve_unknown_product() {
        let store = MemoryStore::new();
        let err = store
            .try_reserve(&ProductId::new("ghost"), 1)
            .await
            .unwrap_err();
        assert_eq!(err, CommerceError::ProductNotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_reserve_rejects_non_positive_quantity() {
        let store = MemoryStore::new();
        store.insert_product(product("prod-1", 5)).unwrap();
        let err = store
            .try_reserve(&ProductId::new("prod-1"), 0)
            .await
            .unwrap_err();
        assert_eq!(err, CommerceError::InvalidQuantity(0));
    }

    #[tokio::test]
    async fn test_release_restores_stock() {
        let store = MemoryStore::new();
        store.insert_product(product("prod-1", 5)).unwrap();
        let id = ProductId::new("prod-1");

        assert!(store.try_reserve(&id, 3).await.unwrap());
        store.release(&id, 3).await.unwrap();
        assert_eq!(store.available(&id).await.unwrap(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_reserves_never_oversell() {
        let store = Arc::new(MemoryStore::new());
        store.insert_product(product("prod-1", 10)).unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.try_reserve(&ProductId::new("prod-1"), 1).await
            }));
        }

        let mut granted = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                granted += 1;
            }
        }

        assert_eq!(granted, 10);
        assert_eq!(
            store.available(&ProductId::new("prod-1")).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_cart_load_returns_a_copy() {
        let store = MemoryStore::new();
        let cart = cart_with("user-1", "prod-1", 2);
        store.save(&cart).await.unwrap();

        let mut loaded = store
            .cart_for_user(&UserId::new("user-1"))
            .await
            .unwrap()
            .unwrap();
        loaded.clear();

        // Mutating the copy leaves the stored cart alone until saved back.
        let reloaded = store
            .cart_for_user(&UserId::new("user-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.items.len(), 1);
    }

    #[tokio::test]
    async fn test_create_order_clears_only_snapshot_lines() {
        let store = MemoryStore::new();
        let user_id = UserId::new("user-1");

        let mut cart = cart_with("user-1", "prod-a", 2);
        store.save(&cart).await.unwrap();
        let snapshot = cart.clone();

        // The shopper keeps shopping while checkout is in flight.
        cart.add_item(
            ProductId::new("prod-b"),
            1,
            Money::new(500, Currency::USD),
        )
        .unwrap();
        store.save(&cart).await.unwrap();

        let order = store.create(order_for(&snapshot), &snapshot).await.unwrap();

        assert!(store.order(&order.id).await.unwrap().is_some());
        let remaining = store.cart_for_user(&user_id).await.unwrap().unwrap();
        assert_eq!(remaining.items.len(), 1);
        assert_eq!(remaining.items[0].product_id, ProductId::new("prod-b"));
    }

    #[tokio::test]
    async fn test_orders_for_user_newest_first() {
        let store = MemoryStore::new();
        let user_id = UserId::new("user-1");

        let first_cart = cart_with("user-1", "prod-a", 1);
        let first = store
            .create(order_for(&first_cart), &first_cart)
            .await
            .unwrap();
        let second_cart = cart_with("user-1", "prod-b", 1);
        let second = store
            .create(order_for(&second_cart), &second_cart)
            .await
            .unwrap();

        // A different user's order stays out of the listing.
        let other_cart = cart_with("user-2", "prod-c", 1);
        store
            .create(order_for(&other_cart), &other_cart)
            .await
            .unwrap();

        let orders = store.orders_for_user(&user_id).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let store = MemoryStore::new();
        let user = User::new("Ana Souza", "ana@example.com");
        let id = user.id.clone();
        store.insert_user(user).unwrap();

        assert!(store.user_exists(&id).await.unwrap());
        assert_eq!(store.user(&id).await.unwrap().unwrap().name, "Ana Souza");
        assert!(!store.user_exists(&UserId::new("ghost")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_product_refuses_while_orders_reference_it() {
        let store = MemoryStore::new();
        store.insert_product(product("prod-1", 5)).unwrap();
        store.insert_product(product("prod-2", 5)).unwrap();

        let cart = cart_with("user-1", "prod-1", 1);
        store.create(order_for(&cart), &cart).await.unwrap();

        let err = store.delete_product(&ProductId::new("prod-1")).unwrap_err();
        assert_eq!(err, CommerceError::ProductInUse("prod-1".to_string()));
        assert!(store
            .product(&ProductId::new("prod-1"))
            .await
            .unwrap()
            .is_some());

        // A product no order mentions can go, and a second delete is a no-op.
        assert!(store.delete_product(&ProductId::new("prod-2")).unwrap());
        assert!(!store.delete_product(&ProductId::new("prod-2")).unwrap());
    }

    #[tokio::test]
    async fn test_update_product_requires_existing_row() {
        let store = MemoryStore::new();
        let err = store.update_product(product("prod-1", 5)).unwrap_err();
        assert!(err.is_not_found());

        store.insert_product(product("prod-1", 5)).unwrap();
        let mut updated = product("prod-1", 5);
        updated.set_price(Money::new(2000, Currency::USD));
        store.update_product(updated).unwrap();

        let loaded = store
            .product(&ProductId::new("prod-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.price, Money::new(2000, Currency::USD));
    }
}
