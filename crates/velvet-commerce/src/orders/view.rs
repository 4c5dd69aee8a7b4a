//! Read-side order views.

use crate::catalog::Product;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use crate::money::Money;
use crate::orders::{Order, OrderItem, OrderStatus};
use serde::{Deserialize, Serialize};

/// An order ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderView {
    /// Order identifier.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Display name of the user, if the account still exists.
    pub user_name: Option<String>,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Persisted order total. Never recomputed from the lines.
    pub total: Money,
    /// Unix timestamp of placement.
    pub created_at: i64,
    /// Display lines.
    pub items: Vec<OrderItemView>,
}

impl OrderView {
    /// Assemble a view from an order and its already-resolved lines.
    pub fn new(order: &Order, user_name: Option<String>, items: Vec<OrderItemView>) -> Self {
        Self {
            id: order.id.clone(),
            user_id: order.user_id.clone(),
            user_name,
            status: order.status,
            total: order.total,
            created_at: order.created_at,
            items,
        }
    }
}

/// One order line ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemView {
    /// Line identifier.
    pub id: OrderItemId,
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Product that was purchased.
    pub product_id: ProductId,
    /// Product name, if still in the catalog.
    pub product_name: Option<String>,
    /// Product image, if still in the catalog.
    pub product_image_url: Option<String>,
    /// Unit price paid.
    pub unit_price: Money,
    /// Quantity purchased.
    pub quantity: i64,
    /// Subtotal paid for the line.
    pub subtotal: Money,
}

impl OrderItemView {
    /// Resolve one order line against the catalog product, if found.
    pub fn new(order: &Order, item: &OrderItem, product: Option<&Product>) -> Self {
        Self {
            id: item.id.clone(),
            order_id: order.id.clone(),
            product_id: item.product_id.clone(),
            product_name: product.map(|p| p.name.clone()),
            product_image_url: product.and_then(|p| p.image_url.clone()),
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::ids::CategoryId;
    use crate::money::Currency;

    fn placed_order() -> (Order, Product) {
        let product = Product::new(
            "Facial Moisturizer",
            Money::new(4599, Currency::USD),
            75,
            CategoryId::new("cat-skincare"),
        );

        let mut cart = Cart::new(UserId::new("user-1"), Currency::USD);
        cart.add_item(product.id.clone(), 2, product.price).unwrap();

        let items = cart
            .items
            .iter()
            .map(OrderItem::from_cart_item)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let order = Order::pending(cart.user_id.clone(), cart.currency, items).unwrap();
        (order, product)
    }

    #[test]
    fn test_order_view_fields() {
        let (order, product) = placed_order();
        let lines = order
            .items
            .iter()
            .map(|i| OrderItemView::new(&order, i, Some(&product)))
            .collect();
        let view = OrderView::new(&order, Some("Ana Souza".to_string()), lines);

        assert_eq!(view.id, order.id);
        assert_eq!(view.user_name.as_deref(), Some("Ana Souza"));
        assert_eq!(view.total, Money::new(9198, Currency::USD));
        assert_eq!(view.items[0].order_id, order.id);
        assert_eq!(view.items[0].product_name.as_deref(), Some("Facial Moisturizer"));
    }

    #[test]
    fn test_order_view_total_is_the_persisted_one() {
        let (mut order, _) = placed_order();
        // Even if a line were tampered with afterwards, the view reports the
        // total recorded at checkout.
        order.items[0].subtotal = Money::new(1, Currency::USD);
        let view = OrderView::new(&order, None, Vec::new());
        assert_eq!(view.total, Money::new(9198, Currency::USD));
    }

    #[test]
    fn test_order_view_serializes_status_as_string() {
        let (order, _) = placed_order();
        let view = OrderView::new(&order, None, Vec::new());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["user_name"], serde_json::Value::Null);
    }
}
