use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::domain::types::{OrderId, OrderStatus};

/// A purchase made by a client.
///
/// The total is derived from the products on demand and never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Option<OrderId>,
    pub client: Client,
    pub products: Vec<Product>,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
}

impl Order {
    /// Creates an unsaved order dated now with the default status.
    #[must_use]
    pub fn new(client: Client, products: Vec<Product>) -> Self {
        Self::with_status(client, products, OrderStatus::default())
    }

    #[must_use]
    pub fn with_status(client: Client, products: Vec<Product>, status: OrderStatus) -> Self {
        Self {
            id: None,
            client,
            products,
            order_date: Utc::now().naive_utc(),
            status,
        }
    }

    /// Sum of the prices of every product in the order.
    pub fn calc_total(&self) -> f64 {
        self.products.iter().map(|p| p.price.get()).sum()
    }

    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }
}

/// Field used by [`sort_orders`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OrderSortKey {
    #[default]
    Date,
    Amount,
}

/// Returns the orders sorted by date or total amount. The sort is stable.
pub fn sort_orders(mut orders: Vec<Order>, key: OrderSortKey, reverse: bool) -> Vec<Order> {
    match key {
        OrderSortKey::Date => orders.sort_by_key(|o| o.order_date),
        OrderSortKey::Amount => orders.sort_by(|a, b| a.calc_total().total_cmp(&b.calc_total())),
    }
    if reverse {
        orders.reverse();
    }
    orders
}
