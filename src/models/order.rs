//! Diesel models for orders and their product links.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client as DomainClient;
use crate::domain::order::Order as DomainOrder;
use crate::domain::product::Product as DomainProduct;
use crate::domain::types::{OrderId, OrderStatus, TypeConstraintError};
use crate::models::{format_timestamp, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(primary_key(order_id))]
pub struct Order {
    pub order_id: i32,
    pub client_id: i32,
    pub order_date: String,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub client_id: i32,
    pub order_date: String,
    pub status: &'a str,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Identifiable, Queryable, Insertable, Serialize, Deserialize,
)]
#[diesel(table_name = crate::schema::order_products)]
#[diesel(primary_key(order_id, product_id))]
/// Join row linking an order to one of its products.
pub struct OrderProduct {
    pub order_id: i32,
    pub product_id: i32,
}

impl Order {
    /// Assembles the domain order from this row and its resolved relations.
    pub fn into_domain(
        self,
        client: DomainClient,
        products: Vec<DomainProduct>,
    ) -> Result<DomainOrder, TypeConstraintError> {
        Ok(DomainOrder {
            id: Some(OrderId::try_from(self.order_id)?),
            client,
            products,
            order_date: parse_timestamp(&self.order_date)?,
            status: OrderStatus::new(self.status)?,
        })
    }
}

impl<'a> NewOrder<'a> {
    /// Insertable for `order`, owned by the already persisted client `client_id`.
    pub fn from_domain(order: &'a DomainOrder, client_id: i32) -> Self {
        Self {
            client_id,
            order_date: format_timestamp(&order.order_date),
            status: order.status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::ContactInfo;
    use crate::domain::types::ClientAddress;

    fn client() -> DomainClient {
        DomainClient::new(
            ContactInfo::try_new("Ann", "Lee", "ann@example.com", "+12345678901")
                .expect("valid contact"),
            ClientAddress::new("1 Main St").expect("valid address"),
        )
    }

    #[test]
    fn row_into_domain_keeps_status_and_date() {
        let row = Order {
            order_id: 9,
            client_id: 1,
            order_date: "2024-02-29T10:00:00".to_string(),
            status: "Shipped".to_string(),
        };
        let order = row.into_domain(client(), Vec::new()).expect("valid row");
        assert_eq!(order.id.map(OrderId::get), Some(9));
        assert_eq!(order.status.as_str(), "Shipped");
        assert_eq!(format_timestamp(&order.order_date), "2024-02-29T10:00:00");
    }

    #[test]
    fn empty_status_is_rejected() {
        let row = Order {
            order_id: 1,
            client_id: 1,
            order_date: "2024-02-29T10:00:00".to_string(),
            status: " ".to_string(),
        };
        assert!(matches!(
            row.into_domain(client(), Vec::new()),
            Err(TypeConstraintError::EmptyString)
        ));
    }

    #[test]
    fn insertable_uses_given_client_id() {
        let order = DomainOrder::new(client(), Vec::new());
        let new = NewOrder::from_domain(&order, 42);
        assert_eq!(new.client_id, 42);
        assert_eq!(new.status, "Created");
        assert_eq!(new.order_date, format_timestamp(&order.order_date));
    }
}
