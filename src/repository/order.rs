//! Repository implementation for orders and their product links.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        client::Client,
        order::Order,
        product::Product,
        types::{OrderId, ProductId},
    },
    models::{
        client::Client as DbClient,
        order::{NewOrder as DbNewOrder, Order as DbOrder, OrderProduct as DbOrderProduct},
        product::Product as DbProduct,
    },
    repository::{
        DieselRepository, OrderReader, OrderWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn load_order_products(
    conn: &mut SqliteConnection,
    order_id: i32,
) -> RepositoryResult<Vec<Product>> {
    use crate::schema::{order_products, products};

    products::table
        .inner_join(order_products::table)
        .filter(order_products::order_id.eq(order_id))
        .select(DbProduct::as_select())
        .load::<DbProduct>(conn)?
        .into_iter()
        .map(|row| Product::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn load_client(conn: &mut SqliteConnection, client_id: i32) -> RepositoryResult<Option<Client>> {
    use crate::schema::clients;

    clients::table
        .find(client_id)
        .first::<DbClient>(conn)
        .optional()?
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .transpose()
}

impl OrderReader for DieselRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let rows = orders::table
            .order(orders::order_id.asc())
            .load::<DbOrder>(&mut conn)?;

        // One lookup for the client and one for the products per order.
        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let client = load_client(&mut conn, row.client_id)?.ok_or_else(|| {
                RepositoryError::ConstraintViolation(format!(
                    "order {} references missing client {}",
                    row.order_id, row.client_id
                ))
            })?;
            let products = load_order_products(&mut conn, row.order_id)?;
            result.push(row.into_domain(client, products)?);
        }

        Ok(result)
    }

    fn list_order_products(&self, order_id: OrderId) -> RepositoryResult<Vec<Product>> {
        let mut conn = self.conn()?;
        load_order_products(&mut conn, order_id.get())
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, order: &mut Order) -> RepositoryResult<OrderId> {
        use crate::schema::{order_products, orders};

        let client_id = order.client.id.ok_or_else(|| {
            RepositoryError::ValidationError("order client must be saved first".to_string())
        })?;
        let product_ids = order
            .products
            .iter()
            .map(|product| {
                product.id.ok_or_else(|| {
                    RepositoryError::ValidationError(format!(
                        "product '{}' must be saved first",
                        product.name
                    ))
                })
            })
            .collect::<RepositoryResult<Vec<ProductId>>>()?;

        let mut conn = self.conn()?;
        let new_order = DbNewOrder::from_domain(order, client_id.get());

        let raw_id = conn.transaction::<i32, diesel::result::Error, _>(move |conn| {
            let order_id = diesel::insert_into(orders::table)
                .values(&new_order)
                .returning(orders::order_id)
                .get_result::<i32>(conn)?;

            let links = product_ids
                .iter()
                .map(|product_id| DbOrderProduct {
                    order_id,
                    product_id: product_id.get(),
                })
                .collect::<Vec<_>>();

            if !links.is_empty() {
                diesel::insert_into(order_products::table)
                    .values(&links)
                    .execute(conn)?;
            }

            Ok(order_id)
        })?;

        let id = OrderId::try_from(raw_id)?;
        order.id = Some(id);
        Ok(id)
    }
}
