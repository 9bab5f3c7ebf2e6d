use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::types::OrderId;
use crate::forms::order::{AddOrderForm, AddOrderPayload};
use crate::repository::{ClientReader, OrderReader, OrderWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Resolves the client and products named by the form and places the order.
pub fn create_order<R>(repo: &R, form: AddOrderForm) -> ServiceResult<Order>
where
    R: ClientReader + ProductReader + OrderWriter + ?Sized,
{
    let payload = AddOrderPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate order form: {err}");
        ServiceError::from(err)
    })?;

    let client = repo.get_client_by_id(payload.client_id)?.ok_or_else(|| {
        log::error!("Client {} not found for new order", payload.client_id);
        ServiceError::NotFound
    })?;

    let mut products = Vec::with_capacity(payload.product_ids.len());
    for product_id in &payload.product_ids {
        let product = repo.get_product_by_id(*product_id)?.ok_or_else(|| {
            log::error!("Product {product_id} not found for new order");
            ServiceError::NotFound
        })?;
        products.push(product);
    }

    let mut order = Order::with_status(client, products, payload.status);
    repo.create_order(&mut order).map_err(|err| {
        log::error!("Failed to create order: {err}");
        err
    })?;

    Ok(order)
}

pub fn list_orders<R>(repo: &R) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    repo.list_orders().map_err(|err| {
        log::error!("Failed to load orders: {err}");
        ServiceError::from(err)
    })
}

pub fn list_order_products<R>(repo: &R, order_id: i32) -> ServiceResult<Vec<Product>>
where
    R: OrderReader + ?Sized,
{
    let order_id = OrderId::new(order_id)?;
    Ok(repo.list_order_products(order_id)?)
}
