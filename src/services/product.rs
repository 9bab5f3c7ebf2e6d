use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::forms::product::AddProductForm;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Validates the add-product form and persists the product.
pub fn add_product<R>(repo: &R, form: &AddProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let mut product = form.to_product().map_err(|err| {
        log::error!("Failed to validate product form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_product(&mut product).map_err(|err| {
        log::error!("Failed to add a product: {err}");
        err
    })?;

    Ok(product)
}

pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products().map_err(|err| {
        log::error!("Failed to load products: {err}");
        ServiceError::from(err)
    })
}

/// Removes a product. Fails with [`ServiceError::Conflict`] while orders contain it.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id)?;

    let affected = repo.delete_product(product_id).map_err(|err| {
        log::error!("Failed to delete product {product_id}: {err}");
        err
    })?;

    if affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
