use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product as DomainProduct;
use crate::domain::types::{Price, ProductId, ProductName, TypeConstraintError};

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::products)]
#[diesel(primary_key(product_id))]
/// Row of the `products` table.
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ProductId::try_from(product.product_id)?),
            name: ProductName::new(product.name)?,
            description: product.description,
            price: Price::new(product.price)?,
        })
    }
}

impl<'a> From<&'a DomainProduct> for NewProduct<'a> {
    fn from(product: &'a DomainProduct) -> Self {
        Self {
            name: product.name.as_str(),
            description: product.description.as_deref(),
            price: product.price.get(),
        }
    }
}
