use serde::Deserialize;
use validator::Validate;

use crate::domain::product::Product;
use crate::domain::types::{Price, ProductName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a product to the catalogue.
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw price as typed by the user.
    pub price: String,
}

impl AddProductForm {
    pub fn to_product(&self) -> Result<Product, FormError> {
        let price = self.price.parse::<Price>()?;
        self.validate()?;
        let name = ProductName::new(self.name.as_str())?;
        Ok(Product::new(name, self.description.clone(), price))
    }
}
