use serde::{Deserialize, Serialize};

use crate::domain::types::{Price, ProductId, ProductName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
}

impl Product {
    /// Creates an unsaved product. Blank descriptions are stored as absent.
    #[must_use]
    pub fn new(name: ProductName, description: Option<String>, price: Price) -> Self {
        Self {
            id: None,
            name,
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_becomes_none() {
        let product = Product::new(
            ProductName::new("Mug").expect("valid name"),
            Some("   ".to_string()),
            Price::new(3.5).expect("valid price"),
        );
        assert!(product.id.is_none());
        assert_eq!(product.description, None);
    }
}
