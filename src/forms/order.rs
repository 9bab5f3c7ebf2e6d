//! Forms for placing orders.

use serde::Deserialize;

use crate::{
    domain::types::{ClientId, OrderStatus, ProductId},
    forms::FormError,
};

/// Form capturing the client and the selected products of a new order.
#[derive(Debug, Deserialize)]
pub struct AddOrderForm {
    pub client_id: i32,
    #[serde(default)]
    pub product_ids: Vec<i32>,
    /// Blank or missing means the default status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Parsed order request, ready for the service layer.
#[derive(Debug, PartialEq)]
pub struct AddOrderPayload {
    pub client_id: ClientId,
    pub product_ids: Vec<ProductId>,
    pub status: OrderStatus,
}

impl TryFrom<AddOrderForm> for AddOrderPayload {
    type Error = FormError;

    fn try_from(form: AddOrderForm) -> Result<Self, Self::Error> {
        let client_id = ClientId::new(form.client_id)?;
        let product_ids = form
            .product_ids
            .into_iter()
            .map(ProductId::new)
            .collect::<Result<Vec<_>, _>>()?;
        let status = match form.status.as_deref().map(str::trim) {
            Some(status) if !status.is_empty() => OrderStatus::new(status)?,
            _ => OrderStatus::default(),
        };

        Ok(Self {
            client_id,
            product_ids,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_status_falls_back_to_default() {
        let payload = AddOrderPayload::try_from(AddOrderForm {
            client_id: 1,
            product_ids: vec![2, 3],
            status: Some("  ".to_string()),
        })
        .expect("valid form");
        assert_eq!(payload.status, OrderStatus::default());
        assert_eq!(payload.product_ids.len(), 2);
    }

    #[test]
    fn keeps_custom_status() {
        let payload = AddOrderPayload::try_from(AddOrderForm {
            client_id: 1,
            product_ids: Vec::new(),
            status: Some("Paid".to_string()),
        })
        .expect("valid form");
        assert_eq!(payload.status.as_str(), "Paid");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let result = AddOrderPayload::try_from(AddOrderForm {
            client_id: 1,
            product_ids: vec![4, 0],
            status: None,
        });
        assert!(matches!(result, Err(FormError::InvalidId)));
    }
}
