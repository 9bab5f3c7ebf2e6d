//! Form definitions backing the shop screens.

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod order;
pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("price must be a non-negative number")]
    InvalidPrice,

    #[error("invalid id")]
    InvalidId,

    #[error("required field is empty")]
    EmptyField,

    #[error("invalid value: {0}")]
    Invalid(String),
}
