//! Operations used by the presentation and reporting layers.
//!
//! Each function validates its input, calls the repository, logs failures and
//! maps them to [`ServiceError`].

pub mod analytics;
pub mod client;
pub mod errors;
pub mod order;
pub mod product;
pub mod transfer;

pub use errors::{ServiceError, ServiceResult};
