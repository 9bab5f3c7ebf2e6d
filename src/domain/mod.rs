//! Domain entities of the shop: clients, products and orders.

pub mod client;
pub mod order;
pub mod person;
pub mod product;
pub mod types;
