//! Persistence and domain layer of the online shop back office.
//!
//! Hosts open a pool with [`db::establish_connection_pool`], wrap it in a
//! [`repository::DieselRepository`] and call
//! [`repository::DieselRepository::ensure_schema`] once before anything else.
//! The presentation and reporting layers go through [`services`].

pub mod db;
pub mod domain;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
