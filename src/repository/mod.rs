use std::path::Path;

use crate::{
    db::{DbConnection, DbPool, ensure_schema, get_connection},
    domain::{
        client::{Client, UpdateClient},
        order::Order,
        product::Product,
        types::{ClientId, OrderId, ProductId},
    },
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod order;
pub mod product;
pub mod transfer;

pub use transfer::{TableTransfer, TransferReport};

/// Diesel-backed store used by every reader and writer trait below.
///
/// Each operation checks a connection out of the pool and returns it when done;
/// no state is shared between calls.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }

    /// Creates missing tables. Hosts call this once before any other operation.
    pub fn ensure_schema(&self) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        ensure_schema(&mut conn)?;
        Ok(())
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Every client in insertion order.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    /// Case-insensitive substring match over name, email, phone and address,
    /// ordered by last name then first name.
    fn search_clients(&self, text: &str) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    /// Inserts the client, stores the assigned id into it and returns the id.
    fn create_client(&self, client: &mut Client) -> RepositoryResult<ClientId>;
    /// Returns the number of rows changed; `0` when the id is unknown.
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<usize>;
    /// Returns the number of rows removed; `0` when the id is unknown.
    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<usize>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, product: &mut Product) -> RepositoryResult<ProductId>;
    fn delete_product(&self, product_id: ProductId) -> RepositoryResult<usize>;
}

pub trait OrderReader {
    /// Every order with its client and products resolved.
    fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    fn list_order_products(&self, order_id: OrderId) -> RepositoryResult<Vec<Product>>;
}

pub trait OrderWriter {
    /// Inserts the order and one link row per product in a single transaction.
    fn create_order(&self, order: &mut Order) -> RepositoryResult<OrderId>;
}

/// Whole-table CSV export and import, one `{base}_{table}.csv` file per table.
pub trait BulkTransfer {
    fn export_to_csv(&self, base: &Path) -> RepositoryResult<TransferReport>;
    fn import_from_csv(&self, base: &Path) -> RepositoryResult<TransferReport>;
}
