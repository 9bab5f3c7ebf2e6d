//! CSV export and import of the whole store.
//!
//! Each table maps to `{base}_{table}.csv`: a header row with the column
//! names in table order, then one line per row. Import assigns fresh ids and
//! rewrites the foreign keys of `orders` and `order_products` to them, so
//! tables are always processed in dependency order.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    domain::{
        client::Client as DomainClient,
        product::Product as DomainProduct,
        types::{OrderId, OrderStatus, TypeConstraintError},
    },
    models::{
        client::{Client as DbClient, NewClient as DbNewClient},
        format_timestamp,
        order::{NewOrder as DbNewOrder, Order as DbOrder, OrderProduct as DbOrderProduct},
        parse_timestamp,
        product::{NewProduct as DbNewProduct, Product as DbProduct},
    },
    repository::{
        BulkTransfer, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

pub const CLIENTS_TABLE: &str = "clients";
pub const PRODUCTS_TABLE: &str = "products";
pub const ORDERS_TABLE: &str = "orders";
pub const ORDER_PRODUCTS_TABLE: &str = "order_products";

const CLIENT_COLUMNS: [&str; 7] = [
    "client_id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "address",
    "registration_date",
];
const PRODUCT_COLUMNS: [&str; 4] = ["product_id", "name", "description", "price"];
const ORDER_COLUMNS: [&str; 4] = ["order_id", "client_id", "order_date", "status"];
const ORDER_PRODUCT_COLUMNS: [&str; 2] = ["order_id", "product_id"];

/// Outcome of transferring a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTransfer {
    pub table: &'static str,
    pub path: PathBuf,
    /// Rows written on export or inserted on import.
    pub rows: usize,
    /// Set on import when the table file did not exist.
    pub skipped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub tables: Vec<TableTransfer>,
}

impl TransferReport {
    /// Rows transferred for `table`, `0` when it was skipped or unknown.
    pub fn rows(&self, table: &str) -> usize {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map_or(0, |t| t.rows)
    }

    /// Names of the tables whose file was missing.
    pub fn skipped(&self) -> Vec<&'static str> {
        self.tables
            .iter()
            .filter(|t| t.skipped)
            .map(|t| t.table)
            .collect()
    }

    fn push(&mut self, table: &'static str, path: PathBuf, rows: Option<usize>) {
        self.tables.push(TableTransfer {
            table,
            path,
            rows: rows.unwrap_or(0),
            skipped: rows.is_none(),
        });
    }
}

/// `{base}_{table}.csv`, built without assuming the base path is UTF-8.
pub fn table_path(base: &Path, table: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!("_{table}.csv"));
    PathBuf::from(name)
}

fn write_table<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> RepositoryResult<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    // Written by hand so empty tables still get a header.
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Reads every data row of `path`, or `None` when the file does not exist.
fn read_table<T: DeserializeOwned>(path: &Path) -> RepositoryResult<Option<Vec<T>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::warn!("File {} not found, skipping", path.display());
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let mut reader = csv::Reader::from_reader(file);
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(Some(rows))
}

/// Old id to new id for one table; unknown ids are kept as they are.
struct IdMap {
    table: &'static str,
    ids: HashMap<i32, i32>,
}

impl IdMap {
    fn new(table: &'static str) -> Self {
        Self {
            table,
            ids: HashMap::new(),
        }
    }

    fn insert(&mut self, old: i32, new: i32) {
        self.ids.insert(old, new);
    }

    fn resolve(&self, old: i32) -> i32 {
        match self.ids.get(&old) {
            Some(&new) => new,
            None => {
                log::warn!(
                    "No imported {} row with id {old}, keeping the reference as is",
                    self.table
                );
                old
            }
        }
    }
}

/// Wraps a rejected row into a [`RepositoryError::ValidationError`] naming its place.
fn invalid_row(table: &str, line: usize, err: TypeConstraintError) -> RepositoryError {
    RepositoryError::ValidationError(format!("{table} row {line}: {err}"))
}

fn import_clients(conn: &mut SqliteConnection, rows: &[DbClient]) -> RepositoryResult<IdMap> {
    use crate::schema::clients;

    let mut ids = IdMap::new(CLIENTS_TABLE);
    for (line, row) in rows.iter().enumerate() {
        let client = DomainClient::try_from(row.clone())
            .map_err(|err| invalid_row(CLIENTS_TABLE, line + 1, err))?;
        let new_id = diesel::insert_into(clients::table)
            .values(DbNewClient::from(&client))
            .returning(clients::client_id)
            .get_result::<i32>(conn)?;
        ids.insert(row.client_id, new_id);
    }
    Ok(ids)
}

fn import_products(conn: &mut SqliteConnection, rows: &[DbProduct]) -> RepositoryResult<IdMap> {
    use crate::schema::products;

    let mut ids = IdMap::new(PRODUCTS_TABLE);
    for (line, row) in rows.iter().enumerate() {
        let product = DomainProduct::try_from(row.clone())
            .map_err(|err| invalid_row(PRODUCTS_TABLE, line + 1, err))?;
        let new_id = diesel::insert_into(products::table)
            .values(DbNewProduct::from(&product))
            .returning(products::product_id)
            .get_result::<i32>(conn)?;
        ids.insert(row.product_id, new_id);
    }
    Ok(ids)
}

/// Date and status of an exported order row, checked the same way reads check them.
fn check_order(row: &DbOrder) -> Result<(NaiveDateTime, OrderStatus), TypeConstraintError> {
    OrderId::new(row.order_id)?;
    Ok((
        parse_timestamp(&row.order_date)?,
        OrderStatus::new(row.status.as_str())?,
    ))
}

fn import_orders(
    conn: &mut SqliteConnection,
    rows: &[DbOrder],
    client_ids: &IdMap,
) -> RepositoryResult<IdMap> {
    use crate::schema::orders;

    let mut ids = IdMap::new(ORDERS_TABLE);
    for (line, row) in rows.iter().enumerate() {
        let (order_date, status) =
            check_order(row).map_err(|err| invalid_row(ORDERS_TABLE, line + 1, err))?;

        let insertable = DbNewOrder {
            client_id: client_ids.resolve(row.client_id),
            order_date: format_timestamp(&order_date),
            status: status.as_str(),
        };
        let new_id = diesel::insert_into(orders::table)
            .values(&insertable)
            .returning(orders::order_id)
            .get_result::<i32>(conn)?;
        ids.insert(row.order_id, new_id);
    }
    Ok(ids)
}

fn import_order_products(
    conn: &mut SqliteConnection,
    rows: &[DbOrderProduct],
    order_ids: &IdMap,
    product_ids: &IdMap,
) -> RepositoryResult<usize> {
    use crate::schema::order_products;

    let links = rows
        .iter()
        .map(|row| DbOrderProduct {
            order_id: order_ids.resolve(row.order_id),
            product_id: product_ids.resolve(row.product_id),
        })
        .collect::<Vec<_>>();

    if links.is_empty() {
        return Ok(0);
    }

    Ok(diesel::insert_into(order_products::table)
        .values(&links)
        .execute(conn)?)
}

impl BulkTransfer for DieselRepository {
    fn export_to_csv(&self, base: &Path) -> RepositoryResult<TransferReport> {
        use crate::schema::{clients, order_products, orders, products};

        let mut conn = self.conn()?;
        let mut report = TransferReport::default();

        let rows = clients::table
            .order(clients::client_id.asc())
            .load::<DbClient>(&mut conn)?;
        let path = table_path(base, CLIENTS_TABLE);
        let written = write_table(&path, &CLIENT_COLUMNS, &rows)?;
        report.push(CLIENTS_TABLE, path, Some(written));

        let rows = products::table
            .order(products::product_id.asc())
            .load::<DbProduct>(&mut conn)?;
        let path = table_path(base, PRODUCTS_TABLE);
        let written = write_table(&path, &PRODUCT_COLUMNS, &rows)?;
        report.push(PRODUCTS_TABLE, path, Some(written));

        let rows = orders::table
            .order(orders::order_id.asc())
            .load::<DbOrder>(&mut conn)?;
        let path = table_path(base, ORDERS_TABLE);
        let written = write_table(&path, &ORDER_COLUMNS, &rows)?;
        report.push(ORDERS_TABLE, path, Some(written));

        let rows = order_products::table
            .order((order_products::order_id.asc(), order_products::product_id.asc()))
            .load::<DbOrderProduct>(&mut conn)?;
        let path = table_path(base, ORDER_PRODUCTS_TABLE);
        let written = write_table(&path, &ORDER_PRODUCT_COLUMNS, &rows)?;
        report.push(ORDER_PRODUCTS_TABLE, path, Some(written));

        log::info!(
            "Exported {} clients, {} products, {} orders and {} order lines",
            report.rows(CLIENTS_TABLE),
            report.rows(PRODUCTS_TABLE),
            report.rows(ORDERS_TABLE),
            report.rows(ORDER_PRODUCTS_TABLE)
        );

        Ok(report)
    }

    fn import_from_csv(&self, base: &Path) -> RepositoryResult<TransferReport> {
        let clients_path = table_path(base, CLIENTS_TABLE);
        let products_path = table_path(base, PRODUCTS_TABLE);
        let orders_path = table_path(base, ORDERS_TABLE);
        let links_path = table_path(base, ORDER_PRODUCTS_TABLE);

        let clients = read_table::<DbClient>(&clients_path)?;
        let products = read_table::<DbProduct>(&products_path)?;
        let orders = read_table::<DbOrder>(&orders_path)?;
        let links = read_table::<DbOrderProduct>(&links_path)?;

        let mut conn = self.conn()?;
        let counts = conn.transaction::<_, RepositoryError, _>(|conn| {
            let client_ids = match &clients {
                Some(rows) => import_clients(conn, rows)?,
                None => IdMap::new(CLIENTS_TABLE),
            };
            let product_ids = match &products {
                Some(rows) => import_products(conn, rows)?,
                None => IdMap::new(PRODUCTS_TABLE),
            };
            let order_ids = match &orders {
                Some(rows) => import_orders(conn, rows, &client_ids)?,
                None => IdMap::new(ORDERS_TABLE),
            };
            let link_count = match &links {
                Some(rows) => Some(import_order_products(conn, rows, &order_ids, &product_ids)?),
                None => None,
            };
            Ok(link_count)
        })?;

        let mut report = TransferReport::default();
        report.push(CLIENTS_TABLE, clients_path, clients.as_ref().map(Vec::len));
        report.push(PRODUCTS_TABLE, products_path, products.as_ref().map(Vec::len));
        report.push(ORDERS_TABLE, orders_path, orders.as_ref().map(Vec::len));
        report.push(ORDER_PRODUCTS_TABLE, links_path, counts);

        log::info!(
            "Imported {} clients, {} products, {} orders and {} order lines",
            report.rows(CLIENTS_TABLE),
            report.rows(PRODUCTS_TABLE),
            report.rows(ORDERS_TABLE),
            report.rows(ORDER_PRODUCTS_TABLE)
        );

        Ok(report)
    }
}
