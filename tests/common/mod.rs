#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pushkind_shop::db::{DbPool, establish_connection_pool};
use pushkind_shop::domain::client::Client;
use pushkind_shop::domain::person::ContactInfo;
use pushkind_shop::domain::product::Product;
use pushkind_shop::domain::types::{ClientAddress, Price, ProductName};
use pushkind_shop::repository::DieselRepository;
use tempfile::TempDir;

/// Store file with the schema applied, removed together with its directory on drop.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();
        let pool = establish_connection_pool(&url).expect("pool");
        let test_db = Self { dir, path, pool };
        test_db.repo().ensure_schema().expect("schema");
        test_db
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scratch directory that lives as long as the store.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

pub fn client(first: &str, last: &str, email: &str, phone: &str, address: &str) -> Client {
    Client::new(
        ContactInfo::try_new(first, last, email, phone).expect("contact"),
        ClientAddress::new(address).expect("address"),
    )
}

pub fn product(name: &str, description: Option<&str>, price: f64) -> Product {
    Product::new(
        ProductName::new(name).expect("name"),
        description.map(str::to_string),
        Price::new(price).expect("price"),
    )
}
