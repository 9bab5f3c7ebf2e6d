//! Mock repository implementations for isolating services in tests.

use std::path::Path;

use mockall::mock;

use crate::domain::client::{Client, UpdateClient};
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::types::{ClientId, OrderId, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BulkTransfer, ClientReader, ClientWriter, OrderReader, OrderWriter, ProductReader,
    ProductWriter, TransferReport,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn search_clients(&self, text: &str) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, client: &mut Client) -> RepositoryResult<ClientId>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<usize>;
        fn delete_client(&self, client_id: ClientId) -> RepositoryResult<usize>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, product: &mut Product) -> RepositoryResult<ProductId>;
        fn delete_product(&self, product_id: ProductId) -> RepositoryResult<usize>;
    }

    impl OrderReader for Repository {
        fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
        fn list_order_products(&self, order_id: OrderId) -> RepositoryResult<Vec<Product>>;
    }

    impl OrderWriter for Repository {
        fn create_order(&self, order: &mut Order) -> RepositoryResult<OrderId>;
    }

    impl BulkTransfer for Repository {
        fn export_to_csv(&self, base: &Path) -> RepositoryResult<TransferReport>;
        fn import_from_csv(&self, base: &Path) -> RepositoryResult<TransferReport>;
    }
}
