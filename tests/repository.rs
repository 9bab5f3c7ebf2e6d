use diesel::RunQueryDsl;
use pushkind_shop::domain::client::UpdateClient;
use pushkind_shop::domain::order::Order;
use pushkind_shop::domain::person::ContactInfo;
use pushkind_shop::domain::types::{ClientAddress, ClientId, OrderId, ProductId};
use pushkind_shop::repository::errors::RepositoryError;
use pushkind_shop::repository::{
    ClientReader, ClientWriter, OrderReader, OrderWriter, ProductReader, ProductWriter,
};

mod common;

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = test_db.repo();

    let mut ann = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    let mut bob = common::client("Bob", "Stone", "bob@example.com", "222", "2 Elm St");

    let ann_id = repo.create_client(&mut ann).unwrap();
    assert_eq!(ann_id.get(), 1);
    assert_eq!(ann.id, Some(ann_id));
    let bob_id = repo.create_client(&mut bob).unwrap();
    assert_eq!(bob_id.get(), 2);

    let stored = repo.get_client_by_id(ann_id).unwrap().unwrap();
    assert_eq!(stored, ann);

    let missing = ClientId::new(99).unwrap();
    assert!(repo.get_client_by_id(missing).unwrap().is_none());

    let items = repo.list_clients().unwrap();
    let ids: Vec<i32> = items.iter().filter_map(|c| c.id).map(ClientId::get).collect();
    assert_eq!(ids, vec![1, 2]);

    let updates = UpdateClient::new(
        ContactInfo::try_new("Robert", "Stone", "bob@example.com", "333").unwrap(),
        ClientAddress::new("3 Oak St").unwrap(),
    );
    assert_eq!(repo.update_client(bob_id, &updates).unwrap(), 1);
    assert_eq!(repo.update_client(missing, &updates).unwrap(), 0);

    let bob = repo.get_client_by_id(bob_id).unwrap().unwrap();
    assert_eq!(bob.contact.first_name.as_str(), "Robert");
    assert_eq!(bob.contact.phone.as_str(), "333");
    assert_eq!(bob.address.as_str(), "3 Oak St");

    assert_eq!(repo.delete_client(ann_id).unwrap(), 1);
    assert_eq!(repo.delete_client(ann_id).unwrap(), 0);
    assert!(repo.get_client_by_id(ann_id).unwrap().is_none());
    assert_eq!(repo.list_clients().unwrap().len(), 1);
}

#[test]
fn test_search_clients() {
    let test_db = common::TestDb::new("test_search_clients.db");
    let repo = test_db.repo();

    let mut zed = common::client("Zed", "Adams", "zed@shop.org", "555", "North Rd");
    let mut ann = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    let mut amy = common::client("Amy", "Adams", "amy_a@example.com", "777", "South Rd");
    repo.create_client(&mut zed).unwrap();
    repo.create_client(&mut ann).unwrap();
    repo.create_client(&mut amy).unwrap();

    let names = |clients: Vec<pushkind_shop::domain::client::Client>| -> Vec<String> {
        clients
            .into_iter()
            .map(|c| c.contact.first_name.into_inner())
            .collect()
    };

    assert_eq!(names(repo.search_clients("ANN").unwrap()), vec!["Ann"]);
    assert_eq!(names(repo.search_clients("example.com").unwrap()), vec!["Amy", "Ann"]);
    assert_eq!(names(repo.search_clients("rd").unwrap()), vec!["Amy", "Zed"]);
    assert_eq!(names(repo.search_clients("1234").unwrap()), vec!["Ann"]);
    assert_eq!(names(repo.search_clients("").unwrap()), vec!["Amy", "Zed", "Ann"]);
    assert!(repo.search_clients("nobody").unwrap().is_empty());

    // Wildcards in the query are matched literally.
    assert_eq!(names(repo.search_clients("y_a").unwrap()), vec!["Amy"]);
    assert!(repo.search_clients("%").unwrap().is_empty());
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = test_db.repo();

    let mut mug = common::product("Mug", Some("Ceramic"), 10.0);
    let mut tee = common::product("Tee", None, 15.5);
    let mug_id = repo.create_product(&mut mug).unwrap();
    let tee_id = repo.create_product(&mut tee).unwrap();
    assert_eq!(mug_id.get(), 1);
    assert_eq!(tee_id.get(), 2);

    assert_eq!(repo.get_product_by_id(tee_id).unwrap().unwrap(), tee);
    assert!(repo.get_product_by_id(tee_id).unwrap().unwrap().description.is_none());

    let listed = repo.list_products().unwrap();
    assert_eq!(listed, vec![mug.clone(), tee.clone()]);

    assert_eq!(repo.delete_product(mug_id).unwrap(), 1);
    assert_eq!(repo.delete_product(mug_id).unwrap(), 0);
    assert!(repo.get_product_by_id(mug_id).unwrap().is_none());
}

#[test]
fn test_order_repository() {
    let test_db = common::TestDb::new("test_order_repository.db");
    let repo = test_db.repo();

    let mut ann = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    repo.create_client(&mut ann).unwrap();
    let mut mug = common::product("Mug", None, 10.0);
    let mut tee = common::product("Tee", None, 15.5);
    repo.create_product(&mut mug).unwrap();
    repo.create_product(&mut tee).unwrap();

    let mut order = Order::new(ann.clone(), vec![mug.clone(), tee.clone()]);
    let order_id = repo.create_order(&mut order).unwrap();
    assert_eq!(order.id, Some(order_id));
    assert_eq!(order.calc_total(), 25.5);

    let orders = repo.list_orders().unwrap();
    assert_eq!(orders.len(), 1);
    let stored = &orders[0];
    assert_eq!(stored.id, Some(order_id));
    assert_eq!(stored.client.id, ann.id);
    assert_eq!(stored.status.as_str(), "Created");
    assert_eq!(stored.order_date, order.order_date);
    assert_eq!(stored.calc_total(), 25.5);

    let mut products = repo.list_order_products(order_id).unwrap();
    products.sort_by_key(|p| p.id);
    assert_eq!(products, vec![mug, tee]);

    let unknown = OrderId::new(99).unwrap();
    assert!(repo.list_order_products(unknown).unwrap().is_empty());

    let mut empty = Order::new(ann, Vec::new());
    let empty_id = repo.create_order(&mut empty).unwrap();
    assert!(repo.list_order_products(empty_id).unwrap().is_empty());
    assert_eq!(repo.list_orders().unwrap().len(), 2);
}

#[test]
fn test_order_with_duplicate_product_is_rolled_back() {
    let test_db = common::TestDb::new("test_order_duplicate_product.db");
    let repo = test_db.repo();

    let mut ann = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    repo.create_client(&mut ann).unwrap();
    let mut mug = common::product("Mug", None, 10.0);
    repo.create_product(&mut mug).unwrap();

    let mut order = Order::new(ann, vec![mug.clone(), mug]);
    let result = repo.create_order(&mut order);
    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    assert!(order.id.is_none());
    assert!(repo.list_orders().unwrap().is_empty());
}

#[test]
fn test_order_requires_saved_entities() {
    let test_db = common::TestDb::new("test_order_requires_saved_entities.db");
    let repo = test_db.repo();

    let unsaved = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    let mut order = Order::new(unsaved, Vec::new());
    assert!(matches!(
        repo.create_order(&mut order),
        Err(RepositoryError::ValidationError(_))
    ));

    let mut ghost = common::client("Ghost", "Client", "g@example.com", "000", "Nowhere");
    ghost.id = Some(ClientId::new(77).unwrap());
    let mut order = Order::new(ghost, Vec::new());
    assert!(matches!(
        repo.create_order(&mut order),
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_referenced_rows_cannot_be_deleted() {
    let test_db = common::TestDb::new("test_referenced_rows_cannot_be_deleted.db");
    let repo = test_db.repo();

    let mut ann = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    let ann_id = repo.create_client(&mut ann).unwrap();
    let mut mug = common::product("Mug", None, 10.0);
    let mug_id: ProductId = repo.create_product(&mut mug).unwrap();
    repo.create_order(&mut Order::new(ann, vec![mug])).unwrap();

    assert!(matches!(
        repo.delete_client(ann_id),
        Err(RepositoryError::ConstraintViolation(_))
    ));
    assert!(matches!(
        repo.delete_product(mug_id),
        Err(RepositoryError::ConstraintViolation(_))
    ));
    assert!(repo.get_client_by_id(ann_id).unwrap().is_some());
    assert!(repo.get_product_by_id(mug_id).unwrap().is_some());
}

#[test]
fn test_deleted_ids_are_not_reissued() {
    let test_db = common::TestDb::new("test_deleted_ids_are_not_reissued.db");
    let repo = test_db.repo();

    let mut ann = common::client("Ann", "Lee", "ann@example.com", "+12345678901", "1 Main St");
    let mut bob = common::client("Bob", "Stone", "bob@example.com", "222", "2 Elm St");
    repo.create_client(&mut ann).unwrap();
    let bob_id = repo.create_client(&mut bob).unwrap();
    assert_eq!(repo.delete_client(bob_id).unwrap(), 1);

    let mut cy = common::client("Cy", "Park", "cy@example.com", "999", "9 Hill");
    let cy_id = repo.create_client(&mut cy).unwrap();
    assert_eq!(cy_id.get(), 3);

    let mut mug = common::product("Mug", None, 10.0);
    let mug_id = repo.create_product(&mut mug).unwrap();
    repo.delete_product(mug_id).unwrap();
    let mut tee = common::product("Tee", None, 15.5);
    assert_eq!(repo.create_product(&mut tee).unwrap().get(), 2);

    let mut order = Order::new(ann.clone(), Vec::new());
    let order_id = repo.create_order(&mut order).unwrap();
    let mut conn = test_db.pool().get().unwrap();
    diesel::sql_query(format!("DELETE FROM orders WHERE order_id = {order_id}"))
        .execute(&mut conn)
        .unwrap();
    let mut next = Order::new(ann, Vec::new());
    assert_eq!(repo.create_order(&mut next).unwrap().get(), order_id.get() + 1);
}
