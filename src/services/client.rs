use crate::domain::client::Client;
use crate::domain::person::Person;
use crate::domain::types::ClientId;
use crate::forms::client::{AddClientForm, SaveClientForm};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Validates the add-client form and persists a new client record.
///
/// Email and phone formats are only checked for a warning; the client is
/// stored either way.
pub fn add_client<R>(repo: &R, form: &AddClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let mut client = form.to_client().map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })?;

    if let Err(err) = client.validate_contact() {
        log::warn!("Adding client {} with {err}", client.full_name());
    }

    repo.create_client(&mut client).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        err
    })?;

    Ok(client)
}

/// Every client in insertion order.
pub fn list_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        ServiceError::from(err)
    })
}

pub fn get_client<R>(repo: &R, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let client_id = ClientId::new(client_id)?;
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)
}

/// Searches clients by any contact field; empty input lists everyone by name.
///
/// The query is matched as given, surrounding whitespace included.
pub fn search_clients<R>(repo: &R, query: &str) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.search_clients(query).map_err(|err| {
        log::error!("Failed to search clients: {err}");
        ServiceError::from(err)
    })
}

/// Overwrites the contact details and address of an existing client.
pub fn update_client<R>(repo: &R, form: &SaveClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    let (client_id, updates) = form.to_update().map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })?;

    let affected = repo.update_client(client_id, &updates).map_err(|err| {
        log::error!("Failed to update client {client_id}: {err}");
        err
    })?;

    if affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}

/// Removes a client. Fails with [`ServiceError::Conflict`] while orders reference it.
pub fn delete_client<R>(repo: &R, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    let client_id = ClientId::new(client_id)?;

    let affected = repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        err
    })?;

    if affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn add_form() -> AddClientForm {
        AddClientForm {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+12345678901".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    fn save_form(id: i32) -> SaveClientForm {
        SaveClientForm {
            id,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+12345678901".to_string(),
            address: "2 Side St".to_string(),
        }
    }

    #[test]
    fn add_client_returns_client_with_id() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(1).returning(|client| {
            let id = ClientId::new(1).expect("valid id");
            client.id = Some(id);
            Ok(id)
        });

        let client = add_client(&repo, &add_form()).expect("client created");
        assert_eq!(client.id.map(ClientId::get), Some(1));
    }

    #[test]
    fn add_client_rejects_invalid_form_without_touching_store() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().never();

        let mut form = add_form();
        form.first_name = String::new();
        assert!(matches!(add_client(&repo, &form), Err(ServiceError::Form(_))));
    }

    #[test]
    fn update_of_unknown_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_client().times(1).returning(|_, _| Ok(0));

        assert!(matches!(
            update_client(&repo, &save_form(42)),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn delete_referenced_client_is_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_delete_client().times(1).returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "Foreign key constraint violation".to_string(),
            ))
        });

        assert!(matches!(
            delete_client(&repo, 1),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn search_keeps_query_whitespace() {
        let mut repo = MockRepository::new();
        repo.expect_search_clients()
            .withf(|text| text == " lee")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        assert!(search_clients(&repo, " lee").expect("search ok").is_empty());
    }
}
