//! Repository implementation for shop clients.

use diesel::prelude::*;

use crate::{
    domain::{
        client::{Client, UpdateClient},
        types::ClientId,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{
        ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Escapes `LIKE` wildcards so user input is matched literally.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn into_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        db_client
            .map(|row| Client::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let rows = clients::table
            .order(clients::client_id.asc())
            .load::<DbClient>(&mut conn)?;

        into_domain(rows)
    }

    fn search_clients(&self, text: &str) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let pattern = like_pattern(text);

        let rows = clients::table
            .filter(
                clients::first_name
                    .like(&pattern)
                    .escape('\\')
                    .or(clients::last_name.like(&pattern).escape('\\'))
                    .or(clients::email.like(&pattern).escape('\\'))
                    .or(clients::phone.like(&pattern).escape('\\'))
                    .or(clients::address.like(&pattern).escape('\\')),
            )
            .order((clients::last_name.asc(), clients::first_name.asc()))
            .load::<DbClient>(&mut conn)?;

        into_domain(rows)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, client: &mut Client) -> RepositoryResult<ClientId> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable: DbNewClient = (&*client).into();

        let raw_id = diesel::insert_into(clients::table)
            .values(&insertable)
            .returning(clients::client_id)
            .get_result::<i32>(&mut conn)?;

        let id = ClientId::try_from(raw_id)?;
        client.id = Some(id);
        Ok(id)
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateClient = updates.into();

        let affected = diesel::update(clients::table.find(client_id.get()))
            .set(&db_updates)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let affected = diesel::delete(clients::table.find(client_id.get())).execute(&mut conn)?;
        Ok(affected)
    }
}
