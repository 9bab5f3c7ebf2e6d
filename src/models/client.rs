use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::client::{Client as DomainClient, UpdateClient as DomainUpdateClient};
use crate::domain::person::ContactInfo;
use crate::domain::types::{ClientAddress, ClientId, TypeConstraintError};
use crate::models::{format_timestamp, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(primary_key(client_id))]
/// Row of the `clients` table; field order matches the column order.
pub struct Client {
    pub client_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub registration_date: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub registration_date: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ClientId::try_from(client.client_id)?),
            contact: ContactInfo::try_new(
                client.first_name,
                client.last_name,
                client.email,
                client.phone,
            )?,
            address: ClientAddress::new(client.address)?,
            registration_date: parse_timestamp(&client.registration_date)?,
            orders: Vec::new(),
        })
    }
}

impl<'a> From<&'a DomainClient> for NewClient<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            first_name: client.contact.first_name.as_str(),
            last_name: client.contact.last_name.as_str(),
            email: client.contact.email.as_str(),
            phone: client.contact.phone.as_str(),
            address: client.address.as_str(),
            registration_date: format_timestamp(&client.registration_date),
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(client: &'a DomainUpdateClient) -> Self {
        Self {
            first_name: client.contact.first_name.as_str(),
            last_name: client.contact.last_name.as_str(),
            email: client.contact.email.as_str(),
            phone: client.contact.phone.as_str(),
            address: client.address.as_str(),
        }
    }
}
