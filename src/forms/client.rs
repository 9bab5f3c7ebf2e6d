use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{Client, UpdateClient};
use crate::domain::person::ContactInfo;
use crate::domain::types::{ClientAddress, ClientId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for registering a new client. Every field is required.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
}

impl AddClientForm {
    /// Validates the form and builds an unsaved client registered now.
    pub fn to_client(&self) -> Result<Client, FormError> {
        self.validate()?;
        let contact = ContactInfo::try_new(
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        )?;
        Ok(Client::new(contact, ClientAddress::new(self.address.as_str())?))
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing client.
pub struct SaveClientForm {
    /// Client identifier.
    pub id: i32,
    /// Updated first name.
    #[validate(length(min = 1))]
    pub first_name: String,
    /// Updated last name.
    #[validate(length(min = 1))]
    pub last_name: String,
    /// Updated email address.
    #[validate(length(min = 1))]
    pub email: String,
    /// Updated contact phone number.
    #[validate(length(min = 1))]
    pub phone: String,
    /// Updated mailing address.
    #[validate(length(min = 1))]
    pub address: String,
}

impl SaveClientForm {
    /// Convert the form into the target id and the [`UpdateClient`] to persist.
    pub fn to_update(&self) -> Result<(ClientId, UpdateClient), FormError> {
        self.validate()?;
        let id = ClientId::new(self.id)?;
        let contact = ContactInfo::try_new(
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        )?;
        let address = ClientAddress::new(self.address.as_str())?;
        Ok((id, UpdateClient::new(contact, address)))
    }
}
