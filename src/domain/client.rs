use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::person::{ContactInfo, Person};
use crate::domain::types::{ClientAddress, ClientId};

/// Shop customer.
///
/// `id` stays `None` until the client is persisted. `orders` is never loaded
/// from the store; application code fills it explicitly via [`Client::add_order`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: Option<ClientId>,
    pub contact: ContactInfo,
    pub address: ClientAddress,
    pub registration_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
}

impl Client {
    /// Creates an unsaved client registered now.
    #[must_use]
    pub fn new(contact: ContactInfo, address: ClientAddress) -> Self {
        Self {
            id: None,
            contact,
            address,
            registration_date: Utc::now().naive_utc(),
            orders: Vec::new(),
        }
    }

    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }
}

impl Person for Client {
    fn contact(&self) -> &ContactInfo {
        &self.contact
    }
}

/// Mutable client fields overwritten by an update.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub contact: ContactInfo,
    pub address: ClientAddress,
}

impl UpdateClient {
    #[must_use]
    pub fn new(contact: ContactInfo, address: ClientAddress) -> Self {
        Self { contact, address }
    }
}

impl Person for UpdateClient {
    fn contact(&self) -> &ContactInfo {
        &self.contact
    }
}
