//! Reporting over the stored clients and orders.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::order::Order;
use crate::domain::types::ClientId;
use crate::repository::{ClientReader, OrderReader};
use crate::services::{ServiceError, ServiceResult};

/// A client with the number of orders they placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerOrderCount {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub order_count: usize,
}

/// Number of orders placed on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOrderCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Counts orders per client in first-seen order.
fn count_by_client(orders: &[Order]) -> Vec<(ClientId, usize)> {
    let mut positions: HashMap<ClientId, usize> = HashMap::new();
    let mut counts: Vec<(ClientId, usize)> = Vec::new();
    for client_id in orders.iter().filter_map(|order| order.client.id) {
        match positions.get(&client_id) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(client_id, counts.len());
                counts.push((client_id, 1));
            }
        }
    }
    counts
}

/// The `n` clients with the most orders, busiest first.
///
/// Ties keep the order in which the clients first appear among the orders.
/// Counted clients that no longer exist are dropped from the result.
pub fn top_customers<R>(repo: &R, n: usize) -> ServiceResult<Vec<CustomerOrderCount>>
where
    R: ClientReader + OrderReader + ?Sized,
{
    let orders = repo.list_orders().map_err(|err| {
        log::error!("Failed to load orders: {err}");
        ServiceError::from(err)
    })?;
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        ServiceError::from(err)
    })?;

    let mut counts = count_by_client(&orders);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);

    let names: HashMap<ClientId, (&str, &str)> = clients
        .iter()
        .filter_map(|client| {
            client.id.map(|id| {
                (
                    id,
                    (
                        client.contact.first_name.as_str(),
                        client.contact.last_name.as_str(),
                    ),
                )
            })
        })
        .collect();

    Ok(counts
        .into_iter()
        .filter_map(|(client_id, order_count)| {
            names
                .get(&client_id)
                .map(|(first_name, last_name)| CustomerOrderCount {
                    client_id,
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    order_count,
                })
        })
        .collect())
}

/// Orders per calendar day in chronological order. Days without orders are omitted.
pub fn order_dynamics<R>(repo: &R) -> ServiceResult<Vec<DailyOrderCount>>
where
    R: OrderReader + ?Sized,
{
    let orders = repo.list_orders().map_err(|err| {
        log::error!("Failed to load orders: {err}");
        ServiceError::from(err)
    })?;

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for order in &orders {
        *per_day.entry(order.order_date.date()).or_default() += 1;
    }

    Ok(per_day
        .into_iter()
        .map(|(date, count)| DailyOrderCount { date, count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::domain::person::ContactInfo;
    use crate::domain::types::ClientAddress;

    fn client(id: i32) -> Client {
        let mut client = Client::new(
            ContactInfo::try_new(format!("First{id}"), "Last", "x@example.com", "1234567890")
                .expect("valid contact"),
            ClientAddress::new("Addr").expect("valid address"),
        );
        client.id = Some(ClientId::new(id).expect("valid id"));
        client
    }

    #[test]
    fn counts_keep_first_seen_order() {
        let orders = vec![
            Order::new(client(2), Vec::new()),
            Order::new(client(1), Vec::new()),
            Order::new(client(2), Vec::new()),
            Order::new(client(3), Vec::new()),
        ];
        let counts: Vec<(i32, usize)> = count_by_client(&orders)
            .into_iter()
            .map(|(id, count)| (id.get(), count))
            .collect();
        assert_eq!(counts, vec![(2, 2), (1, 1), (3, 1)]);
    }
}
