#![allow(dead_code)]

use std::sync::Arc;
use storefront_core::catalog::Item;
use storefront_core::ItemId;
use storefront_data::ApiClient;
use storefront_mock::InMemoryApi;
use storefront_store::{Operation, StoreEvent, Storefront};
use tokio::sync::broadcast;

/// A seeded backend with no latency.
pub fn backend() -> Arc<InMemoryApi> {
    Arc::new(InMemoryApi::seeded())
}

/// A storefront talking to `api`.
pub fn storefront(api: &Arc<InMemoryApi>) -> Storefront {
    Storefront::new(ApiClient::new(api.clone()))
}

/// A storefront with the catalog already loaded.
pub async fn loaded(api: &Arc<InMemoryApi>) -> Storefront {
    let storefront = storefront(api);
    storefront.load().await;
    storefront
}

/// A seed item by id.
pub fn item(storefront: &Storefront, id: u64) -> Item {
    storefront
        .catalog()
        .find(ItemId::new(id))
        .unwrap_or_else(|| panic!("item {} is not in the catalog", id))
}

/// Everything published so far.
pub fn drain(events: &mut broadcast::Receiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

/// The last event for `operation`.
pub fn last_for(events: &[StoreEvent], operation: Operation) -> Option<&StoreEvent> {
    events.iter().rev().find(|e| e.operation == operation)
}
