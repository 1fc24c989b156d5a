//! Catalog store.

use crate::status::{Operation, StatusChannel};
use crate::StoreError;
use std::sync::atomic::{AtomicU64, Ordering};
use storefront_core::catalog::{Category, Item, ItemDraft, ItemLookup};
use storefront_core::{ItemId, Money};
use storefront_data::ApiClient;
use tokio::sync::watch;
use tracing::{instrument, warn};

/// Published catalog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Every item, as of the last full listing plus local edits.
    pub items: Vec<Item>,
    /// Reference categories.
    pub categories: Vec<Category>,
    /// Ticket of the last listing or local edit applied to `items`.
    pub revision: u64,
}

impl CatalogSnapshot {
    /// Look up an item.
    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Category names in display order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

impl ItemLookup for CatalogSnapshot {
    fn unit_price(&self, id: ItemId) -> Option<Money> {
        self.items.as_slice().unit_price(id)
    }
}

/// Owns the catalog. The only writer of item state.
///
/// A full listing takes a ticket when it is issued and local edits take
/// one when they are applied. A listing is published only if nothing
/// newer has touched the items since it was issued.
#[derive(Debug)]
pub struct CatalogStore {
    client: ApiClient,
    state: watch::Sender<CatalogSnapshot>,
    tickets: AtomicU64,
    status: StatusChannel,
}

impl CatalogStore {
    /// Create a store over `client`, reporting to `status`.
    pub fn new(client: ApiClient, status: StatusChannel) -> Self {
        let (state, _) = watch::channel(CatalogSnapshot::default());
        Self {
            client,
            state,
            tickets: AtomicU64::new(0),
            status,
        }
    }

    /// Observe catalog changes.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.state.subscribe()
    }

    /// Copy of the current catalog.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.borrow().clone()
    }

    /// Look up an item in the published catalog.
    pub fn find(&self, id: ItemId) -> Option<Item> {
        self.state.borrow().find(id).cloned()
    }

    /// Fetch every item and publish it. Empty on failure.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Vec<Item> {
        let ticket = self.next_ticket();
        let result = self.client.get_json::<Vec<Item>>("items").await;
        let Some(items) = self
            .status
            .settle(Operation::ListItems, result.map_err(StoreError::from))
        else {
            return Vec::new();
        };

        let published = self.state.send_if_modified(|s| {
            if ticket > s.revision {
                s.items = items.clone();
                s.revision = ticket;
                true
            } else {
                false
            }
        });
        if !published {
            warn!(ticket, "discarding stale item listing");
        }
        items
    }

    /// Fetch the items of one category. Empty on failure.
    ///
    /// The result is a subset, so it is not published.
    #[instrument(skip(self))]
    pub async fn list_items_by_category(&self, category: &str) -> Vec<Item> {
        let result = self
            .client
            .get_json_query::<Vec<Item>>("items", &[("category", category)])
            .await
            .map_err(StoreError::from);
        self.status
            .settle(Operation::ListItemsByCategory, result)
            .unwrap_or_default()
    }

    /// Fetch and publish the categories. Empty on failure.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Vec<Category> {
        let result = self.client.get_json::<Vec<Category>>("categories").await;
        match self
            .status
            .settle(Operation::ListCategories, result.map_err(StoreError::from))
        {
            Some(categories) => {
                self.state.send_modify(|s| s.categories = categories.clone());
                categories
            }
            None => Vec::new(),
        }
    }

    /// Create an item; the backend assigns its identifier.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_item(&self, draft: &ItemDraft) -> Option<Item> {
        let result = self.client.post_json::<_, Item>("items", draft).await;
        let item = self
            .status
            .settle(Operation::CreateItem, result.map_err(StoreError::from))?;
        self.edit_items(|items| items.push(item.clone()));
        Some(item)
    }

    /// Replace an item by identifier. `None` when the backend does not
    /// know it or the call fails.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn update_item(&self, item: &Item) -> Option<Item> {
        let path = format!("items/{}", item.id);
        let result = self
            .client
            .put_json::<_, Item>(&path, item)
            .await
            .map_err(|e| StoreError::from_fetch(e, || format!("item {}", item.id)));
        let updated = self.status.settle(Operation::UpdateItem, result)?;
        self.edit_items(|items| {
            if let Some(slot) = items.iter_mut().find(|i| i.id == updated.id) {
                *slot = updated.clone();
            }
        });
        Some(updated)
    }

    /// Delete an item. The local copy is dropped whatever the backend
    /// says; returns whether the backend confirmed the deletion.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: ItemId) -> bool {
        let result = match self.client.delete(&format!("items/{}", id)).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other.map_err(StoreError::from),
        };
        let confirmed = self.status.settle(Operation::DeleteItem, result).is_some();
        self.edit_items(|items| items.retain(|item| item.id != id));
        confirmed
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a local edit, superseding listings already in flight.
    fn edit_items(&self, edit: impl FnOnce(&mut Vec<Item>)) {
        let ticket = self.next_ticket();
        self.state.send_modify(|s| {
            edit(&mut s.items);
            s.revision = ticket;
        });
    }
}
