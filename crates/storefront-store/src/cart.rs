//! Cart store.

use crate::status::{Operation, StatusChannel};
use crate::StoreError;
use std::sync::atomic::{AtomicU64, Ordering};
use storefront_core::cart::{total_quantity, CartEntry, CartTotals, QuantityUpdate};
use storefront_core::catalog::{Item, ItemLookup};
use storefront_core::{ItemId, Money};
use storefront_data::ApiClient;
use tokio::sync::{watch, Mutex};
use tracing::{error, instrument, warn};

/// Published cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    /// Entries in backend order, at most one per item.
    pub entries: Vec<CartEntry>,
    /// Sum of quantities.
    pub total_quantity: u64,
    /// Ticket of the refresh that produced this snapshot.
    pub revision: u64,
}

impl CartSnapshot {
    fn new(entries: Vec<CartEntry>, revision: u64) -> Self {
        Self {
            total_quantity: total_quantity(&entries),
            entries,
            revision,
        }
    }

    /// Check if an item is in the cart.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entry(item_id).is_some()
    }

    /// The entry for an item.
    pub fn entry(&self, item_id: ItemId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.item_id == item_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the cart. The only writer of cart state.
///
/// Mutations are serialized, and each one ends with a refresh of the
/// published snapshot whether it succeeded or not. Every refresh takes a
/// ticket when it is issued; a response is published only if its ticket
/// is newer than the snapshot's revision.
#[derive(Debug)]
pub struct CartStore {
    client: ApiClient,
    state: watch::Sender<CartSnapshot>,
    mutations: Mutex<()>,
    tickets: AtomicU64,
    status: StatusChannel,
}

impl CartStore {
    /// Create a store over `client`, reporting to `status`.
    pub fn new(client: ApiClient, status: StatusChannel) -> Self {
        let (state, _) = watch::channel(CartSnapshot::default());
        Self {
            client,
            state,
            mutations: Mutex::new(()),
            tickets: AtomicU64::new(0),
            status,
        }
    }

    /// Observe cart changes.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state.subscribe()
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.state.borrow().clone()
    }

    /// Current entries.
    pub fn entries(&self) -> Vec<CartEntry> {
        self.state.borrow().entries.clone()
    }

    /// Check if an item is in the cart.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.state.borrow().contains(item_id)
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.state.borrow().total_quantity
    }

    /// Join the cart against `lookup`.
    ///
    /// Entries for unknown items are logged and priced at nothing. An
    /// overflowing total is logged and yields empty totals.
    pub fn totals<L: ItemLookup + ?Sized>(&self, lookup: &L) -> CartTotals {
        let snapshot = self.state.borrow().clone();
        match CartTotals::compute(&snapshot.entries, lookup) {
            Ok(totals) => {
                if !totals.unresolved.is_empty() {
                    warn!(unresolved = ?totals.unresolved, "cart references unknown items");
                }
                totals
            }
            Err(e) => {
                error!(error = %e, "cart total cannot be computed");
                CartTotals::default()
            }
        }
    }

    /// Sum of quantity times unit price.
    pub fn total_price<L: ItemLookup + ?Sized>(&self, lookup: &L) -> Money {
        self.totals(lookup).grand_total
    }

    /// Re-fetch the cart and publish it unless a newer refresh already
    /// has. Returns the entries published afterwards.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Vec<CartEntry> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.client.get_json::<Vec<CartEntry>>("cart").await;

        if let Some(entries) = self
            .status
            .settle(Operation::RefreshCart, result.map_err(StoreError::from))
        {
            let published = self.state.send_if_modified(|s| {
                if ticket > s.revision {
                    *s = CartSnapshot::new(entries, ticket);
                    true
                } else {
                    false
                }
            });
            if !published {
                warn!(ticket, "discarding stale cart refresh");
            }
        }
        self.entries()
    }

    /// Put one more unit of `item` in the cart, creating the entry if
    /// needed.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn add_item(&self, item: &Item) -> Option<CartEntry> {
        let _guard = self.mutations.lock().await;
        let result = self.add_remote(item.id).await;
        self.refresh().await;
        self.status.settle(Operation::AddToCart, result)
    }

    /// Set an entry's quantity. Zero or less removes the entry and
    /// returns `None`.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, item_id: ItemId, quantity: i64) -> Option<CartEntry> {
        if quantity <= 0 {
            self.remove_item(item_id).await;
            return None;
        }

        let _guard = self.mutations.lock().await;
        let result = self.update_remote(item_id, quantity).await;
        self.refresh().await;
        self.status.settle(Operation::SetQuantity, result)
    }

    /// Remove an entry. Removing an absent entry succeeds.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: ItemId) -> bool {
        let _guard = self.mutations.lock().await;
        let result = match self.client.delete(&format!("cart/{}", item_id)).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other.map_err(StoreError::from),
        };
        self.refresh().await;
        self.status
            .settle(Operation::RemoveFromCart, result)
            .is_some()
    }

    /// Remove every entry.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> bool {
        let _guard = self.mutations.lock().await;
        let result = self.client.delete("cart").await.map_err(StoreError::from);
        self.refresh().await;
        self.status.settle(Operation::ClearCart, result).is_some()
    }

    async fn add_remote(&self, item_id: ItemId) -> Result<CartEntry, StoreError> {
        let current: Vec<CartEntry> = self.client.get_json("cart").await?;

        match current.iter().find(|e| e.item_id == item_id) {
            Some(existing) => {
                let update = QuantityUpdate::new(i64::from(existing.incremented()?))?;
                self.put_quantity(item_id, update).await
            }
            None => Ok(self
                .client
                .post_json("cart", &CartEntry::single(item_id))
                .await?),
        }
    }

    async fn update_remote(&self, item_id: ItemId, quantity: i64) -> Result<CartEntry, StoreError> {
        let update = QuantityUpdate::new(quantity)?;
        self.put_quantity(item_id, update).await
    }

    async fn put_quantity(
        &self,
        item_id: ItemId,
        update: QuantityUpdate,
    ) -> Result<CartEntry, StoreError> {
        self.client
            .put_json(&format!("cart/{}", item_id), &update)
            .await
            .map_err(|e| StoreError::from_fetch(e, || format!("cart entry for item {}", item_id)))
    }
}
