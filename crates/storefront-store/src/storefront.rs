//! Stores wired together.

use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::status::{StatusChannel, StoreEvent};
use std::sync::Arc;
use storefront_core::cart::CartTotals;
use storefront_core::{ItemId, Money};
use storefront_data::ApiClient;
use tokio::sync::broadcast;
use tracing::{info, instrument};

/// Counts from an initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub items: usize,
    pub categories: usize,
    pub cart_entries: usize,
}

/// The catalog and cart stores sharing one client and status channel.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Arc<CatalogStore>,
    cart: Arc<CartStore>,
    status: StatusChannel,
}

impl Storefront {
    /// Build both stores over `client`.
    pub fn new(client: ApiClient) -> Self {
        let status = StatusChannel::default();
        Self {
            catalog: Arc::new(CatalogStore::new(client.clone(), status.clone())),
            cart: Arc::new(CartStore::new(client, status.clone())),
            status,
        }
    }

    /// The catalog store.
    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// The cart store.
    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    /// The shared status channel.
    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Receive operation outcomes from both stores.
    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.status.subscribe()
    }

    /// Fetch items, categories and the cart concurrently.
    #[instrument(skip(self))]
    pub async fn load(&self) -> LoadSummary {
        let (items, categories, cart) = tokio::join!(
            self.catalog.list_items(),
            self.catalog.list_categories(),
            self.cart.refresh(),
        );
        let summary = LoadSummary {
            items: items.len(),
            categories: categories.len(),
            cart_entries: cart.len(),
        };
        info!(?summary, "storefront loaded");
        summary
    }

    /// Delete an item from the catalog and drop its cart entry.
    ///
    /// The cart entry is deleted on the backend whether or not the local
    /// cart snapshot lists it.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: ItemId) -> bool {
        let confirmed = self.catalog.delete_item(id).await;
        self.cart.remove_item(id).await;
        confirmed
    }

    /// The cart priced against the published catalog.
    pub fn cart_totals(&self) -> CartTotals {
        let catalog = self.catalog.snapshot();
        self.cart.totals(&catalog)
    }

    /// Grand total of the cart.
    pub fn cart_total(&self) -> Money {
        self.cart_totals().grand_total
    }
}
