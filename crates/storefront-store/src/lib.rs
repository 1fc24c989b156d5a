//! Observable storefront state.
//!
//! [`CatalogStore`] and [`CartStore`] turn user intents into backend
//! calls and republish the results on `tokio::sync::watch` channels.
//! Failures never surface as errors: they are logged, reported as
//! [`StoreEvent`]s on a broadcast [`StatusChannel`], and replaced by an
//! empty or `None` result.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_data::ApiClient;
//! use storefront_mock::InMemoryApi;
//! use storefront_store::Storefront;
//!
//! let storefront = Storefront::new(ApiClient::new(Arc::new(InMemoryApi::seeded())));
//! storefront.load().await;
//!
//! let bread = storefront.catalog().find(1.into()).unwrap();
//! storefront.cart().add_item(&bread).await;
//! assert_eq!(storefront.cart().total_item_count(), 1);
//! ```

mod cart;
mod catalog;
mod error;
mod status;
mod storefront;

pub use cart::{CartSnapshot, CartStore};
pub use catalog::{CatalogSnapshot, CatalogStore};
pub use error::StoreError;
pub use status::{Operation, Outcome, StatusChannel, StoreEvent, DEFAULT_STATUS_CAPACITY};
pub use storefront::{LoadSummary, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartSnapshot, CartStore, CatalogSnapshot, CatalogStore, Operation, Outcome,
        StatusChannel, StoreError, StoreEvent, Storefront,
    };
}
