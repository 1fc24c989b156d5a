//! Storefront domain types and logic.
//!
//! This crate holds everything the stores and views share:
//!
//! - **Catalog**: items, drafts, categories and price lookups
//! - **Cart**: cart entries keyed by item identifier, totals
//! - **Search**: the pure catalog filter
//! - **Seed**: the canonical demo catalog
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let items = storefront_core::seed::items();
//! let cheap = filter_items(&items, &FilterCriteria::new().max_price(Money::from_cents(20)));
//! assert_eq!(cheap.len(), 4);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;
pub mod seed;

pub use error::CommerceError;
pub use ids::{CategoryId, ItemId};
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{CategoryId, ItemId};
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Category, Item, ItemDraft, ItemLookup};

    // Cart
    pub use crate::cart::{CartEntry, CartTotals, LinePricing, QuantityUpdate, MAX_QUANTITY_PER_ITEM};

    // Search
    pub use crate::search::{filter_items, FilterCriteria, PricePredicate};
}
