//! Catalog module.
//!
//! Contains items, item drafts, categories and the price lookup used to
//! join a cart against the catalog.

mod category;
mod item;

pub use category::Category;
pub use item::{Item, ItemDraft, ItemLookup};
