//! Search module.
//!
//! A pure, stable filter over the catalog. Cheap enough to run on every
//! keystroke.

mod filter;

pub use filter::{filter_items, FilterCriteria, PricePredicate};
