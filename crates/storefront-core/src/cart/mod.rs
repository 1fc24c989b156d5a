//! Shopping cart module.
//!
//! Cart entries reference items by identifier only; totals are computed by
//! joining against an [`ItemLookup`](crate::catalog::ItemLookup).

mod entry;
mod pricing;

pub use entry::{CartEntry, QuantityUpdate, MAX_QUANTITY_PER_ITEM};
pub use pricing::{total_quantity, CartTotals, LinePricing};
