//! Cart totals.

use crate::cart::CartEntry;
use crate::catalog::ItemLookup;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing for one cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePricing {
    /// Item being purchased.
    pub item_id: ItemId,
    /// Unit price at the time of calculation.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub total: Money,
}

/// Aggregate view of a cart joined against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Priced lines, in cart order.
    pub lines: Vec<LinePricing>,
    /// Sum of all quantities, including unresolved entries.
    pub item_count: u64,
    /// Sum of line totals.
    pub grand_total: Money,
    /// Entries whose item the lookup did not know.
    pub unresolved: Vec<ItemId>,
}

impl CartTotals {
    /// Join `entries` against `lookup`.
    ///
    /// Entries referencing unknown items count toward `item_count` but add
    /// nothing to `grand_total`; they are listed in `unresolved`.
    pub fn compute<L>(entries: &[CartEntry], lookup: &L) -> Result<Self, CommerceError>
    where
        L: ItemLookup + ?Sized,
    {
        let mut totals = CartTotals {
            item_count: total_quantity(entries),
            ..Default::default()
        };

        for entry in entries {
            let Some(unit_price) = lookup.unit_price(entry.item_id) else {
                totals.unresolved.push(entry.item_id);
                continue;
            };
            let total = unit_price
                .checked_mul(u64::from(entry.quantity))
                .ok_or(CommerceError::Overflow)?;
            totals.grand_total = totals
                .grand_total
                .checked_add(total)
                .ok_or(CommerceError::Overflow)?;
            totals.lines.push(LinePricing {
                item_id: entry.item_id,
                unit_price,
                quantity: entry.quantity,
                total,
            });
        }

        Ok(totals)
    }

    /// Check if nothing is in the cart.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Pricing for a single item.
    pub fn line(&self, item_id: ItemId) -> Option<&LinePricing> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }
}

/// Sum of quantities.
pub fn total_quantity(entries: &[CartEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.quantity)).sum()
}
