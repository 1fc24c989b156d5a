//! Cart entry types.

use crate::error::CommerceError;
use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart entry.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// One line of the cart: an item reference and a positive quantity.
///
/// Entries are keyed by item identifier, so a cart holds at most one entry
/// per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// The referenced item; also the entry's resource identifier.
    pub item_id: ItemId,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartEntry {
    /// Create an entry, validating the quantity.
    pub fn new(item_id: ItemId, quantity: u32) -> Result<Self, CommerceError> {
        Ok(Self {
            item_id,
            quantity: validate_quantity(i64::from(quantity))?,
        })
    }

    /// Entry with quantity 1.
    pub fn single(item_id: ItemId) -> Self {
        Self {
            item_id,
            quantity: 1,
        }
    }

    /// Quantity after adding one more unit.
    pub fn incremented(&self) -> Result<u32, CommerceError> {
        validate_quantity(i64::from(self.quantity) + 1)
    }
}

/// Body of `PUT /cart/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    /// New quantity.
    pub quantity: u32,
}

impl QuantityUpdate {
    /// Validate a requested quantity.
    ///
    /// Zero and negative quantities are rejected here; callers treat them as
    /// a removal before building an update.
    pub fn new(quantity: i64) -> Result<Self, CommerceError> {
        Ok(Self {
            quantity: validate_quantity(quantity)?,
        })
    }
}

fn validate_quantity(quantity: i64) -> Result<u32, CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > i64::from(MAX_QUANTITY_PER_ITEM) {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    // Bounded above by MAX_QUANTITY_PER_ITEM.
    Ok(quantity as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_shape() {
        let entry = CartEntry::new(ItemId::new(3), 2).unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json, serde_json::json!({ "itemId": 3, "quantity": 2 }));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(
            CartEntry::new(ItemId::new(1), 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(QuantityUpdate::new(-4).is_err());
    }

    #[test]
    fn test_quantity_limit() {
        assert!(QuantityUpdate::new(i64::from(MAX_QUANTITY_PER_ITEM)).is_ok());
        assert_eq!(
            QuantityUpdate::new(10_000),
            Err(CommerceError::QuantityExceedsLimit(10_000, MAX_QUANTITY_PER_ITEM))
        );
    }

    #[test]
    fn test_incremented() {
        let entry = CartEntry::single(ItemId::new(1));
        assert_eq!(entry.incremented(), Ok(2));

        let full = CartEntry {
            item_id: ItemId::new(1),
            quantity: MAX_QUANTITY_PER_ITEM,
        };
        assert!(full.incremented().is_err());
    }
}
