//! Item types.

use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A purchasable item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Category label.
    pub category: String,
}

impl Item {
    /// Create an item.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
        }
    }

    /// Materialize a draft under a freshly assigned identifier.
    pub fn from_draft(id: ItemId, draft: ItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            category: draft.category,
        }
    }

    /// Strip the identifier.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
        }
    }

    /// Check exact category membership.
    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}

/// An item that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Category label.
    pub category: String,
}

impl ItemDraft {
    /// Create a draft.
    pub fn new(name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
        }
    }
}

/// Resolves an item's current unit price.
///
/// The cart stores only item references; prices are joined in at call time
/// through this trait.
pub trait ItemLookup {
    /// Unit price of `id`, if the item exists.
    fn unit_price(&self, id: ItemId) -> Option<Money>;
}

impl ItemLookup for [Item] {
    fn unit_price(&self, id: ItemId) -> Option<Money> {
        self.iter().find(|item| item.id == id).map(|item| item.price)
    }
}

impl ItemLookup for Vec<Item> {
    fn unit_price(&self, id: ItemId) -> Option<Money> {
        self.as_slice().unit_price(id)
    }
}

impl ItemLookup for HashMap<ItemId, Item> {
    fn unit_price(&self, id: ItemId) -> Option<Money> {
        self.get(&id).map(|item| item.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> Item {
        Item::new(ItemId::new(4), "Alsi Cola", Money::from_cents(25), "Drinks")
    }

    #[test]
    fn test_item_wire_shape() {
        let json = serde_json::to_value(cola()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 4, "name": "Alsi Cola", "price": 0.25, "category": "Drinks" })
        );
    }

    #[test]
    fn test_draft_has_no_id() {
        let json = serde_json::to_value(cola().to_draft()).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_from_draft() {
        let draft = ItemDraft::new("Viva", Money::from_cents(30), "Drinks");
        let item = Item::from_draft(ItemId::new(10), draft);
        assert_eq!(item.id, ItemId::new(10));
        assert!(item.in_category("Drinks"));
    }

    #[test]
    fn test_lookups() {
        let items = vec![cola()];
        assert_eq!(items.unit_price(ItemId::new(4)), Some(Money::from_cents(25)));
        assert_eq!(items.unit_price(ItemId::new(5)), None);

        let map: HashMap<ItemId, Item> = items.iter().map(|i| (i.id, i.clone())).collect();
        assert_eq!(map.unit_price(ItemId::new(4)), Some(Money::from_cents(25)));
    }
}
