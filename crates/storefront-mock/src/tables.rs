//! Backing tables.

use storefront_core::cart::CartEntry;
use storefront_core::catalog::{Category, Item, ItemDraft};
use storefront_core::seed;
use storefront_core::ItemId;

/// The three collections the backend serves.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub items: Vec<Item>,
    pub categories: Vec<Category>,
    pub cart: Vec<CartEntry>,
}

impl Tables {
    /// Tables holding the demo catalog and an empty cart.
    pub fn seeded() -> Self {
        Self {
            items: seed::items(),
            categories: seed::categories(),
            cart: Vec::new(),
        }
    }

    /// Items, optionally restricted to one category.
    pub fn items_in(&self, category: Option<&str>) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| category.map_or(true, |c| item.in_category(c)))
            .cloned()
            .collect()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Identifier for the next created item: one past the largest in use.
    pub fn next_item_id(&self) -> ItemId {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(ItemId::new(1), |id| id.next())
    }

    pub fn insert_item(&mut self, draft: ItemDraft) -> Item {
        let item = Item::from_draft(self.next_item_id(), draft);
        self.items.push(item.clone());
        item
    }

    /// Replace an item in place. Returns `false` for an unknown id.
    pub fn replace_item(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn cart_entry_mut(&mut self, id: ItemId) -> Option<&mut CartEntry> {
        self.cart.iter_mut().find(|entry| entry.item_id == id)
    }

    pub fn remove_cart_entry(&mut self, id: ItemId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|entry| entry.item_id != id);
        self.cart.len() != before
    }
}
