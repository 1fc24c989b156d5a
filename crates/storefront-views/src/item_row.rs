//! One row of the item list.

use crate::Intent;
use storefront_core::catalog::Item;
use storefront_store::CartSnapshot;

/// An item plus its derived cart checkbox state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item: Item,
    pub in_cart: bool,
}

impl ItemRow {
    /// Bind an item to the current cart.
    pub fn new(item: Item, cart: &CartSnapshot) -> Self {
        let in_cart = cart.contains(item.id);
        Self { item, in_cart }
    }

    /// Intent for clicking the cart checkbox.
    pub fn toggle(&self) -> Intent {
        Intent::ToggleCart {
            item_id: self.item.id,
            add: !self.in_cart,
        }
    }

    /// Intent for the edit button.
    pub fn edit(&self) -> Intent {
        Intent::EditItem(self.item.id)
    }

    /// Intent for the delete button.
    pub fn delete(&self) -> Intent {
        Intent::DeleteItem(self.item.id)
    }
}

/// Render a row as `[x] #4  Alsi Cola   $0.25  Drinks`.
pub fn render_item_row(row: &ItemRow) -> String {
    format!(
        "[{}] #{:<3} {:<20} {:>7}  {}",
        if row.in_cart { 'x' } else { ' ' },
        row.item.id.get(),
        row.item.name,
        row.item.price.display(),
        row.item.category
    )
}
