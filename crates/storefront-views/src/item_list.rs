//! Item list.

use crate::item_row::{render_item_row, ItemRow};
use storefront_core::catalog::Item;
use storefront_store::CartSnapshot;

/// Rows for the displayed items, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    pub rows: Vec<ItemRow>,
}

impl ItemList {
    /// Bind items to the current cart.
    pub fn new(items: &[Item], cart: &CartSnapshot) -> Self {
        Self {
            rows: items
                .iter()
                .map(|item| ItemRow::new(item.clone(), cart))
                .collect(),
        }
    }

    /// Check if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Render the list, one row per line.
pub fn render_item_list(list: &ItemList) -> String {
    if list.is_empty() {
        return "No items found.".to_string();
    }
    list.rows
        .iter()
        .map(render_item_row)
        .collect::<Vec<_>>()
        .join("\n")
}
