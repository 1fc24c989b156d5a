//! The canonical demo catalog.

use crate::catalog::{Category, Item};
use crate::ids::{CategoryId, ItemId};
use crate::money::Money;

const ITEMS: [(u64, &str, i64, &str); 9] = [
    (1, "White Bread", 30, "Bakery"),
    (2, "Mega Chips", 10, "Snacks"),
    (3, "Croissant", 10, "Bakery"),
    (4, "Alsi Cola", 25, "Drinks"),
    (5, "Biscuit", 20, "Snacks"),
    (6, "Viva", 30, "Drinks"),
    (7, "OK Chips", 10, "Snacks"),
    (8, "Cheese Sandwich", 35, "Bakery"),
    (9, "Cup Cake", 50, "Bakery"),
];

const CATEGORIES: [(u64, &str); 3] = [(11, "Bakery"), (12, "Drinks"), (13, "Snacks")];

/// Seed items, ids 1 through 9.
pub fn items() -> Vec<Item> {
    ITEMS
        .iter()
        .map(|&(id, name, cents, category)| {
            Item::new(ItemId::new(id), name, Money::from_cents(cents), category)
        })
        .collect()
}

/// Seed categories, ids 11 through 13.
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|&(id, name)| Category::new(CategoryId::new(id), name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_unique() {
        let items = items();
        let mut ids: Vec<_> = items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_seed_items_reference_seed_categories() {
        let categories = categories();
        for item in items() {
            assert!(
                categories.iter().any(|c| c.is_named(&item.category)),
                "{} has unknown category {}",
                item.name,
                item.category
            );
        }
    }
}
