//! Catalog filter.

use crate::catalog::Item;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Numeric predicate on an item's unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "price", rename_all = "snake_case")]
pub enum PricePredicate {
    /// Price equals the bound exactly.
    Exact(Money),
    /// Price is at most the bound.
    AtMost(Money),
}

impl PricePredicate {
    /// Check a price against the predicate.
    pub fn matches(&self, price: Money) -> bool {
        match *self {
            PricePredicate::Exact(bound) => price == bound,
            PricePredicate::AtMost(bound) => price <= bound,
        }
    }

    /// The bound being compared against.
    pub fn bound(&self) -> Money {
        match *self {
            PricePredicate::Exact(bound) | PricePredicate::AtMost(bound) => bound,
        }
    }
}

/// Optional predicates combined with AND. An empty criteria matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the item name.
    pub name: Option<String>,
    /// Price predicate.
    pub price: Option<PricePredicate>,
    /// Exact category label.
    pub category: Option<String>,
}

impl FilterCriteria {
    /// Criteria matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the name to contain `needle`, ignoring case.
    pub fn name(mut self, needle: impl Into<String>) -> Self {
        self.name = Some(needle.into());
        self
    }

    /// Require an exact price.
    pub fn exact_price(mut self, price: Money) -> Self {
        self.price = Some(PricePredicate::Exact(price));
        self
    }

    /// Require a price no greater than `price`.
    pub fn max_price(mut self, price: Money) -> Self {
        self.price = Some(PricePredicate::AtMost(price));
        self
    }

    /// Require an exact category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check if no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.name_needle().is_none() && self.price.is_none() && self.category.is_none()
    }

    /// Check a single item.
    pub fn matches(&self, item: &Item) -> bool {
        let name_ok = match self.name_needle() {
            Some(needle) => item.name.to_lowercase().contains(&needle),
            None => true,
        };
        let price_ok = self.price.map_or(true, |p| p.matches(item.price));
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| item.in_category(c));

        name_ok && price_ok && category_ok
    }

    /// Lowercased name needle; blank input means no predicate.
    fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
    }
}

/// Stable filter: the matching items in their original relative order.
pub fn filter_items<'a>(items: &'a [Item], criteria: &FilterCriteria) -> Vec<&'a Item> {
    items.iter().filter(|item| criteria.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;
    use crate::seed;

    fn names(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let items = vec![
            Item::new(ItemId::new(4), "Alsi Cola", Money::from_cents(25), "Drinks"),
            Item::new(ItemId::new(6), "Viva", Money::from_cents(30), "Drinks"),
        ];
        let result = filter_items(&items, &FilterCriteria::new().name("cola"));
        assert_eq!(names(&result), vec!["Alsi Cola"]);
    }

    #[test]
    fn test_max_price_on_seed_catalog() {
        let items = seed::items();
        let result = filter_items(&items, &FilterCriteria::new().max_price(Money::from_cents(20)));

        assert_eq!(
            names(&result),
            vec!["Mega Chips", "Croissant", "Biscuit", "OK Chips"]
        );
    }

    #[test]
    fn test_exact_price() {
        let items = seed::items();
        let result = filter_items(&items, &FilterCriteria::new().exact_price(Money::from_cents(30)));
        assert_eq!(names(&result), vec!["White Bread", "Viva"]);
    }

    #[test]
    fn test_category_and_name_combined() {
        let items = seed::items();
        let criteria = FilterCriteria::new().name("chips").category("Snacks");
        assert_eq!(names(&filter_items(&items, &criteria)), vec!["Mega Chips", "OK Chips"]);

        let criteria = FilterCriteria::new().name("chips").category("Bakery");
        assert!(filter_items(&items, &criteria).is_empty());
    }

    #[test]
    fn test_category_is_exact_match() {
        let items = seed::items();
        let result = filter_items(&items, &FilterCriteria::new().category("bakery"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_criteria_keeps_everything_in_order() {
        let items = seed::items();
        let result = filter_items(&items, &FilterCriteria::new());
        let ids: Vec<u64> = result.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_blank_name_is_no_predicate() {
        let criteria = FilterCriteria::new().name("   ");
        assert!(criteria.is_empty());
        assert_eq!(filter_items(&seed::items(), &criteria).len(), 9);
    }
}
