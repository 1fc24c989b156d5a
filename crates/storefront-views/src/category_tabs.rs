//! Category tabs.

use crate::Intent;
use storefront_core::catalog::Category;

/// Label of the tab showing every category.
pub const ALL_TAB: &str = "All";

/// One tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    /// Category to select; `None` for the "All" tab.
    pub category: Option<String>,
    pub selected: bool,
}

/// "All" followed by one tab per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTabs {
    categories: Vec<String>,
    selected: Option<String>,
}

impl CategoryTabs {
    /// Tabs for `categories` with `selected` active.
    pub fn new(categories: &[Category], selected: Option<&str>) -> Self {
        Self {
            categories: categories.iter().map(|c| c.name.clone()).collect(),
            selected: selected.map(str::to_string),
        }
    }

    /// The tabs in display order.
    pub fn tabs(&self) -> Vec<Tab> {
        std::iter::once(Tab {
            label: ALL_TAB.to_string(),
            category: None,
            selected: self.selected.is_none(),
        })
        .chain(self.categories.iter().map(|name| Tab {
            label: name.clone(),
            category: Some(name.clone()),
            selected: self.selected.as_deref() == Some(name.as_str()),
        }))
        .collect()
    }

    /// Intent for clicking the tab labelled `label`.
    pub fn select(&self, label: &str) -> Option<Intent> {
        self.tabs()
            .into_iter()
            .find(|tab| tab.label.eq_ignore_ascii_case(label))
            .map(|tab| Intent::SelectCategory(tab.category))
    }
}

/// Render as `[All]  Bakery  Drinks`, the active tab in brackets.
pub fn render_category_tabs(tabs: &CategoryTabs) -> String {
    tabs.tabs()
        .iter()
        .map(|tab| {
            if tab.selected {
                format!("[{}]", tab.label)
            } else {
                format!(" {} ", tab.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
