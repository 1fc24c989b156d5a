//! User intents emitted by views.

use crate::item_form::FormSubmission;
use storefront_core::search::FilterCriteria;
use storefront_core::ItemId;

/// Something the user asked for. Views emit these; the dashboard routes
/// them to the stores.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Open the form for a new item.
    NewItem,
    /// Open the form for an existing item.
    EditItem(ItemId),
    /// Delete an item (and its cart entry).
    DeleteItem(ItemId),
    /// Check or uncheck an item's cart box.
    ToggleCart { item_id: ItemId, add: bool },
    /// Replace the active filter.
    ApplyFilter(FilterCriteria),
    /// Drop name and price filters.
    ClearFilters,
    /// Switch category tab; `None` is "All".
    SelectCategory(Option<String>),
    /// Change a cart quantity; zero or less removes.
    SetQuantity { item_id: ItemId, quantity: i64 },
    /// Remove a cart entry.
    RemoveFromCart(ItemId),
    /// Empty the cart.
    ClearCart,
    /// Persist a validated form.
    SaveItem(FormSubmission),
    /// Show the item list.
    ShowItems,
    /// Show the cart.
    ShowCart,
}

/// What the front end should show after an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The filtered item list.
    Items,
    /// The cart.
    Cart,
    /// An item form, prefilled for edits.
    Form(crate::ItemForm),
}
