//! Storefront views.
//!
//! Each view is a plain value built from store snapshots, with methods
//! returning the [`Intent`] a user action would emit and a `render_*`
//! function producing text. The [`Dashboard`] owns the main screen's
//! state and routes intents to the stores.

mod cart_view;
mod category_tabs;
mod dashboard;
mod intent;
mod item_form;
mod item_list;
mod item_row;
mod search_bar;

pub use cart_view::{render_cart_view, CartLine, CartView};
pub use category_tabs::{render_category_tabs, CategoryTabs, Tab, ALL_TAB};
pub use dashboard::{Dashboard, ViewError};
pub use intent::{Intent, Navigation};
pub use item_form::{render_item_form, Field, FieldError, FormErrors, FormMode, FormSubmission, ItemForm};
pub use item_list::{render_item_list, ItemList};
pub use item_row::{render_item_row, ItemRow};
pub use search_bar::{PriceMode, SearchBar};
