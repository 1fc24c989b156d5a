//! Dashboard: the parent view wiring intents to the stores.

use crate::cart_view::{render_cart_view, CartView};
use crate::category_tabs::{render_category_tabs, CategoryTabs};
use crate::intent::{Intent, Navigation};
use crate::item_form::{FormSubmission, ItemForm};
use crate::item_list::{render_item_list, ItemList};
use storefront_core::catalog::{Category, Item};
use storefront_core::search::{filter_items, FilterCriteria};
use storefront_core::ItemId;
use storefront_store::{CartSnapshot, Operation, Storefront};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Errors from dispatching an intent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Item {0} is not displayed")]
    UnknownItem(ItemId),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The store reported a failure; details are on the status channel.
    #[error("Could not {0}")]
    Failed(Operation),
}

/// Category, filter and item state for the main screen.
#[derive(Debug)]
pub struct Dashboard {
    storefront: Storefront,
    categories: Vec<Category>,
    selected_category: Option<String>,
    criteria: FilterCriteria,
    items: Vec<Item>,
    displayed: Vec<Item>,
    cart: watch::Receiver<CartSnapshot>,
}

impl Dashboard {
    /// Bind to a storefront. Call [`Dashboard::init`] before rendering.
    pub fn new(storefront: Storefront) -> Self {
        let cart = storefront.cart().subscribe();
        Self {
            storefront,
            categories: Vec::new(),
            selected_category: None,
            criteria: FilterCriteria::new(),
            items: Vec::new(),
            displayed: Vec::new(),
            cart,
        }
    }

    /// Load categories, items and the cart.
    #[instrument(skip(self))]
    pub async fn init(&mut self) {
        let (categories, _) = tokio::join!(
            self.storefront.catalog().list_categories(),
            self.storefront.cart().refresh(),
        );
        self.categories = categories;
        self.fetch_items().await;
    }

    /// The storefront behind the dashboard.
    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    /// Known categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The active category tab.
    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// The active name/price filter.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Items of the selected category, before filtering.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items after filtering, in display order.
    pub fn displayed(&self) -> &[Item] {
        &self.displayed
    }

    /// Total quantity in the cart, as last published.
    pub fn cart_count(&self) -> u64 {
        self.cart.borrow().total_quantity
    }

    /// Rows for the displayed items.
    pub fn item_list(&self) -> ItemList {
        ItemList::new(&self.displayed, &self.cart.borrow())
    }

    /// Category tabs with the current selection.
    pub fn category_tabs(&self) -> CategoryTabs {
        CategoryTabs::new(&self.categories, self.selected_category.as_deref())
    }

    /// The cart priced against the catalog.
    pub fn cart_view(&self) -> CartView {
        let catalog = self.storefront.catalog().snapshot();
        CartView::new(&self.cart.borrow(), &catalog)
    }

    /// A blank form for a new item.
    pub fn new_item_form(&self) -> ItemForm {
        ItemForm::create(self.category_names())
    }

    /// Route an intent to the stores and report where to go next.
    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, intent: Intent) -> Result<Navigation, ViewError> {
        match intent {
            Intent::NewItem => Ok(Navigation::Form(self.new_item_form())),
            Intent::EditItem(id) => {
                let item = self.item(id)?;
                Ok(Navigation::Form(ItemForm::edit(item, self.category_names())))
            }
            Intent::DeleteItem(id) => {
                self.storefront.delete_item(id).await;
                self.items.retain(|item| item.id != id);
                self.refilter();
                Ok(Navigation::Items)
            }
            Intent::ToggleCart { item_id, add } => {
                if add {
                    let item = self.item(item_id)?.clone();
                    self.storefront
                        .cart()
                        .add_item(&item)
                        .await
                        .ok_or(ViewError::Failed(Operation::AddToCart))?;
                } else if !self.storefront.cart().remove_item(item_id).await {
                    return Err(ViewError::Failed(Operation::RemoveFromCart));
                }
                Ok(Navigation::Items)
            }
            Intent::ApplyFilter(criteria) => {
                self.criteria = criteria;
                self.refilter();
                Ok(Navigation::Items)
            }
            Intent::ClearFilters => {
                self.criteria = FilterCriteria::new();
                self.refilter();
                Ok(Navigation::Items)
            }
            Intent::SelectCategory(category) => {
                if let Some(name) = &category {
                    if !self.categories.iter().any(|c| c.is_named(name)) {
                        return Err(ViewError::UnknownCategory(name.clone()));
                    }
                }
                self.selected_category = category;
                self.fetch_items().await;
                Ok(Navigation::Items)
            }
            Intent::SetQuantity { item_id, quantity } => {
                let updated = self.storefront.cart().set_quantity(item_id, quantity).await;
                if quantity > 0 && updated.is_none() {
                    return Err(ViewError::Failed(Operation::SetQuantity));
                }
                Ok(Navigation::Cart)
            }
            Intent::RemoveFromCart(item_id) => {
                if !self.storefront.cart().remove_item(item_id).await {
                    return Err(ViewError::Failed(Operation::RemoveFromCart));
                }
                Ok(Navigation::Cart)
            }
            Intent::ClearCart => {
                if !self.storefront.cart().clear().await {
                    return Err(ViewError::Failed(Operation::ClearCart));
                }
                Ok(Navigation::Cart)
            }
            Intent::SaveItem(submission) => {
                let catalog = self.storefront.catalog();
                match submission {
                    FormSubmission::Create(draft) => {
                        catalog
                            .create_item(&draft)
                            .await
                            .ok_or(ViewError::Failed(Operation::CreateItem))?;
                    }
                    FormSubmission::Update(item) => {
                        catalog
                            .update_item(&item)
                            .await
                            .ok_or(ViewError::Failed(Operation::UpdateItem))?;
                    }
                }
                self.fetch_items().await;
                Ok(Navigation::Items)
            }
            Intent::ShowItems => Ok(Navigation::Items),
            Intent::ShowCart => Ok(Navigation::Cart),
        }
    }

    /// Header, tabs and item list.
    pub fn render(&self) -> String {
        format!(
            "Storefront | Cart ({})\n{}\n\n{}",
            self.cart_count(),
            render_category_tabs(&self.category_tabs()),
            render_item_list(&self.item_list())
        )
    }

    /// The cart screen.
    pub fn render_cart(&self) -> String {
        render_cart_view(&self.cart_view())
    }

    /// Re-fetch items for the selected category, then filter.
    async fn fetch_items(&mut self) {
        let catalog = self.storefront.catalog();
        self.items = match &self.selected_category {
            Some(category) => catalog.list_items_by_category(category).await,
            None => catalog.list_items().await,
        };
        self.refilter();
    }

    fn refilter(&mut self) {
        self.displayed = filter_items(&self.items, &self.criteria)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            shown = self.displayed.len(),
            total = self.items.len(),
            "items filtered"
        );
    }

    fn item(&self, id: ItemId) -> Result<&Item, ViewError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(ViewError::UnknownItem(id))
    }

    fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_bar::{PriceMode, SearchBar};
    use std::sync::Arc;
    use storefront_data::ApiClient;
    use storefront_mock::InMemoryApi;

    async fn dashboard() -> (Arc<InMemoryApi>, Dashboard) {
        let api = Arc::new(InMemoryApi::seeded());
        let mut dashboard = Dashboard::new(Storefront::new(ApiClient::new(api.clone())));
        dashboard.init().await;
        (api, dashboard)
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_init_shows_everything() {
        let (_, dashboard) = dashboard().await;
        assert_eq!(dashboard.displayed().len(), 9);
        assert_eq!(dashboard.categories().len(), 3);
        assert_eq!(dashboard.cart_count(), 0);
        assert!(dashboard.render().starts_with("Storefront | Cart (0)"));
    }

    #[tokio::test]
    async fn test_init_fetches_each_resource_once() {
        let (api, dashboard) = dashboard().await;
        // Categories, cart and items.
        assert_eq!(api.requests_served(), 3);
        assert_eq!(dashboard.storefront().catalog().snapshot().items.len(), 9);
    }

    #[tokio::test]
    async fn test_category_then_filter() {
        let (_, mut dashboard) = dashboard().await;

        dashboard
            .dispatch(Intent::SelectCategory(Some("Snacks".into())))
            .await
            .unwrap();
        assert_eq!(names(dashboard.displayed()), vec!["Mega Chips", "Biscuit", "OK Chips"]);

        let bar = SearchBar {
            price: "0.10".into(),
            mode: PriceMode::Exact,
            ..Default::default()
        };
        dashboard.dispatch(bar.submit().unwrap()).await.unwrap();
        assert_eq!(names(dashboard.displayed()), vec!["Mega Chips", "OK Chips"]);
        assert_eq!(dashboard.items().len(), 3);

        dashboard.dispatch(Intent::ClearFilters).await.unwrap();
        assert_eq!(dashboard.displayed().len(), 3);

        dashboard.dispatch(Intent::SelectCategory(None)).await.unwrap();
        assert_eq!(dashboard.displayed().len(), 9);
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let (_, mut dashboard) = dashboard().await;
        let result = dashboard
            .dispatch(Intent::SelectCategory(Some("Frozen".into())))
            .await;
        assert_eq!(result, Err(ViewError::UnknownCategory("Frozen".into())));
    }

    #[tokio::test]
    async fn test_toggle_cart_updates_count_and_rows() {
        let (_, mut dashboard) = dashboard().await;
        let row = dashboard.item_list().rows[3].clone();

        dashboard.dispatch(row.toggle()).await.unwrap();
        assert_eq!(dashboard.cart_count(), 1);
        let row = dashboard.item_list().rows[3].clone();
        assert!(row.in_cart);

        dashboard.dispatch(row.toggle()).await.unwrap();
        assert_eq!(dashboard.cart_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_item_cascades_to_cart() {
        let (api, mut dashboard) = dashboard().await;
        let id = ItemId::new(8);
        dashboard
            .dispatch(Intent::ToggleCart { item_id: id, add: true })
            .await
            .unwrap();

        dashboard.dispatch(Intent::DeleteItem(id)).await.unwrap();

        assert!(dashboard.displayed().iter().all(|i| i.id != id));
        assert_eq!(dashboard.cart_count(), 0);
        assert!(api.cart().is_empty());
    }

    #[tokio::test]
    async fn test_form_round_trip() {
        let (_, mut dashboard) = dashboard().await;

        let Navigation::Form(mut form) = dashboard.dispatch(Intent::NewItem).await.unwrap() else {
            panic!("expected a form");
        };
        form.name = "Donut".into();
        form.price = "0.45".into();
        form.category = "Bakery".into();
        dashboard.dispatch(form.submit().unwrap()).await.unwrap();
        assert_eq!(dashboard.displayed().len(), 10);

        let Navigation::Form(mut form) = dashboard
            .dispatch(Intent::EditItem(ItemId::new(10)))
            .await
            .unwrap()
        else {
            panic!("expected a form");
        };
        assert_eq!(form.name, "Donut");
        form.name = "Glazed Donut".into();
        dashboard.dispatch(form.submit().unwrap()).await.unwrap();
        assert_eq!(dashboard.displayed()[9].name, "Glazed Donut");
    }

    #[tokio::test]
    async fn test_cart_screen() {
        let (_, mut dashboard) = dashboard().await;
        dashboard
            .dispatch(Intent::ToggleCart { item_id: ItemId::new(1), add: true })
            .await
            .unwrap();
        let nav = dashboard
            .dispatch(Intent::SetQuantity { item_id: ItemId::new(1), quantity: 3 })
            .await
            .unwrap();

        assert_eq!(nav, Navigation::Cart);
        assert!(dashboard.render_cart().ends_with("Total: $0.90"));

        dashboard.dispatch(Intent::ClearCart).await.unwrap();
        assert_eq!(dashboard.render_cart(), "Your cart is empty.");
    }

    #[tokio::test]
    async fn test_edit_unknown_item() {
        let (_, mut dashboard) = dashboard().await;
        let result = dashboard.dispatch(Intent::EditItem(ItemId::new(99))).await;
        assert_eq!(result, Err(ViewError::UnknownItem(ItemId::new(99))));
    }
}
