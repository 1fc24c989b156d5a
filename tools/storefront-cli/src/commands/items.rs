//! List and filter items.

use anyhow::{bail, Result};
use storefront_core::search::filter_items;
use storefront_views::{PriceMode, SearchBar};

use super::ItemsArgs;
use crate::context::Context;

/// Run the items command.
pub async fn run(args: ItemsArgs, ctx: &Context) -> Result<()> {
    let bar = search_bar(&args);
    let criteria = bar.criteria()?;

    let storefront = ctx.storefront();
    let spinner = ctx.output.spinner("items");
    let catalog = storefront.catalog();
    if let Some(category) = &args.category {
        let known = catalog.list_categories().await;
        if !known.iter().any(|c| c.is_named(category)) {
            spinner.finish_and_clear();
            bail!("Unknown category: {}", category);
        }
    }
    let items = match &args.category {
        Some(category) => catalog.list_items_by_category(category).await,
        None => catalog.list_items().await,
    };
    spinner.finish_and_clear();

    let shown = filter_items(&items, &criteria);
    ctx.output.debug(&format!("{} of {} items match", shown.len(), items.len()));

    ctx.output.header("Items");
    ctx.output.items(&shown);

    Ok(())
}

fn search_bar(args: &ItemsArgs) -> SearchBar {
    let (price, mode) = match (&args.price, &args.max_price) {
        (_, Some(max)) => (max.clone(), PriceMode::AtMost),
        (Some(exact), None) => (exact.clone(), PriceMode::Exact),
        (None, None) => (String::new(), PriceMode::Exact),
    };
    SearchBar {
        name: args.name.clone().unwrap_or_default(),
        price,
        mode,
    }
}
