//! List categories.

use anyhow::Result;

use crate::context::Context;

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront();
    let spinner = ctx.output.spinner("categories");
    let categories = storefront.catalog().list_categories().await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.kv(&category.id.to_string(), &category.name);
    }

    Ok(())
}
