//! Interactive dashboard.

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use storefront_core::ItemId;
use storefront_store::StoreEvent;
use storefront_views::{
    render_item_form, Dashboard, Intent, ItemForm, Navigation, PriceMode, SearchBar,
};
use tokio::sync::broadcast;

use crate::context::Context;
use crate::output::Output;

const HELP: &[(&str, &str)] = &[
    ("list", "show the item list"),
    ("tab <category|all>", "switch category"),
    ("filter name=<text> price=<x> max=<x>", "filter the list"),
    ("clear", "drop name and price filters"),
    ("add <id> / drop <id>", "check or uncheck an item's cart box"),
    ("new / edit <id>", "open the item form"),
    ("delete <id>", "delete an item"),
    ("cart", "show the cart"),
    ("qty <id> <n>", "set a cart quantity (0 removes)"),
    ("remove <id>", "remove a cart entry"),
    ("empty", "empty the cart"),
    ("help", "show this help"),
    ("quit", "leave the shell"),
];

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Dispatch(Intent),
    /// Deletion asks for confirmation first.
    Delete(ItemId),
    Help,
    Quit,
}

/// Run the shell command.
pub async fn run(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront();
    let mut events = storefront.events();
    let mut dashboard = Dashboard::new(storefront);

    let spinner = ctx.output.spinner("storefront");
    dashboard.init().await;
    spinner.finish_and_clear();
    report_events(&ctx.output, &mut events);

    ctx.output.view(&dashboard.render());
    ctx.output.info("Type `help` for commands.");

    loop {
        let line: String = Input::new()
            .with_prompt("storefront")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read command")?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                ctx.output.warn(&message);
                continue;
            }
        };

        let intent = match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                for (usage, description) in HELP {
                    ctx.output.kv(usage, description);
                }
                continue;
            }
            ShellCommand::Delete(id) => {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete item #{}?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cancelled");
                    continue;
                }
                Intent::DeleteItem(id)
            }
            ShellCommand::Dispatch(intent) => intent,
        };

        let result = dashboard.dispatch(intent).await;
        report_events(&ctx.output, &mut events);
        match result {
            Ok(navigation) => show(ctx, &mut dashboard, &mut events, navigation).await?,
            Err(e) => ctx.output.warn(&e.to_string()),
        }
    }

    Ok(())
}

async fn show(
    ctx: &Context,
    dashboard: &mut Dashboard,
    events: &mut broadcast::Receiver<StoreEvent>,
    navigation: Navigation,
) -> Result<()> {
    match navigation {
        Navigation::Items => ctx.output.view(&dashboard.render()),
        Navigation::Cart => ctx.output.view(&dashboard.render_cart()),
        Navigation::Form(form) => {
            let Some(intent) = fill_form(ctx, form)? else {
                ctx.output.info("Cancelled");
                return Ok(());
            };
            let result = dashboard.dispatch(intent).await;
            report_events(&ctx.output, events);
            match result {
                Ok(_) => {
                    ctx.output.success("Saved");
                    ctx.output.view(&dashboard.render());
                }
                Err(e) => ctx.output.warn(&e.to_string()),
            }
        }
    }
    Ok(())
}

/// Prompt for each field until the form validates or the user gives up.
fn fill_form(ctx: &Context, mut form: ItemForm) -> Result<Option<Intent>> {
    ctx.output.view(&render_item_form(&form, None));
    loop {
        form.name = Input::new()
            .with_prompt("Name")
            .with_initial_text(form.name.clone())
            .allow_empty(true)
            .interact_text()?;
        form.price = Input::new()
            .with_prompt("Price")
            .with_initial_text(form.price.clone())
            .allow_empty(true)
            .interact_text()?;
        if !form.categories.is_empty() {
            let current = form
                .categories
                .iter()
                .position(|c| *c == form.category)
                .unwrap_or(0);
            let choice = Select::new()
                .with_prompt("Category")
                .items(&form.categories)
                .default(current)
                .interact()?;
            form.category = form.categories[choice].clone();
        }

        match form.submit() {
            Ok(intent) => return Ok(Some(intent)),
            Err(errors) => {
                ctx.output.view(&render_item_form(&form, Some(&errors)));
                let again = Confirm::new()
                    .with_prompt("Fix and try again?")
                    .default(true)
                    .interact()?;
                if !again {
                    return Ok(None);
                }
            }
        }
    }
}

/// Print events published since the last call.
fn report_events(output: &Output, events: &mut broadcast::Receiver<StoreEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => output.event(&event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                output.warn(&format!("{} status events skipped", skipped));
            }
            Err(_) => break,
        }
    }
}

fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::Dispatch(Intent::ShowItems),
        "cart" => ShellCommand::Dispatch(Intent::ShowCart),
        "tab" => {
            let name = rest.join(" ");
            let category = match name.as_str() {
                "" => return Err("usage: tab <category|all>".to_string()),
                n if n.eq_ignore_ascii_case("all") => None,
                n => Some(n.to_string()),
            };
            ShellCommand::Dispatch(Intent::SelectCategory(category))
        }
        "filter" => {
            let bar = parse_filter(&rest)?;
            ShellCommand::Dispatch(bar.submit().map_err(|e| e.to_string())?)
        }
        "clear" => ShellCommand::Dispatch(Intent::ClearFilters),
        "add" => ShellCommand::Dispatch(Intent::ToggleCart {
            item_id: parse_id(&rest)?,
            add: true,
        }),
        "drop" => ShellCommand::Dispatch(Intent::ToggleCart {
            item_id: parse_id(&rest)?,
            add: false,
        }),
        "new" => ShellCommand::Dispatch(Intent::NewItem),
        "edit" => ShellCommand::Dispatch(Intent::EditItem(parse_id(&rest)?)),
        "delete" | "del" => ShellCommand::Delete(parse_id(&rest)?),
        "qty" => {
            let [id, quantity] = rest.as_slice() else {
                return Err("usage: qty <id> <quantity>".to_string());
            };
            ShellCommand::Dispatch(Intent::SetQuantity {
                item_id: parse_id(&[id])?,
                quantity: quantity
                    .parse()
                    .map_err(|_| format!("not a quantity: {}", quantity))?,
            })
        }
        "remove" | "rm" => ShellCommand::Dispatch(Intent::RemoveFromCart(parse_id(&rest)?)),
        "empty" => ShellCommand::Dispatch(Intent::ClearCart),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {} (try `help`)", other)),
    };
    Ok(Some(command))
}

fn parse_id(args: &[&str]) -> Result<ItemId, String> {
    match args {
        [id] => id.parse().map_err(|_| format!("not an item id: {}", id)),
        _ => Err("expected one item id".to_string()),
    }
}

/// Parse `key=value` pairs; words without `=` extend the previous value.
fn parse_filter(args: &[&str]) -> Result<SearchBar, String> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for word in args {
        match word.split_once('=') {
            Some((key, value)) => pairs.push((key.to_lowercase(), value.to_string())),
            None => match pairs.last_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(word);
                }
                None => return Err(format!("expected key=value, got {}", word)),
            },
        }
    }

    let mut bar = SearchBar::new();
    for (key, value) in pairs {
        match key.as_str() {
            "name" => bar.name = value,
            "price" => {
                bar.price = value;
                bar.mode = PriceMode::Exact;
            }
            "max" => {
                bar.price = value;
                bar.mode = PriceMode::AtMost;
            }
            other => return Err(format!("unknown filter: {}", other)),
        }
    }
    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::search::FilterCriteria;
    use storefront_core::Money;

    fn dispatched(line: &str) -> Intent {
        match parse_command(line) {
            Ok(Some(ShellCommand::Dispatch(intent))) => intent,
            other => panic!("unexpected parse of {:?}: {:?}", line, other),
        }
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_cart_commands() {
        assert_eq!(
            dispatched("add 4"),
            Intent::ToggleCart { item_id: ItemId::new(4), add: true }
        );
        assert_eq!(
            dispatched("QTY 4 0"),
            Intent::SetQuantity { item_id: ItemId::new(4), quantity: 0 }
        );
        assert_eq!(dispatched("rm 4"), Intent::RemoveFromCart(ItemId::new(4)));
        assert!(parse_command("qty 4").is_err());
        assert!(parse_command("add four").is_err());
    }

    #[test]
    fn test_tab() {
        assert_eq!(dispatched("tab all"), Intent::SelectCategory(None));
        assert_eq!(
            dispatched("tab Soft Drinks"),
            Intent::SelectCategory(Some("Soft Drinks".to_string()))
        );
        assert!(parse_command("tab").is_err());
    }

    #[test]
    fn test_filter() {
        assert_eq!(
            dispatched("filter name=alsi cola max=0.30"),
            Intent::ApplyFilter(
                FilterCriteria::new()
                    .name("alsi cola")
                    .max_price(Money::from_cents(30))
            )
        );
        assert!(parse_command("filter cola").is_err());
        assert!(parse_command("filter colour=red").is_err());
        assert!(parse_command("filter price=abc").is_err());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        assert_eq!(
            parse_command("delete 3"),
            Ok(Some(ShellCommand::Delete(ItemId::new(3))))
        );
    }

    #[test]
    fn test_misc() {
        assert_eq!(parse_command("quit"), Ok(Some(ShellCommand::Quit)));
        assert_eq!(parse_command("help"), Ok(Some(ShellCommand::Help)));
        assert!(parse_command("checkout").is_err());
    }
}
