//! Shopping cart view.

use crate::Intent;
use storefront_core::cart::CartTotals;
use storefront_core::{ItemId, Money};
use storefront_store::{CartSnapshot, CatalogSnapshot};
use tracing::warn;

/// One cart entry joined against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: ItemId,
    /// `None` when the catalog no longer has the item.
    pub name: Option<String>,
    pub unit_price: Option<Money>,
    pub quantity: u32,
    pub total: Money,
}

/// Lines, count and grand total of the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub grand_total: Money,
}

impl CartView {
    /// Price `cart` against `catalog`.
    pub fn new(cart: &CartSnapshot, catalog: &CatalogSnapshot) -> Self {
        let totals = CartTotals::compute(&cart.entries, catalog).unwrap_or_else(|e| {
            warn!(error = %e, "cart total cannot be computed");
            CartTotals::default()
        });

        let lines = cart
            .entries
            .iter()
            .map(|entry| {
                let priced = totals.line(entry.item_id);
                CartLine {
                    item_id: entry.item_id,
                    name: catalog.find(entry.item_id).map(|i| i.name.clone()),
                    unit_price: priced.map(|l| l.unit_price),
                    quantity: entry.quantity,
                    total: priced.map_or(Money::ZERO, |l| l.total),
                }
            })
            .collect();

        Self {
            lines,
            item_count: cart.total_quantity,
            grand_total: totals.grand_total,
        }
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Intent for editing a quantity field.
    pub fn set_quantity(&self, item_id: ItemId, quantity: i64) -> Intent {
        Intent::SetQuantity { item_id, quantity }
    }

    /// Intent for a line's remove button.
    pub fn remove(&self, item_id: ItemId) -> Intent {
        Intent::RemoveFromCart(item_id)
    }

    /// Intent for the clear button.
    pub fn clear(&self) -> Intent {
        Intent::ClearCart
    }
}

/// Render the cart with a total line.
pub fn render_cart_view(view: &CartView) -> String {
    if view.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut lines = vec![format!("Cart ({} items)", view.item_count)];
    for line in &view.lines {
        lines.push(match (&line.name, line.unit_price) {
            (Some(name), Some(unit)) => format!(
                "  {:>4} x {:<20} {:>7} = {:>8}",
                line.quantity,
                name,
                unit.display(),
                line.total.display()
            ),
            _ => format!("  {:>4} x item #{} (unavailable)", line.quantity, line.item_id),
        });
    }
    lines.push(format!("Total: {}", view.grand_total));
    lines.join("\n")
}
