//! Terminal output: styled messages, item tables, rendered views and JSON.
//!
//! In `--json` mode only JSON documents reach stdout; everything else is
//! suppressed except errors, which are printed as `{"error": ...}` on stderr.

use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use storefront_core::catalog::Item;
use storefront_store::StoreEvent;

/// Column titles and widths of the item table.
const ITEM_COLUMNS: [(&str, usize); 4] = [("ID", 4), ("NAME", 20), ("PRICE", 8), ("CATEGORY", 12)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Tone {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Error => style("✗").red(),
            Tone::Debug => style("→").dim(),
        }
    }

    fn is_diagnostic(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error | Tone::Debug)
    }
}

/// Writes everything the CLI shows the user.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn info(&self, msg: &str) {
        self.say(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.say(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.say(Tone::Warn, msg);
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.say(Tone::Debug, msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", Tone::Error.marker(), style(msg).red());
        }
    }

    fn say(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        if tone.is_diagnostic() {
            eprintln!("{} {}", tone.marker(), msg);
        } else {
            println!("{} {}", tone.marker(), msg);
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a rendered screen unchanged.
    pub fn view(&self, rendered: &str) {
        if !self.json {
            println!("{}", rendered);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Pretty-printed JSON on stdout.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Could not encode output: {}", e)),
        }
    }

    /// Items as an aligned table, or JSON in `--json` mode.
    pub fn items(&self, items: &[&Item]) {
        if self.json {
            self.json(items);
            return;
        }
        if items.is_empty() {
            self.info("No items found.");
            return;
        }

        let titles = ITEM_COLUMNS.map(|(title, _)| title.to_string());
        println!("  {}", style(row(&titles)).bold());
        for item in items {
            let cells = [
                item.id.to_string(),
                item.name.clone(),
                item.price.display(),
                item.category.clone(),
            ];
            println!("  {}", row(&cells));
        }
    }

    /// A store event: failures as warnings, the rest as debug lines.
    pub fn event(&self, event: &StoreEvent) {
        if event.is_failure() {
            self.warn(&event.to_string());
        } else {
            self.debug(&event.to_string());
        }
    }

    /// Spinner shown while `what` loads; hidden in JSON mode.
    pub fn spinner(&self, what: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(format!("Loading {}...", what));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

fn row(cells: &[String; 4]) -> String {
    cells
        .iter()
        .zip(ITEM_COLUMNS)
        .map(|(cell, (_, width))| format!("{:width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
