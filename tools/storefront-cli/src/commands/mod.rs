//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod items;
pub mod shell;

use clap::{Args, Subcommand};

/// Arguments for the items command.
#[derive(Args)]
pub struct ItemsArgs {
    /// Only items in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive name substring.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Exact unit price.
    #[arg(short, long, conflicts_with = "max_price")]
    pub price: Option<String>,

    /// Maximum unit price.
    #[arg(long)]
    pub max_price: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
