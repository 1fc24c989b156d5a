//! `storefront`: browse the demo catalog and manage a cart from the terminal.
//!
//! Every invocation starts a fresh in-memory backend seeded from the
//! configuration, so state lasts as long as the process. Running without a
//! subcommand opens the interactive shell.

mod commands;
mod config;
mod context;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ItemsArgs};
use context::Context;
use output::Output;

/// Storefront demo: catalog, search and cart over an in-memory API
#[derive(Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Show debug messages and debug-level logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Read configuration from this file instead of searching for one
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard (the default)
    #[command(visible_alias = "sh")]
    Shell,

    /// Print items, optionally filtered by category, name or price
    #[command(visible_alias = "ls")]
    Items(ItemsArgs),

    /// Print the category list
    Categories,

    /// Show or create the configuration file
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose, cli.json);

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let ctx = Context::load(cli.config.as_deref(), output.clone())?;
    logging::init(&ctx.config.logging, cli.verbose)?;
    if let Some(path) = &ctx.config_path {
        ctx.output.debug(&format!("Using {}", path.display()));
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => commands::shell::run(&ctx).await,
        Commands::Items(args) => commands::items::run(args, &ctx).await,
        Commands::Categories => commands::categories::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    }
}
