//! Isha's Fragrance CLI - Catalog and order tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate the catalog file
//! isha-cli catalog check crates/storefront/data/products.json
//!
//! # Run a shop query
//! isha-cli catalog query crates/storefront/data/products.json --family woody --sort price-asc
//!
//! # Print the WhatsApp quick order for a product
//! isha-cli order product crates/storefront/data/products.json rose-elegance --size 100ml
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Load and validate a catalog file
//! - `catalog query` - Search, filter and sort a catalog
//! - `order product` - Quick order message and link for one product

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "isha-cli")]
#[command(author, version, about = "Isha's Fragrance CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Build WhatsApp order links
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load and validate a catalog file
    Check {
        /// Catalog JSON file
        path: PathBuf,
    },
    /// Search, filter and sort a catalog
    Query {
        /// Catalog JSON file
        path: PathBuf,

        #[command(flatten)]
        args: commands::catalog::QueryArgs,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Quick order for a single product
    Product {
        /// Catalog JSON file
        path: PathBuf,

        /// Product slug
        slug: String,

        /// Size label (defaults to the first listed size)
        #[arg(short, long)]
        size: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(&path)?,
            CatalogAction::Query { path, args } => commands::catalog::query(&path, args)?,
        },
        Commands::Order { action } => match action {
            OrderAction::Product { path, slug, size } => {
                commands::order::product(&path, &slug, size.as_deref())?;
            }
        },
    }
    Ok(())
}
