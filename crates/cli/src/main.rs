//! Rocket Shoes CLI - cart and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 1 to the cart
//! rocket-cli cart add 1
//!
//! # Set product 1's quantity to 3
//! rocket-cli cart set 1 3
//!
//! # Remove product 1 from the cart
//! rocket-cli cart remove 1
//!
//! # Show the cart with line totals and subtotal
//! rocket-cli cart show
//!
//! # List the catalog with stock levels
//! rocket-cli catalog list
//! ```
//!
//! # Commands
//!
//! - `cart` - Mutate and inspect the shopping cart
//! - `catalog` - Browse products and stock
//!
//! Configuration comes from the environment (see `rocket-shoes-cart`'s
//! config module): `STORE_API_URL`, `CART_STORAGE_PATH`,
//! `STORE_API_TIMEOUT_SECS`.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Cart and catalog listings are the command output; they go to stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rocket-cli")]
#[command(author, version, about = "Rocket Shoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mutate and inspect the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the store catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product ID
        product_id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        product_id: i64,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Catalog product ID
        product_id: i64,

        /// Requested quantity (zero or less is ignored)
        amount: i64,
    },
    /// Show the cart with line totals and subtotal
    Show,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List catalog products with their stock levels
    List {
        /// Restrict the listing to one product ID
        #[arg(short, long)]
        id: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { product_id } => commands::cart::add(product_id).await?,
            CartAction::Remove { product_id } => commands::cart::remove(product_id).await?,
            CartAction::Set { product_id, amount } => {
                commands::cart::set(product_id, amount).await?;
            }
            CartAction::Show => commands::cart::show().await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { id } => commands::catalog::list(id).await?,
        },
    }
    Ok(())
}
