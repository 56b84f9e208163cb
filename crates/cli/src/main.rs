//! Shahd CLI - drive the storefront cart, checkout, catalog and order history
//! from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals and stock warnings
//! shahd cart show
//!
//! # Add two of a product (snapshot fetched from the catalog)
//! shahd cart add 3fa85f64-5717-4562-b3fc-2c963f66afa6 -q 2
//!
//! # Change or remove a line
//! shahd cart update 3fa85f64-5717-4562-b3fc-2c963f66afa6 5
//! shahd cart remove 3fa85f64-5717-4562-b3fc-2c963f66afa6
//!
//! # Place an order
//! shahd checkout --customer C-1 --street "1 Hive Rd" --city Amman \
//!     --state AM --postal-code 11118 --country JO
//!
//! # Browse the catalog
//! shahd products list --category Honey --max-price 20 --in-stock
//!
//! # Order history
//! shahd orders list --customer C-1 --status Shipped
//! shahd orders show 9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d
//! ```
//!
//! Configuration comes from the environment (see `shahd_storefront::config`).
//! Logs go to stderr; set `SHAHD_LOG_FORMAT=json` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shahd_core::OrderStatus;
use shahd_storefront::api::ProductFilters;
use shahd_storefront::config::StorefrontConfig;
use shahd_storefront::error::Result;
use shahd_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "shahd")]
#[command(author, version, about = "Shahd storefront cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the cart
    Checkout(CheckoutArgs),
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Look up placed orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List one page of products
    List {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,

        #[arg(long)]
        category: Option<String>,

        /// Match against product names and descriptions
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,

        /// Hide products with no stock
        #[arg(long)]
        in_stock: bool,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List a customer's orders
    List {
        /// Customer ID
        #[arg(long)]
        customer: String,

        /// Only show orders in this status (Pending, Confirmed, Shipped, ...)
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Show one order with its lines and shipping address
    Show {
        /// Order ID
        order_id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show items, stock warnings and totals
    Show,
    /// Add a product by ID
    Add {
        /// Catalog product ID
        product_id: String,

        /// Quantity to add (values below 1 add one)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Catalog product ID
        product_id: String,

        /// New quantity (must be at least 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        product_id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Customer ID placing the order
    #[arg(long)]
    customer: String,

    #[arg(long)]
    street: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    postal_code: String,

    #[arg(long)]
    country: String,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shahd_storefront=info,shahd_cli=info".into());

    // SHAHD_LOG_FORMAT=json for machine-readable logs, text otherwise
    let is_json = std::env::var("SHAHD_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        tracing::error!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::from_config(config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&mut state, &product_id, quantity).await?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&mut state, &product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&mut state, &product_id),
            CartAction::Clear => commands::cart::clear(&mut state),
        },
        Commands::Checkout(args) => commands::checkout::run(&mut state, args).await?,
        Commands::Products { action } => match action {
            ProductsAction::List {
                page,
                page_size,
                category,
                search,
                min_price,
                max_price,
                in_stock,
            } => {
                let filters = ProductFilters {
                    page,
                    page_size,
                    category,
                    search,
                    min_price,
                    max_price,
                    in_stock_only: in_stock,
                };
                commands::products::list(&state, &filters).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrdersAction::List { customer, status } => {
                commands::orders::list(&state, &customer, status).await?;
            }
            OrdersAction::Show { order_id } => commands::orders::show(&state, &order_id).await?,
        },
    }

    Ok(())
}
