//! `tienda`: inventory form and live inventory view on the command line.
//!
//! Products live in a local document store (redb by default). Every command
//! goes through the same form and view state the library exposes.

mod commands;
mod config;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

use commands::Output;
use commands::product::FieldArgs;

/// Inventory CLI.
#[derive(Parser, Debug)]
#[command(name = "tienda", about = "Inventory form and live inventory view")]
struct Cli {
    /// Path to config file (default: ~/.tienda/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: auto, table, cards or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "auto")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

/// Every form field, as `add` needs them.
#[derive(Args, Debug)]
struct NewProductFields {
    /// Product name.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    name: String,
    /// Sale price, kept as typed.
    #[arg(long = "sale-price", value_parser = NonEmptyStringValueParser::new())]
    sale_price: String,
    /// Supplier price per unit.
    #[arg(long = "supplier-price", value_parser = NonEmptyStringValueParser::new())]
    supplier_price: String,
    /// Units in stock.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    quantity: String,
    /// Expiry date (YYYY-MM-DD). Turns the expiry toggle on.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    expiry: Option<String>,
}

impl NewProductFields {
    fn into_args(self) -> FieldArgs {
        FieldArgs {
            name: Some(self.name),
            sale_price: Some(self.sale_price),
            supplier_price: Some(self.supplier_price),
            quantity: Some(self.quantity),
            expiry: self.expiry,
            no_expiry: false,
        }
    }
}

/// Fields to change on `edit`. Those not given keep their value.
#[derive(Args, Debug)]
struct ProductFields {
    /// Product name.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    name: Option<String>,
    /// Sale price, kept as typed.
    #[arg(long = "sale-price", value_parser = NonEmptyStringValueParser::new())]
    sale_price: Option<String>,
    /// Supplier price per unit.
    #[arg(long = "supplier-price", value_parser = NonEmptyStringValueParser::new())]
    supplier_price: Option<String>,
    /// Units in stock.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    quantity: Option<String>,
    /// Expiry date (YYYY-MM-DD).
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    expiry: Option<String>,
}

impl ProductFields {
    fn into_args(self, no_expiry: bool) -> FieldArgs {
        FieldArgs {
            name: self.name,
            sale_price: self.sale_price,
            supplier_price: self.supplier_price,
            quantity: self.quantity,
            expiry: self.expiry,
            no_expiry,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a config file with the defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Register a product.
    Add {
        #[command(flatten)]
        fields: NewProductFields,
    },

    /// List products with their totals.
    List {
        /// Only products whose name contains this text (any case).
        #[arg(long)]
        filter: Option<String>,
        /// Terminal width used to pick the layout.
        #[arg(long)]
        width: Option<usize>,
    },

    /// Edit a product; fields not given keep their value.
    Edit {
        /// Product ID.
        id: String,
        #[command(flatten)]
        fields: ProductFields,
        /// Remove the expiry date.
        #[arg(long = "no-expiry", conflicts_with = "expiry")]
        no_expiry: bool,
    },

    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Keep the list on screen, refreshed on every change, until Ctrl-C.
    Watch {
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        width: Option<usize>,
    },

    /// Show version.
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging. Quiet by default so command output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::TiendaConfig::default_path);
    let output = Output::parse(&cli.output)?;

    if let Commands::Init { force } = cli.command {
        return commands::init::run(&config_path, force);
    }
    let config = config::TiendaConfig::load(&config_path)?;

    match cli.command {
        Commands::Init { .. } => {}

        Commands::Add { fields } => {
            commands::product::add(&config, &fields.into_args()).await?;
        }

        Commands::List { filter, width } => {
            let width = commands::terminal_width(width);
            commands::inventory::list(&config, filter.as_deref(), output, width).await?;
        }

        Commands::Edit {
            id,
            fields,
            no_expiry,
        } => {
            commands::product::edit(&config, &id, &fields.into_args(no_expiry)).await?;
        }

        Commands::Delete { id, yes } => {
            commands::product::delete(&config, &id, yes).await?;
        }

        Commands::Watch { filter, width } => {
            let width = commands::terminal_width(width);
            commands::inventory::watch(&config, filter.as_deref(), output, width).await?;
        }

        Commands::Version => {
            println!("tienda v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
