//! Volume Discount CLI - local runner and promotion tooling.
//!
//! # Usage
//!
//! ```bash
//! # Run the checkout function over a function input file
//! vd-cli run --input input.json
//!
//! # Preview tier prices for a $25 product
//! vd-cli preview --config promotion.json --price 25
//!
//! # Check a promotion, print its function configuration
//! vd-cli validate promotion.json
//! vd-cli configure promotion.json
//!
//! # Print a metaobject definition
//! vd-cli definition volume-discount
//! ```
//!
//! Results go to stdout, logs to stderr. See [`config`] for environment
//! variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volume_discount_core::CurrencyCode;
use volume_discount_function::EmissionMode;

mod commands;
mod config;

use commands::definition::DefinitionKind;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "vd-cli")]
#[command(author, version, about = "Volume discount tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the discount function over a function input
    Run {
        /// Input JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Instructions per qualifying line (`best-tier`, `every-qualifying-tier`)
        #[arg(short, long)]
        emission: Option<EmissionMode>,
    },
    /// Preview each tier's price for one unit
    Preview {
        /// Promotion or configuration JSON (default: the form's starter tiers)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,

        /// Currency code (USD, EUR, GBP, CAD, AUD)
        #[arg(long)]
        currency: Option<CurrencyCode>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate a promotion
    Validate {
        /// Promotion JSON file, `-` for stdin
        file: PathBuf,
    },
    /// Print the stored configuration for a promotion
    Configure {
        /// Promotion JSON file, `-` for stdin
        file: PathBuf,

        /// The file holds a fetched metaobject record
        #[arg(long)]
        record: bool,

        /// Print the metaobject fields instead of the function configuration
        #[arg(long)]
        fields: bool,
    },
    /// Print a metaobject definition
    Definition {
        #[arg(value_enum)]
        kind: DefinitionKind,
    },
}

fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    if let Err(e) = run(cli, config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "volume_discount=info".into());

    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run { input, emission } => {
            commands::run::execute(&input, emission.unwrap_or(config.emission))?;
        }
        Commands::Preview {
            config: path,
            price,
            currency,
            json,
        } => commands::preview::execute(
            path.as_deref(),
            price,
            currency.unwrap_or(config.currency),
            json,
        )?,
        Commands::Validate { file } => commands::validate::execute(&file)?,
        Commands::Configure {
            file,
            record,
            fields,
        } => {
            let output = if fields {
                commands::configure::Output::Fields
            } else {
                commands::configure::Output::Configuration
            };
            commands::configure::execute(&file, record, output)?;
        }
        Commands::Definition { kind } => commands::definition::execute(kind)?,
    }
    Ok(())
}
