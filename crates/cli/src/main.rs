//! Pocket Shop CLI - operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate a token signing key for SHOP_TOKEN_SECRET
//! shop-cli keygen
//!
//! # Validate a catalog file before pointing SHOP_CATALOG_PATH at it
//! shop-cli catalog check ./catalog.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Pocket Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random token signing key
    Keygen {
        /// Number of random bytes before base64 encoding
        #[arg(short, long, default_value_t = commands::keygen::DEFAULT_KEY_BYTES)]
        bytes: usize,
    },
    /// Work with catalog files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load a catalog file and report what it contains
    Check {
        /// Path to the catalog JSON file
        path: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Keygen { bytes } => {
            let key = commands::keygen::generate(bytes)?;
            println!("{key}");
        }
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => {
                let summary = commands::catalog::check(&path)?;
                tracing::info!(path = %path.display(), "Catalog is valid");
                println!(
                    "{} categories, {} products",
                    summary.categories, summary.products
                );
            }
        },
    }
    Ok(())
}
