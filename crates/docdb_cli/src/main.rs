//! docdb CLI
//!
//! Command-line tools for docdb data directories.
//!
//! # Commands
//!
//! - `inspect` - List collections with record counts and file sizes
//! - `verify` - Check that every collection file decodes
//! - `compact` - Rewrite collection files from their decoded records
//! - `dump` - Print the records of a collection as JSON

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// docdb command-line tools.
#[derive(Parser)]
#[command(name = "docdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the data directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List collections with record counts and file sizes
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that every collection file decodes
    Verify,

    /// Rewrite collection files from their decoded records
    Compact {
        /// Only compact this collection
        collection: Option<String>,
    },

    /// Print the records of a collection as JSON
    Dump {
        /// Collection to dump
        collection: String,

        /// Keep records whose FIELD equals VALUE (VALUE parsed as JSON, else text)
        #[arg(short = 'w', long = "where", value_names = ["FIELD", "VALUE"], num_args = 2)]
        filter: Option<Vec<String>>,

        /// Sort by this field
        #[arg(short, long)]
        order_by: Option<String>,

        /// Sort descending
        #[arg(short, long, requires = "order_by")]
        desc: bool,

        /// Maximum number of records to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Data directory required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Data directory required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Compact { collection } => {
            let path = cli.path.ok_or("Data directory required for compact")?;
            commands::compact::run(&path, collection.as_deref())?;
        }
        Commands::Dump {
            collection,
            filter,
            order_by,
            desc,
            limit,
        } => {
            let path = cli.path.ok_or("Data directory required for dump")?;
            let options = commands::dump::DumpOptions {
                filter: filter.and_then(|pair| match pair.as_slice() {
                    [field, value] => Some((field.clone(), value.clone())),
                    _ => None,
                }),
                order_by,
                desc,
                limit,
            };
            commands::dump::run(&path, &collection, &options)?;
        }
        Commands::Version => {
            println!("docdb CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("docdb core v{}", docdb_core::VERSION);
        }
    }

    Ok(())
}
