//! Filecab CLI: manage the file catalog from the command line.
//!
//! Backend selection comes from the environment: FILECAB_BACKEND
//! (memory | file | postgres), FILECAB_DATA_PATH, FILECAB_DATABASE_URL.
//! A .env file in the working directory is honored.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use filecab_cli::{humanize_size, init_tracing, truncate_string};
use filecab_core::{CatalogConfig, Record};
use filecab_store::CatalogStore;

#[derive(Parser)]
#[command(name = "filecab", about = "File catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a file record to the catalog
    Add {
        /// File name, e.g. report.pdf
        name: String,
    },
    /// Rename a file record; its type is re-derived from the new name
    Rename {
        /// Record id
        id: i64,
        /// New file name
        new_name: String,
    },
    /// Delete a file record by id
    Delete {
        /// Record id
        id: i64,
    },
    /// List all file records
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search file records by name (case-insensitive substring match)
    Search {
        /// Search query; an empty query matches everything
        query: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show which backend is serving the catalog
    Backend,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize records")?;
    println!("{}", out);
    Ok(())
}

fn print_record_table(records: &[Record]) {
    if records.is_empty() {
        println!("No files found.");
        return;
    }

    println!(
        "{:>6} {:<40} {:<10} {:>10} {:>20}",
        "ID", "Name", "Type", "Size", "Uploaded At"
    );
    println!("{}", "-".repeat(90));

    for record in records {
        println!(
            "{:>6} {:<40} {:<10} {:>10} {:>20}",
            record.id,
            truncate_string(&record.name, 40),
            truncate_string(&record.kind, 10),
            humanize_size(record.size),
            record.uploaded_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    println!("\n{} file(s)", records.len());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = CatalogConfig::from_env().context("Load catalog configuration")?;
    config.validate()?;
    let store = CatalogStore::open(&config).await?;

    match cli.command {
        Commands::Add { name } => {
            let record = store.create(&name).await?;
            print_json(&record)?;
        }
        Commands::Rename { id, new_name } => {
            let record = store.rename(id, &new_name).await?;
            print_json(&record)?;
        }
        Commands::Delete { id } => {
            let record = store.delete(id).await?;
            print_json(&record)?;
        }
        Commands::List { json } => {
            let records = store.list().await?;
            if json {
                print_json(&records)?;
            } else {
                print_record_table(&records);
            }
        }
        Commands::Search { query, json } => {
            let records = store.search(&query).await?;
            if json {
                print_json(&records)?;
            } else {
                print_record_table(&records);
            }
        }
        Commands::Backend => {
            println!("{}", store.backend_kind().await);
        }
    }

    Ok(())
}
