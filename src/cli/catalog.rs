use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::source::{open_source, ListingSource, RecordSource, SqliteSource};
use crate::catalog::store::TickerCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::features::DEFAULT_NGRAM_SIZE;
use crate::parsing::base_extension;
use crate::utils::validation::normalize_ticker;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all entries in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list entries whose ticker or name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show details of a specific ticker
    Show {
        /// Ticker symbol
        #[arg(required = true)]
        ticker: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a JSON file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Build a JSON catalog from TSV/CSV, exchange listing files or a SQLite database
    Import {
        /// Input file(s). Several listing .txt files are merged, first ticker wins
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SQL query for SQLite inputs; must return (ticker, name) columns
        #[arg(long)]
        sqlite_query: Option<String>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the subcommand fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, filter } => {
            run_list(catalog, filter.as_deref(), format, verbose)
        }
        CatalogCommands::Show { ticker, catalog } => run_show(&ticker, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
        CatalogCommands::Import {
            inputs,
            output,
            sqlite_query,
        } => run_import(&inputs, output, sqlite_query, verbose),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_ref(), DEFAULT_NGRAM_SIZE)?;

    if verbose {
        eprintln!("Loaded catalog with {} entries", catalog.len());
    }

    let filter = filter.map(str::to_ascii_uppercase);
    let filtered: Vec<_> = catalog
        .entries()
        .iter()
        .filter(|e| {
            filter
                .as_deref()
                .map_or(true, |f| e.ticker().contains(f) || e.name().contains(f))
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("Ticker Catalog ({} entries)\n", filtered.len());
            println!("{:<10} Name", "Ticker");
            println!("{}", "-".repeat(60));
            for entry in &filtered {
                println!("{:<10} {}", entry.ticker(), entry.name());
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = filtered.iter().map(|e| e.to_record()).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("ticker\tname");
            for entry in &filtered {
                println!("{}\t{}", entry.ticker(), entry.name());
            }
        }
    }

    Ok(())
}

fn run_show(ticker: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_ref(), DEFAULT_NGRAM_SIZE)?;

    let entry = catalog
        .get(&normalize_ticker(ticker))
        .ok_or_else(|| anyhow::anyhow!("Ticker '{ticker}' not found in catalog"))?;

    match format {
        OutputFormat::Text => {
            println!("Ticker: {}\n", entry.ticker());
            println!("Name:         {}", entry.name());
            println!("Characters:   {}", entry.mask());
            println!(
                "N-gram size:  {} ({} dimensions)",
                catalog.ngram_size(),
                entry.embedding().as_slice().len()
            );
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "ticker": entry.ticker(),
                "name": entry.name(),
                "characters": entry.mask().to_string(),
                "mask": entry.mask().bits(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("ticker\tname\tcharacters");
            println!("{}\t{}\t{}", entry.ticker(), entry.name(), entry.mask());
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_ref(), DEFAULT_NGRAM_SIZE)?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} entries to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

fn run_import(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    sqlite_query: Option<String>,
    verbose: bool,
) -> anyhow::Result<()> {
    let mut source = import_source(inputs, sqlite_query)?;
    if verbose {
        eprintln!("Importing from {}", source.describe());
    }

    let catalog = TickerCatalog::from_source(source.as_mut(), DEFAULT_NGRAM_SIZE)?;
    if catalog.is_empty() {
        anyhow::bail!("No usable records found in {}", source.describe());
    }

    let json = catalog.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!(
                "Wrote catalog with {} entries to {} ({} records dropped)",
                catalog.len(),
                path.display(),
                catalog.dropped()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn import_source(
    inputs: &[PathBuf],
    sqlite_query: Option<String>,
) -> anyhow::Result<Box<dyn RecordSource>> {
    if let [input] = inputs {
        let ext = base_extension(input);
        if let (Some("db" | "sqlite" | "sqlite3"), Some(query)) = (ext.as_deref(), sqlite_query) {
            return Ok(Box::new(SqliteSource::new(input).with_query(query)));
        }
        return Ok(open_source(input)?);
    }

    // Several inputs are only meaningful as exchange listing files
    if let Some(other) = inputs
        .iter()
        .find(|p| base_extension(p).as_deref() != Some("txt"))
    {
        anyhow::bail!(
            "Multiple inputs must all be listing .txt files (got {})",
            other.display()
        );
    }
    Ok(Box::new(ListingSource::new(inputs.to_vec())))
}
