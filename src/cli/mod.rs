//! Command-line interface for ticker-resolver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Resolve free-text company names or tickers to a ticker
//! - **score**: Show the score breakdown of a query against one ticker
//! - **catalog**: List, show, export or import ticker catalogs
//! - **serve**: Start the HTTP lookup API
//!
//! ## Usage
//!
//! ```text
//! # Resolve a misspelled company name
//! ticker-resolver resolve microsft
//!
//! # Resolve one query per line from stdin
//! cat names.txt | ticker-resolver resolve -
//!
//! # Show the five best candidates as JSON
//! ticker-resolver resolve "meta platfroms" -n 5 --format json
//!
//! # Build a catalog from NASDAQ symbol directory files
//! ticker-resolver catalog import nasdaqlisted.txt otherlisted.txt -o us.json
//!
//! # Start the lookup API
//! ticker-resolver serve --port 8080
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::catalog::store::TickerCatalog;
use crate::core::features::DEFAULT_NGRAM_SIZE;
use crate::matching::engine::ResolverConfig;
use crate::matching::scoring::{MatchThresholds, ScoringWeights};

pub mod catalog;
pub mod resolve;
pub mod score;

#[derive(Parser)]
#[command(name = "ticker-resolver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve misspelled company names and tickers to stock tickers")]
#[command(
    long_about = "ticker-resolver maps free-text queries such as \"microsft\" or \"aapl\" to the most likely stock ticker.\n\nIt compares the query against a catalog of (ticker, company name) pairs using:\n- Exact ticker lookup\n- Character n-gram cosine similarity\n- Levenshtein edit distance\n\nQueries whose best score is below the confidence floor are reported as unresolved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve queries to tickers
    Resolve(resolve::ResolveArgs),

    /// Score a query against a specific ticker
    Score(score::ScoreArgs),

    /// Manage ticker catalogs
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Catalog and scoring options shared by the commands that resolve queries
#[derive(clap::Args, Clone, Debug)]
pub struct TuningArgs {
    /// Path to a custom catalog (JSON, TSV, CSV, listing .txt or SQLite; optionally gzipped)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Character n-gram size used for embeddings
    #[arg(long, default_value_t = DEFAULT_NGRAM_SIZE)]
    pub ngram_size: usize,

    /// Weight for n-gram cosine similarity (0-100, default 60)
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_cosine: u32,

    /// Weight for Levenshtein similarity (0-100, default 40)
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_levenshtein: u32,

    /// Minimum score for a match to be reported (0.0-1.0)
    #[arg(long, default_value_t = MatchThresholds::default().min_confidence)]
    pub min_confidence: f64,
}

impl TuningArgs {
    /// Build a validated resolver configuration from the command line
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum confidence is outside `[0, 1]`.
    pub fn config(&self) -> anyhow::Result<ResolverConfig> {
        let config = ResolverConfig {
            weights: ScoringWeights {
                cosine: f64::from(self.weight_cosine) / 100.0,
                levenshtein: f64::from(self.weight_levenshtein) / 100.0,
            },
            thresholds: MatchThresholds {
                min_confidence: self.min_confidence,
                ..MatchThresholds::default()
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the custom catalog if one was given, otherwise the embedded one
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    pub fn load_catalog(&self, verbose: bool) -> anyhow::Result<TickerCatalog> {
        let catalog = load_catalog(self.catalog.as_ref(), self.ngram_size)?;
        if verbose {
            eprintln!(
                "Loaded catalog with {} entries (n-gram size {})",
                catalog.len(),
                catalog.ngram_size()
            );
        }
        Ok(catalog)
    }
}

/// Load a catalog from `path`, or the embedded catalog when `path` is `None`
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or parsed.
pub fn load_catalog(path: Option<&PathBuf>, ngram_size: usize) -> anyhow::Result<TickerCatalog> {
    match path {
        Some(path) => TickerCatalog::load_from_file_with_ngram(path, ngram_size)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(TickerCatalog::load_embedded_with_ngram(ngram_size)?),
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
