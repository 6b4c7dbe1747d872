//! # ticker-resolver
//!
//! A library for resolving free-text company names and tickers to stock tickers.
//!
//! User input such as "microsft", "Apple" or "aapl" rarely matches a listing
//! exactly. `ticker-resolver` compares the query against a catalog of
//! `(ticker, company name)` pairs and returns the most likely ticker together
//! with a confidence score, or no match when nothing is similar enough.
//!
//! ## Features
//!
//! - **Exact ticker lookup**: A query equal to a ticker wins outright
//! - **N-gram embeddings**: Hashed character trigram vectors compared by cosine
//! - **Edit distance**: Levenshtein similarity for typos
//! - **Short-query adaptation**: Edit distance dominates for very short queries
//! - **Rejection floor**: Weak best matches are reported as no match
//! - **Multiple sources**: JSON, TSV/CSV, exchange listings and SQLite
//!
//! ## Example
//!
//! ```rust,no_run
//! use ticker_resolver::{Resolver, TickerCatalog};
//!
//! // Load the embedded catalog of US listings
//! let catalog = TickerCatalog::load_embedded().unwrap();
//!
//! let resolver = Resolver::new(&catalog);
//! let result = resolver.find_best_match("microsft");
//!
//! if result.is_match() {
//!     println!("{}: {:.1}%", result.ticker, result.confidence * 100.0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog storage, record sources and candidate filtering
//! - [`core`]: Entries, embeddings, character masks and result types
//! - [`matching`]: Resolver and scoring algorithms
//! - [`parsing`]: Parsers for delimited files and exchange listings
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP lookup API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::TickerCatalog;
pub use core::entry::{Entry, TickerRecord};
pub use core::types::*;
pub use matching::engine::{Resolver, ResolverConfig};
