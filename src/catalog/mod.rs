//! Ticker catalog storage and loading.
//!
//! The catalog is the immutable set of `(ticker, name)` entries that queries
//! are resolved against. Each entry carries its precomputed n-gram embedding
//! and presence mask. An embedded catalog of well-known US listings is compiled
//! into the binary; custom catalogs can be loaded from JSON, TSV/CSV, exchange
//! symbol directories, or a SQLite database.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ticker_resolver::TickerCatalog;
//! use std::path::Path;
//!
//! // Load embedded catalog
//! let catalog = TickerCatalog::load_embedded().unwrap();
//!
//! // Look up a ticker
//! let apple = catalog.get("AAPL");
//!
//! // Load from a records database
//! let custom = TickerCatalog::load_from_file(Path::new("data/tickers.db")).unwrap();
//! ```
//!
//! ## Custom Catalogs
//!
//! Any supported source can be converted to the JSON catalog format with
//! `ticker-resolver catalog import`, or programmatically:
//!
//! ```rust,no_run
//! use ticker_resolver::TickerCatalog;
//! use ticker_resolver::catalog::source::ListingSource;
//! use std::path::PathBuf;
//!
//! let mut source = ListingSource::new(vec![
//!     PathBuf::from("nasdaqlisted.txt"),
//!     PathBuf::from("otherlisted.txt"),
//! ]);
//! let catalog = TickerCatalog::from_source(&mut source, 3).unwrap();
//! let json = catalog.to_json().unwrap();
//! ```

pub mod index;
pub mod source;
pub mod store;
