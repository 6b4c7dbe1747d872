//! Core data types for ticker resolution.
//!
//! - [`TickerRecord`]: a raw `(ticker, name)` pair from a record source
//! - [`Entry`]: a normalized catalog entry with precomputed features
//! - [`Embedding`], [`PresenceMask`]: the features themselves
//! - [`Resolution`], [`Confidence`]: result types
//!
//! ## Normalization
//!
//! Tickers and names are trimmed and ASCII-uppercased. Queries are
//! ASCII-uppercased only. All lengths used in scoring are byte lengths of the
//! normalized strings.
//!
//! [`TickerRecord`]: entry::TickerRecord
//! [`Entry`]: entry::Entry
//! [`Embedding`]: features::Embedding
//! [`PresenceMask`]: features::PresenceMask
//! [`Resolution`]: types::Resolution
//! [`Confidence`]: types::Confidence

pub mod entry;
pub mod features;
pub mod types;
