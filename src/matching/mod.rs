//! Fuzzy ticker resolution and scoring algorithms.
//!
//! This module provides the core matching functionality:
//!
//! - [`Resolver`]: Main entry point for resolving a query to a ticker
//! - [`MatchScore`]: Detailed similarity scores between a query and one entry
//!
//! ## Matching Algorithm
//!
//! 1. **Exact ticker**: A query equal to a ticker (ignoring case) wins outright
//! 2. **Character prefilter**: Only entries sharing a letter or digit with the
//!    query are scored
//! 3. **Hybrid scoring**: Cosine similarity of hashed n-gram embeddings plus
//!    normalized Levenshtein similarity, plus a containment bonus
//! 4. **Rejection floor**: The best score must reach `min_confidence`
//!
//! ## Scoring
//!
//! - **Cosine** (60%): Overlap of character trigrams, robust to word order
//! - **Levenshtein** (40%): Edit distance, robust to typos
//!
//! Queries of four bytes or fewer halve the cosine weight and raise the
//! Levenshtein weight by half, since they have too few n-grams to compare.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ticker_resolver::{Resolver, TickerCatalog};
//!
//! let catalog = TickerCatalog::load_embedded().unwrap();
//! let resolver = Resolver::new(&catalog);
//!
//! let result = resolver.find_best_match("microsft");
//! println!("{} ({:.1}%)", result.ticker, result.confidence * 100.0);
//!
//! for m in resolver.find_matches("meta platfroms", 5) {
//!     println!("{}: {} ({:.1}%)", m.entry.ticker(), m.entry.name(), m.score.composite * 100.0);
//! }
//! ```

pub mod engine;
pub mod scoring;
pub mod similarity;

pub use engine::{ConfigError, Resolver, ResolverConfig, ScoredMatch};
pub use scoring::{MatchScore, MatchThresholds, ScoringWeights};
