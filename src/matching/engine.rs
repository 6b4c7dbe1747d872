use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::TickerCatalog;
use crate::core::entry::Entry;
use crate::core::features::{char_mask, vectorize, Embedding, PresenceMask};
use crate::core::types::Resolution;
use crate::matching::scoring::{MatchScore, MatchThresholds, ScoringWeights};
use crate::utils::validation::{normalize_query, normalize_ticker};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Weight '{name}' must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Minimum confidence must be within [0, 1] (got {0})")]
    InvalidMinConfidence(f64),
}

/// Configuration for the resolver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base scoring weights, before short-query adaptation
    pub weights: ScoringWeights,
    /// Rejection floor, bonuses and adaptation constants
    pub thresholds: MatchThresholds,
}

impl ResolverConfig {
    /// Check that every weight and threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for negative or non-finite weights, factors or
    /// bonuses, or a minimum confidence outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let weights = [
            ("cosine", self.weights.cosine),
            ("levenshtein", self.weights.levenshtein),
            ("short_query_cosine_factor", t.short_query_cosine_factor),
            ("short_query_levenshtein_factor", t.short_query_levenshtein_factor),
            ("prefix_bonus", t.prefix_bonus),
            ("substring_bonus", t.substring_bonus),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        if !(0.0..=1.0).contains(&t.min_confidence) {
            return Err(ConfigError::InvalidMinConfidence(t.min_confidence));
        }

        Ok(())
    }
}

/// A scored candidate
#[derive(Debug, Clone)]
pub struct ScoredMatch<'a> {
    /// The matched catalog entry
    pub entry: &'a Entry,

    /// Match score details
    pub score: MatchScore,
}

/// A query normalized and featurized once per lookup
struct PreparedQuery {
    text: String,
    mask: PresenceMask,
    embedding: Embedding,
    weights: ScoringWeights,
}

/// Resolves free-text queries against a borrowed, read-only catalog.
///
/// The resolver holds no mutable state, so one catalog can back any number of
/// resolvers on any number of threads.
pub struct Resolver<'a> {
    catalog: &'a TickerCatalog,
    /// Configuration including scoring weights and thresholds
    config: ResolverConfig,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver with default configuration
    pub fn new(catalog: &'a TickerCatalog) -> Self {
        Self {
            catalog,
            config: ResolverConfig::default(),
        }
    }

    /// Create a new resolver with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn with_config(catalog: &'a TickerCatalog, config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn prepare(&self, normalized: String) -> PreparedQuery {
        let weights = self
            .config
            .weights
            .adapted_for(normalized.len(), &self.config.thresholds);
        PreparedQuery {
            mask: char_mask(&normalized),
            embedding: vectorize(&normalized, self.catalog.ngram_size()),
            text: normalized,
            weights,
        }
    }

    fn score(&self, query: &PreparedQuery, entry: &Entry) -> MatchScore {
        MatchScore::calculate(
            &query.text,
            &query.embedding,
            entry,
            &query.weights,
            &self.config.thresholds,
        )
    }

    /// Find the single best ticker for a query.
    ///
    /// 1. An empty query never matches.
    /// 2. A query equal (case-insensitively) to a ticker returns it with
    ///    confidence 1.0 without scoring.
    /// 3. Otherwise every candidate sharing a letter or digit with the query is
    ///    scored; the highest score wins, ties going to the earlier entry.
    /// 4. A best score below the rejection floor is "no match"; anything above
    ///    1.0 is clamped.
    pub fn find_best_match(&self, query: &str) -> Resolution {
        if query.is_empty() {
            return Resolution::no_match();
        }

        let normalized = normalize_query(query);
        let finder = CandidateFinder::new(self.catalog);

        if let Some(entry) = finder.find_exact_ticker(&normalized) {
            debug!(query, ticker = entry.ticker(), "Exact ticker match");
            return Resolution::new(entry.ticker(), 1.0);
        }

        let prepared = self.prepare(normalized);

        let mut best: Option<(&Entry, f64)> = None;
        for entry in finder.candidates(prepared.mask) {
            let score = self.score(&prepared, entry);
            if best.map_or(true, |(_, best_raw)| score.raw > best_raw) {
                best = Some((entry, score.raw));
            }
        }

        match best {
            Some((entry, raw)) if raw >= self.config.thresholds.min_confidence => {
                debug!(query, ticker = entry.ticker(), score = raw, "Best match");
                Resolution::new(entry.ticker(), raw.min(1.0))
            }
            Some((entry, raw)) => {
                debug!(
                    query,
                    ticker = entry.ticker(),
                    score = raw,
                    "Best candidate below confidence floor"
                );
                Resolution::no_match()
            }
            None => {
                debug!(query, "No candidates passed the character prefilter");
                Resolution::no_match()
            }
        }
    }

    /// Find up to `limit` candidates at or above the confidence floor, best first.
    ///
    /// Ranking and the exact-ticker shortcut follow [`Self::find_best_match`]:
    /// the first result, if any, is always the same ticker with the same
    /// confidence.
    pub fn find_matches(&self, query: &str, limit: usize) -> Vec<ScoredMatch<'a>> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let normalized = normalize_query(query);
        let finder = CandidateFinder::new(self.catalog);

        if let Some(entry) = finder.find_exact_ticker(&normalized) {
            return vec![ScoredMatch {
                entry,
                score: MatchScore::exact(),
            }];
        }

        let prepared = self.prepare(normalized);
        let floor = self.config.thresholds.min_confidence;

        let mut results: Vec<ScoredMatch<'a>> = finder
            .candidates(prepared.mask)
            .map(|entry| ScoredMatch {
                entry,
                score: self.score(&prepared, entry),
            })
            .filter(|m| m.score.raw >= floor)
            .collect();

        // Stable sort keeps catalog order among equal scores
        results.sort_by(|a, b| {
            b.score
                .raw
                .partial_cmp(&a.score.raw)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);
        results
    }

    /// Score a query against one specific ticker, for diagnostics.
    ///
    /// Bypasses the exact-ticker shortcut, the character prefilter and the
    /// confidence floor. Returns `None` if the ticker is not in the catalog.
    pub fn score_entry(&self, query: &str, ticker: &str) -> Option<MatchScore> {
        let entry = self.catalog.get(&normalize_ticker(ticker))?;
        let prepared = self.prepare(normalize_query(query));
        Some(self.score(&prepared, entry))
    }
}
