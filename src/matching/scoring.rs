use serde::{Deserialize, Serialize};

use crate::core::entry::Entry;
use crate::core::features::{vectorize, Embedding};
use crate::core::types::Confidence;
use crate::matching::similarity::{cosine_similarity, levenshtein_similarity};

/// Configurable weights for the two similarity components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for n-gram cosine similarity
    pub cosine: f64,
    /// Weight for normalized Levenshtein similarity
    pub levenshtein: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cosine: 0.6,      // 60%
            levenshtein: 0.4, // 40%
        }
    }
}

impl ScoringWeights {
    /// Weights to use for a query of `query_len` bytes.
    ///
    /// Short queries produce few n-grams, so their embeddings are sparse and
    /// unreliable; edit distance is trusted more for them.
    #[must_use]
    pub fn adapted_for(&self, query_len: usize, thresholds: &MatchThresholds) -> Self {
        if query_len <= thresholds.short_query_len {
            Self {
                cosine: self.cosine * thresholds.short_query_cosine_factor,
                levenshtein: self.levenshtein * thresholds.short_query_levenshtein_factor,
            }
        } else {
            *self
        }
    }
}

/// Empirical tuning constants for the resolver.
///
/// The defaults are the values the matcher has always used; they are exposed
/// for tuning, not derived from anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// Best scores below this are reported as "no match"
    pub min_confidence: f64,
    /// Queries up to this many bytes get adapted weights
    pub short_query_len: usize,
    /// Cosine weight multiplier for short queries
    pub short_query_cosine_factor: f64,
    /// Levenshtein weight multiplier for short queries
    pub short_query_levenshtein_factor: f64,
    /// Containment bonuses apply only to queries up to this many bytes
    pub bonus_max_query_len: usize,
    /// Bonus when the name starts with the query
    pub prefix_bonus: f64,
    /// Bonus when the name contains the query elsewhere
    pub substring_bonus: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            min_confidence: 0.333,
            short_query_len: 4,
            short_query_cosine_factor: 0.5,
            short_query_levenshtein_factor: 1.5,
            bonus_max_query_len: 6,
            prefix_bonus: 0.2,
            substring_bonus: 0.1,
        }
    }
}

/// Bonus for a name that literally contains the query.
///
/// Only queries up to `bonus_max_query_len` bytes qualify. A prefix match
/// earns `prefix_bonus`; any other occurrence earns `substring_bonus`.
#[must_use]
pub fn containment_bonus(query: &str, name: &str, thresholds: &MatchThresholds) -> f64 {
    if query.len() > thresholds.bonus_max_query_len {
        0.0
    } else if name.starts_with(query) {
        thresholds.prefix_bonus
    } else if name.contains(query) {
        thresholds.substring_bonus
    } else {
        0.0
    }
}

/// Weighted sum of cosine and Levenshtein similarity, without bonuses or
/// weight adaptation.
///
/// `s1` is vectorized on the fly; `embedding2` must have been built from `s2`
/// with the same `ngram_size`.
#[must_use]
pub fn hybrid_similarity(
    s1: &str,
    s2: &str,
    embedding2: &Embedding,
    ngram_size: usize,
    weights: &ScoringWeights,
) -> f64 {
    let v1 = vectorize(s1, ngram_size);
    weights.cosine * cosine_similarity(&v1, embedding2)
        + weights.levenshtein * levenshtein_similarity(s1, s2)
}

/// Detailed similarity scores between a query and one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    /// Cosine similarity of the n-gram embeddings
    pub cosine: f64,

    /// Normalized Levenshtein similarity of query and name
    pub levenshtein: f64,

    /// Containment bonus (prefix or substring)
    pub bonus: f64,

    /// Weights actually applied after short-query adaptation
    pub weights: ScoringWeights,

    /// Weighted sum plus bonus, before clamping. Used for ranking.
    pub raw: f64,

    /// `raw` clamped to `[0, 1]`
    pub composite: f64,

    /// Confidence level derived from the composite score
    pub confidence: Confidence,
}

impl MatchScore {
    /// Score a normalized query against an entry.
    ///
    /// `query_embedding` must be `vectorize(query, n)` with the catalog's n-gram
    /// size, and `weights` must already be adapted to the query length.
    #[must_use]
    pub fn calculate(
        query: &str,
        query_embedding: &Embedding,
        entry: &Entry,
        weights: &ScoringWeights,
        thresholds: &MatchThresholds,
    ) -> Self {
        let bonus = containment_bonus(query, entry.name(), thresholds);
        let cosine = cosine_similarity(query_embedding, entry.embedding());
        let levenshtein = levenshtein_similarity(query, entry.name());

        let raw = weights.cosine * cosine + weights.levenshtein * levenshtein + bonus;
        let composite = raw.clamp(0.0, 1.0);

        Self {
            cosine,
            levenshtein,
            bonus,
            weights: *weights,
            raw,
            composite,
            confidence: Confidence::from_score(composite),
        }
    }

    /// Score for a query equal to the entry's ticker
    #[must_use]
    pub fn exact() -> Self {
        Self {
            cosine: 1.0,
            levenshtein: 1.0,
            bonus: 0.0,
            weights: ScoringWeights::default(),
            raw: 1.0,
            composite: 1.0,
            confidence: Confidence::Exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::TickerRecord;

    fn entry(ticker: &str, name: &str) -> Entry {
        Entry::from_record(&TickerRecord::new(ticker, name), 3).unwrap()
    }

    #[test]
    fn test_weight_adaptation_for_short_queries() {
        let thresholds = MatchThresholds::default();
        let weights = ScoringWeights::default();

        let short = weights.adapted_for(4, &thresholds);
        assert!((short.cosine - 0.3).abs() < 1e-12);
        assert!((short.levenshtein - 0.6).abs() < 1e-12);

        assert_eq!(weights.adapted_for(5, &thresholds), weights);
    }

    #[test]
    fn test_containment_bonus() {
        let t = MatchThresholds::default();
        assert_eq!(containment_bonus("APPL", "APPLE INC", &t), 0.2);
        assert_eq!(containment_bonus("INC", "APPLE INC", &t), 0.1);
        assert_eq!(containment_bonus("LE IN", "APPLE INC", &t), 0.1);
        // Too long for either bonus
        assert_eq!(containment_bonus("APPLE I", "APPLE INC", &t), 0.0);
        assert_eq!(containment_bonus("APPLE INC", "APPLE INC", &t), 0.0);
        assert_eq!(containment_bonus("MSFT", "APPLE INC", &t), 0.0);
    }

    #[test]
    fn test_hybrid_similarity_identical_strings() {
        let e = entry("MSFT", "MICROSOFT");
        let score = hybrid_similarity(
            "MICROSOFT",
            e.name(),
            e.embedding(),
            3,
            &ScoringWeights::default(),
        );
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_match_score_components() {
        let e = entry("MSFT", "MICROSOFT CORP");
        let query = "MICROSFT";
        let weights = ScoringWeights::default();
        let score = MatchScore::calculate(
            query,
            &vectorize(query, 3),
            &e,
            &weights,
            &MatchThresholds::default(),
        );

        assert_eq!(score.bonus, 0.0);
        assert!((score.levenshtein - (1.0 - 6.0 / 14.0)).abs() < 1e-12);
        let expected = 0.6 * score.cosine + 0.4 * score.levenshtein;
        assert!((score.raw - expected).abs() < 1e-12);
        assert!(score.composite > 0.333 && score.composite <= 1.0);
    }

    #[test]
    fn test_composite_is_clamped() {
        let e = entry("IBM", "IBM");
        let weights = ScoringWeights::default().adapted_for(3, &MatchThresholds::default());
        let score = MatchScore::calculate(
            "IBM",
            &vectorize("IBM", 3),
            &e,
            &weights,
            &MatchThresholds::default(),
        );
        // 0.3 + 0.6 + 0.2 prefix bonus
        assert!(score.raw > 1.0);
        assert_eq!(score.composite, 1.0);
        assert_eq!(score.confidence, Confidence::Exact);
    }
}
