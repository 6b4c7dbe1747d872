//! String and vector similarity primitives.

use crate::core::features::Embedding;

/// Safely convert usize to f64 for ratio calculations
///
/// Query and name lengths are far below the range where f64 loses integer
/// precision.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Cosine similarity of two embeddings.
///
/// Returns 0.0 when either embedding has zero norm, so degenerate (too short)
/// strings never produce NaN.
#[must_use]
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        0.0
    } else {
        a.dot(b) / denom
    }
}

/// Levenshtein edit distance with unit-cost insertion, deletion and substitution.
///
/// Works on bytes. Uses two rolling rows sized by the shorter input.
#[must_use]
pub fn levenshtein(s1: &str, s2: &str) -> usize {
    let (long, short) = if s1.len() >= s2.len() {
        (s1.as_bytes(), s2.as_bytes())
    } else {
        (s2.as_bytes(), s1.as_bytes())
    };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Edit distance scaled to `[0, 1]`: `1 - distance / max(len1, len2)`.
///
/// Two empty strings score 0.0 (there is nothing to compare).
#[must_use]
pub fn levenshtein_similarity(s1: &str, s2: &str) -> f64 {
    let max_len = s1.len().max(s2.len());
    if max_len == 0 {
        return 0.0;
    }
    let distance = levenshtein(s1, s2);
    (1.0 - count_to_f64(distance) / count_to_f64(max_len)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::vectorize;

    #[test]
    fn test_cosine_identical() {
        let v = vectorize("MICROSOFT", 3);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let zero = Embedding::zeros();
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &vectorize("APPLE", 3)), 0.0);
    }

    #[test]
    fn test_cosine_is_symmetric_and_bounded() {
        let a = vectorize("MICROSOFT CORP", 3);
        let b = vectorize("MICROSFT", 3);
        let ab = cosine_similarity(&a, &b);
        assert!((ab - cosine_similarity(&b, &a)).abs() < 1e-12);
        assert!(ab > 0.0 && ab < 1.0);
    }

    #[test]
    fn test_levenshtein_known_distances() {
        assert_eq!(levenshtein("KITTEN", "SITTING"), 3);
        assert_eq!(levenshtein("FLAW", "LAWN"), 2);
        assert_eq!(levenshtein("MICROSFT", "MICROSOFT"), 1);
        assert_eq!(levenshtein("MICROSFT", "MICROSOFT CORP"), 6);
    }

    #[test]
    fn test_levenshtein_identity_and_empty() {
        for s in ["", "A", "APPLE INC", "3M"] {
            assert_eq!(levenshtein(s, s), 0);
            assert_eq!(levenshtein("", s), s.len());
            assert_eq!(levenshtein(s, ""), s.len());
        }
    }

    #[test]
    fn test_levenshtein_symmetric() {
        let pairs = [("AAPL", "APPLE"), ("META", "META PLATFORMS"), ("IBM", "BMI")];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_levenshtein_similarity() {
        assert_eq!(levenshtein_similarity("APPLE", "APPLE"), 1.0);
        assert_eq!(levenshtein_similarity("", ""), 0.0);
        assert_eq!(levenshtein_similarity("ABC", "XYZ"), 0.0);
        assert!((levenshtein_similarity("MICROSFT", "MICROSOFT CORP") - (1.0 - 6.0 / 14.0)).abs() < 1e-12);
    }
}
