//! Feature extraction for catalog names and queries.
//!
//! Two features are derived from a normalized (uppercase) string:
//!
//! - An [`Embedding`]: character n-gram counts hashed into a fixed number of
//!   buckets and L2-normalized (the "hashing trick"). Distinct n-grams that land
//!   in the same bucket add up rather than overwrite each other.
//! - A [`PresenceMask`]: one bit per `A-Z` / `0-9` character present. It is only
//!   used to reject candidates that share no characters with the query.

use std::fmt;

/// Number of buckets in every embedding
pub const EMBEDDING_DIM: usize = 256;

/// Default n-gram length used when building embeddings
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Fixed-dimension n-gram fingerprint of a string.
///
/// Either L2-normalized or the zero vector (for strings shorter than the
/// n-gram size).
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    values: Vec<f64>,
}

impl Embedding {
    /// The all-zero embedding
    #[must_use]
    pub fn zeros() -> Self {
        Self {
            values: vec![0.0; EMBEDDING_DIM],
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Euclidean norm
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Scale to unit length in place. A zero vector is left untouched.
    fn normalize(&mut self) {
        let length = self.norm();
        if length > 0.0 {
            for v in &mut self.values {
                *v /= length;
            }
        }
    }
}

impl Default for Embedding {
    fn default() -> Self {
        Self::zeros()
    }
}

/// Bucket for a single n-gram.
///
/// The hash is the first eight bytes (little-endian) of the MD5 digest of the
/// n-gram, so bucket assignment is identical across runs and platforms.
#[must_use]
pub fn ngram_bucket(ngram: &[u8]) -> usize {
    let digest = md5::compute(ngram);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.0[..8]);
    let hash = u64::from_le_bytes(prefix);
    // EMBEDDING_DIM fits in u64, and the remainder fits back into usize
    #[allow(clippy::cast_possible_truncation)]
    {
        (hash % EMBEDDING_DIM as u64) as usize
    }
}

/// Build the n-gram embedding of an already-normalized string.
///
/// Strings shorter than `ngram_size` bytes produce the zero vector. An
/// `ngram_size` of zero is treated the same way, since there are no n-grams
/// to count.
#[must_use]
pub fn vectorize(text: &str, ngram_size: usize) -> Embedding {
    let mut embedding = Embedding::zeros();
    let bytes = text.as_bytes();

    if ngram_size == 0 || bytes.len() < ngram_size {
        return embedding;
    }

    for ngram in bytes.windows(ngram_size) {
        embedding.values[ngram_bucket(ngram)] += 1.0;
    }

    embedding.normalize();
    embedding
}

/// 36-bit set of the letters `A-Z` (bits 0-25) and digits `0-9` (bits 26-35)
/// occurring in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PresenceMask(u64);

impl PresenceMask {
    /// Raw bit representation
    #[must_use]
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Do the two masks share at least one character?
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Lists the recorded characters in bit order, e.g. `AEILNP` for "APPLE INC"
impl fmt::Display for PresenceMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bit, c) in (b'A'..=b'Z').chain(b'0'..=b'9').enumerate() {
            if self.0 & (1u64 << bit) != 0 {
                write!(f, "{}", char::from(c))?;
            }
        }
        Ok(())
    }
}

/// Compute the presence mask of an already-normalized string.
///
/// Only uppercase ASCII letters and ASCII digits contribute; anything else
/// (lowercase, punctuation, whitespace, non-ASCII) is ignored.
#[must_use]
pub fn char_mask(text: &str) -> PresenceMask {
    let mut mask = 0u64;
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' => mask |= 1u64 << (byte - b'A'),
            b'0'..=b'9' => mask |= 1u64 << (26 + (byte - b'0')),
            _ => {}
        }
    }
    PresenceMask(mask)
}
