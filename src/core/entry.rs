use serde::{Deserialize, Serialize};

use crate::core::features::{char_mask, vectorize, Embedding, PresenceMask};
use crate::utils::validation::{normalize_name, normalize_ticker};

/// A raw `(ticker, name)` pair as delivered by a record source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Listing symbol (e.g. "AAPL")
    pub ticker: String,

    /// Company or security name
    pub name: String,
}

impl TickerRecord {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
        }
    }
}

/// One catalog entry with precomputed matching features.
///
/// Entries are built once while loading the catalog and never change afterwards.
#[derive(Debug, Clone)]
pub struct Entry {
    ticker: String,
    name: String,
    embedding: Embedding,
    mask: PresenceMask,
}

impl Entry {
    /// Build an entry from a record, normalizing both fields.
    ///
    /// Returns `None` when the ticker or the name is empty after normalization;
    /// such records are not usable for matching.
    #[must_use]
    pub fn from_record(record: &TickerRecord, ngram_size: usize) -> Option<Self> {
        let ticker = normalize_ticker(&record.ticker);
        let name = normalize_name(&record.name);
        if ticker.is_empty() || name.is_empty() {
            return None;
        }

        let embedding = vectorize(&name, ngram_size);
        let mask = char_mask(&name);

        Some(Self {
            ticker,
            name,
            embedding,
            mask,
        })
    }

    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Uppercase display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }

    #[must_use]
    pub fn mask(&self) -> PresenceMask {
        self.mask
    }

    /// The normalized `(ticker, name)` pair this entry was built from
    #[must_use]
    pub fn to_record(&self) -> TickerRecord {
        TickerRecord::new(self.ticker.clone(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::DEFAULT_NGRAM_SIZE;

    #[test]
    fn test_entry_normalizes_fields() {
        let record = TickerRecord::new(" msft ", "Microsoft Corp");
        let entry = Entry::from_record(&record, DEFAULT_NGRAM_SIZE).unwrap();
        assert_eq!(entry.ticker(), "MSFT");
        assert_eq!(entry.name(), "MICROSOFT CORP");
        assert_eq!(entry.mask(), char_mask("MICROSOFT CORP"));
        assert_eq!(entry.embedding(), &vectorize("MICROSOFT CORP", DEFAULT_NGRAM_SIZE));
    }

    #[test]
    fn test_entry_rejects_empty_fields() {
        assert!(Entry::from_record(&TickerRecord::new("", "APPLE"), 3).is_none());
        assert!(Entry::from_record(&TickerRecord::new("AAPL", ""), 3).is_none());
        assert!(Entry::from_record(&TickerRecord::new("AAPL", "   "), 3).is_none());
    }

    #[test]
    fn test_entry_round_trips_to_record() {
        let entry = Entry::from_record(&TickerRecord::new("ibm", "ibm"), 3).unwrap();
        assert_eq!(entry.to_record(), TickerRecord::new("IBM", "IBM"));
    }
}
