use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::source::{open_source, MemorySource, RecordSource};
use crate::core::entry::{Entry, TickerRecord};
use crate::core::features::DEFAULT_NGRAM_SIZE;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to parse records: {0}")]
    Records(#[from] ParseError),

    #[error("Failed to query records database: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Unsupported catalog source: {0}")]
    UnsupportedSource(String),

    #[error("Too many records: {0} exceeds maximum allowed (1000000)")]
    TooManyRecords(usize),

    #[error("Invalid n-gram size: {0} (must be at least 1)")]
    InvalidNgramSize(usize),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub records: Vec<TickerRecord>,
}

impl CatalogData {
    /// Parse catalog JSON, warning (but not failing) on a version mismatch.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: Self = serde_json::from_str(json)?;
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }
        Ok(data)
    }
}

/// The immutable ticker catalog.
///
/// Entries keep their load order, which is used as the tie-break when two
/// candidates score the same. There is no way to add or remove entries after
/// construction; share the catalog by reference (or `Arc`) instead.
#[derive(Debug)]
pub struct TickerCatalog {
    /// All entries in load order
    entries: Vec<Entry>,

    /// Index: ticker -> index of its first entry
    ticker_to_index: HashMap<String, usize>,

    /// N-gram size the entry embeddings were built with
    ngram_size: usize,

    /// Records dropped during load because the ticker or name was empty
    dropped: usize,
}

impl TickerCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            ticker_to_index: HashMap::new(),
            ngram_size: DEFAULT_NGRAM_SIZE,
            dropped: 0,
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        Self::load_embedded_with_ngram(DEFAULT_NGRAM_SIZE)
    }

    /// Load the embedded default catalog using a custom n-gram size
    pub fn load_embedded_with_ngram(ngram_size: usize) -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/us_listings.json");
        let data = CatalogData::from_json(EMBEDDED_CATALOG)?;
        Self::from_records(data.records, ngram_size)
    }

    /// Load a catalog from any supported file (see [`open_source`])
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        Self::load_from_file_with_ngram(path, DEFAULT_NGRAM_SIZE)
    }

    /// Load a catalog from a file using a custom n-gram size
    pub fn load_from_file_with_ngram(path: &Path, ngram_size: usize) -> Result<Self, CatalogError> {
        let mut source = open_source(path)?;
        Self::from_source(source.as_mut(), ngram_size)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data = CatalogData::from_json(json)?;
        Self::from_records(data.records, DEFAULT_NGRAM_SIZE)
    }

    /// Build a catalog from in-memory records
    pub fn from_records(
        records: impl IntoIterator<Item = TickerRecord>,
        ngram_size: usize,
    ) -> Result<Self, CatalogError> {
        let mut source = MemorySource::new(records.into_iter().collect());
        Self::from_source(&mut source, ngram_size)
    }

    /// Build a catalog from a record source.
    ///
    /// Records with an empty ticker or name are dropped silently. Any error from
    /// the source aborts the load.
    pub fn from_source(
        source: &mut dyn RecordSource,
        ngram_size: usize,
    ) -> Result<Self, CatalogError> {
        if ngram_size == 0 {
            return Err(CatalogError::InvalidNgramSize(ngram_size));
        }

        let start = Instant::now();
        let records = source.read_records()?;

        let mut catalog = Self {
            ngram_size,
            ..Self::new()
        };
        for record in &records {
            catalog.push_record(record);
        }

        if catalog.dropped > 0 {
            debug!(
                dropped = catalog.dropped,
                "Dropped records with empty ticker or name"
            );
        }
        info!(
            "Loaded {} entries from {} in {} ms",
            catalog.len(),
            source.describe(),
            start.elapsed().as_millis()
        );

        Ok(catalog)
    }

    fn push_record(&mut self, record: &TickerRecord) {
        let Some(entry) = Entry::from_record(record, self.ngram_size) else {
            self.dropped += 1;
            return;
        };

        let index = self.entries.len();
        // First occurrence wins for exact ticker lookups
        self.ticker_to_index
            .entry(entry.ticker().to_string())
            .or_insert(index);
        self.entries.push(entry);
    }

    /// Get the first entry with this (normalized) ticker
    pub fn get(&self, ticker: &str) -> Option<&Entry> {
        self.ticker_to_index
            .get(ticker)
            .map(|&idx| &self.entries[idx])
    }

    /// All entries in load order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// N-gram size used for the entry embeddings
    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Number of records dropped during load
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            records: self.entries.iter().map(Entry::to_record).collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of entries in catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TickerCatalog {
    fn default() -> Self {
        Self::new()
    }
}
