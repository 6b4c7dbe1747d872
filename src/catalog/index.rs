use crate::core::entry::Entry;
use crate::core::features::PresenceMask;

use super::store::TickerCatalog;

/// Finds candidate entries that might match a query
pub struct CandidateFinder<'a> {
    catalog: &'a TickerCatalog,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a TickerCatalog) -> Self {
        Self { catalog }
    }

    /// Find the entry whose ticker equals the normalized query exactly
    pub fn find_exact_ticker(&self, query: &str) -> Option<&'a Entry> {
        self.catalog.get(query)
    }

    /// Entries sharing at least one letter or digit with the query, in catalog order.
    ///
    /// Entries with no character overlap cannot be meaningfully similar and are
    /// skipped before scoring. A query without any letters or digits therefore
    /// yields no candidates at all.
    pub fn candidates(&self, query_mask: PresenceMask) -> impl Iterator<Item = &'a Entry> + 'a {
        self.catalog
            .entries()
            .iter()
            .filter(move |entry| entry.mask().overlaps(query_mask))
    }
}
