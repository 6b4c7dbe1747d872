//! Parser for pipe-delimited exchange symbol directories.
//!
//! Two layouts are supported, distinguished by their header row:
//!
//! ```text
//! Symbol|Security Name|Market Category|Test Issue|...
//! ACT Symbol|Security Name|Exchange|CQS Symbol|...
//! ```
//!
//! The last line of such files is a `File Creation Time: ...` trailer, which
//! is skipped. Security names are reduced with
//! [`clean_company_name`](crate::parsing::names::clean_company_name), symbols
//! that are not purely alphabetic (units, preferred series such as `ABC$A`,
//! when-issued `ABC.W`) are dropped, and the first occurrence of a symbol wins.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::core::entry::TickerRecord;
use crate::parsing::names::clean_company_name;
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::check_record_limit;

const TRAILER_PREFIX: &str = "File Creation Time";

/// Parse one or more symbol directory files into a single record list.
///
/// Files are read in order; a symbol already seen in an earlier file is skipped.
///
/// # Errors
///
/// Returns `ParseError::Io` if a file cannot be read, or
/// `ParseError::InvalidFormat` if a file lacks the expected header columns.
pub fn parse_listing_files(paths: &[&Path]) -> Result<Vec<TickerRecord>, ParseError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for path in paths {
        let text = read_text(path)?;
        collect_listing(&text, &mut records, &mut seen)?;
    }
    Ok(records)
}

/// Parse the text of a single symbol directory file.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header row is missing the symbol
/// or security name column, or `ParseError::TooManyRecords` if the limit is
/// exceeded.
pub fn parse_listing_text(text: &str) -> Result<Vec<TickerRecord>, ParseError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    collect_listing(text, &mut records, &mut seen)?;
    Ok(records)
}

/// Column positions taken from the header row
struct ListingColumns {
    symbol: usize,
    name: usize,
}

impl ListingColumns {
    fn from_header(header: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = header.split('|').map(str::trim).collect();
        let symbol = fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case("Symbol") || f.eq_ignore_ascii_case("ACT Symbol"))
            .ok_or_else(|| {
                ParseError::InvalidFormat("Listing header has no Symbol column".to_string())
            })?;
        let name = fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case("Security Name"))
            .ok_or_else(|| {
                ParseError::InvalidFormat("Listing header has no Security Name column".to_string())
            })?;
        Ok(Self { symbol, name })
    }
}

fn collect_listing(
    text: &str,
    records: &mut Vec<TickerRecord>,
    seen: &mut HashSet<String>,
) -> Result<(), ParseError> {
    let mut lines = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("Listing file is empty".to_string()))?;
    let columns = ListingColumns::from_header(header)?;

    let mut skipped = 0usize;
    for line in lines {
        if line.starts_with(TRAILER_PREFIX) {
            continue;
        }

        let fields: Vec<&str> = line.split('|').collect();
        let (Some(symbol), Some(security_name)) =
            (fields.get(columns.symbol), fields.get(columns.name))
        else {
            skipped += 1;
            continue;
        };

        let ticker = symbol.trim().to_ascii_uppercase();
        if ticker.is_empty() || !ticker.chars().all(|c| c.is_ascii_alphabetic()) {
            skipped += 1;
            continue;
        }

        let name = clean_company_name(security_name);
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        if !seen.insert(ticker.clone()) {
            continue;
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(TickerRecord::new(ticker, name));
    }

    debug!(
        kept = records.len(),
        skipped, "Parsed symbol directory listing"
    );
    Ok(())
}
