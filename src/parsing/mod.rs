//! Parsers for ticker lists in various text formats.
//!
//! This module provides parsers for:
//!
//! - **TSV/CSV files**: two columns, ticker and name, with an optional header
//! - **Symbol directory listings**: pipe-delimited exchange listing files with
//!   `Symbol` or `ACT Symbol` and `Security Name` columns
//!
//! Any of these may be gzip-compressed (`.gz`); [`read_text`] decompresses
//! transparently.
//!
//! ## Example
//!
//! ```rust
//! use ticker_resolver::parsing::delimited::parse_delimited_text;
//!
//! let records = parse_delimited_text("ticker\tname\nAAPL\tApple Inc\n", '\t').unwrap();
//! assert_eq!(records[0].ticker, "AAPL");
//! ```

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod delimited;
pub mod listing;
pub mod names;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed (1000000)")]
    TooManyRecords(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Lowercased extension of a path, ignoring a trailing `.gz`/`.bgz`.
///
/// `listings.csv.gz` yields `csv`.
pub fn base_extension(path: &Path) -> Option<String> {
    let stem_path;
    let path = if is_gzipped(path) {
        stem_path = path.with_extension("");
        stem_path.as_path()
    } else {
        path
    };
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Read a text file, decompressing it first if it is gzipped.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, decompressed, or is
/// not valid UTF-8.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let mut text = String::new();
        GzDecoder::new(file).read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_base_extension() {
        assert_eq!(
            base_extension(&PathBuf::from("tickers.csv")).as_deref(),
            Some("csv")
        );
        assert_eq!(
            base_extension(&PathBuf::from("tickers.TSV.gz")).as_deref(),
            Some("tsv")
        );
        assert_eq!(base_extension(&PathBuf::from("tickers")), None);
    }

    #[test]
    fn test_read_gzipped_text() {
        let temp = tempfile::Builder::new().suffix(".txt.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(temp.reopen().unwrap(), Compression::default());
        encoder.write_all(b"AAPL\tApple Inc\n").unwrap();
        encoder.finish().unwrap();

        let text = read_text(temp.path()).unwrap();
        assert_eq!(text, "AAPL\tApple Inc\n");
    }
}
