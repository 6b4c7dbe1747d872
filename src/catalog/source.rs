//! Record sources the catalog can be loaded from.
//!
//! A [`RecordSource`] yields raw `(ticker, name)` pairs. It is read exactly
//! once while the catalog is built; any error aborts the load so a partial
//! catalog is never produced.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::catalog::store::{CatalogData, CatalogError};
use crate::core::entry::TickerRecord;
use crate::parsing::{self, base_extension, delimited, listing};
use crate::utils::validation::check_record_limit;

/// Default query used to read a SQLite ticker table
pub const DEFAULT_SQLITE_QUERY: &str = "SELECT ticker, company FROM tickers";

/// A read interface yielding `(ticker, name)` records.
pub trait RecordSource {
    /// Short human-readable description used in logs
    fn describe(&self) -> String;

    /// Read every record from the source.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the source is unreachable or unreadable.
    fn read_records(&mut self) -> Result<Vec<TickerRecord>, CatalogError>;
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<TickerRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<TickerRecord>) -> Self {
        Self { records }
    }
}

impl<T, N> FromIterator<(T, N)> for MemorySource
where
    T: Into<String>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, N)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(ticker, name)| TickerRecord::new(ticker, name))
                .collect(),
        )
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }

    fn read_records(&mut self) -> Result<Vec<TickerRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// A JSON catalog file as written by `TickerCatalog::to_json`
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonSource {
    fn describe(&self) -> String {
        format!("JSON catalog {}", self.path.display())
    }

    fn read_records(&mut self) -> Result<Vec<TickerRecord>, CatalogError> {
        let text = parsing::read_text(&self.path)?;
        let data = CatalogData::from_json(&text)?;
        Ok(data.records)
    }
}

/// A TSV or CSV file with ticker and name columns
#[derive(Debug, Clone)]
pub struct DelimitedSource {
    path: PathBuf,
    delimiter: char,
}

impl DelimitedSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }
}

impl RecordSource for DelimitedSource {
    fn describe(&self) -> String {
        format!("delimited file {}", self.path.display())
    }

    fn read_records(&mut self) -> Result<Vec<TickerRecord>, CatalogError> {
        Ok(delimited::parse_delimited_file(&self.path, self.delimiter)?)
    }
}

/// One or more pipe-delimited exchange symbol directories
#[derive(Debug, Clone)]
pub struct ListingSource {
    paths: Vec<PathBuf>,
}

impl ListingSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl RecordSource for ListingSource {
    fn describe(&self) -> String {
        let paths: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
        format!("symbol directory {}", paths.join(", "))
    }

    fn read_records(&mut self) -> Result<Vec<TickerRecord>, CatalogError> {
        let paths: Vec<&Path> = self.paths.iter().map(PathBuf::as_path).collect();
        Ok(listing::parse_listing_files(&paths)?)
    }
}

/// A SQLite database with a ticker table.
///
/// The query must return the ticker in its first column and the name in its
/// second. NULL values are read as empty strings and the record is dropped by
/// the catalog loader.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
    query: String,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            query: DEFAULT_SQLITE_QUERY.to_string(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

impl RecordSource for SqliteSource {
    fn describe(&self) -> String {
        format!("SQLite database {}", self.path.display())
    }

    fn read_records(&mut self) -> Result<Vec<TickerRecord>, CatalogError> {
        // Read-only open fails instead of silently creating a new database
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let mut stmt = conn.prepare(&self.query)?;
        let rows = stmt.query_map([], |row| {
            let ticker: Option<String> = row.get(0)?;
            let name: Option<String> = row.get(1)?;
            Ok(TickerRecord::new(
                ticker.unwrap_or_default(),
                name.unwrap_or_default(),
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            if check_record_limit(records.len()).is_some() {
                return Err(CatalogError::TooManyRecords(records.len()));
            }
            records.push(row?);
        }
        Ok(records)
    }
}

/// Pick a record source for a file based on its extension.
///
/// | Extension | Source |
/// |-----------|--------|
/// | `.json` | [`JsonSource`] |
/// | `.tsv`, `.tab` | [`DelimitedSource`] (tab) |
/// | `.csv` | [`DelimitedSource`] (comma) |
/// | `.txt` | [`ListingSource`] |
/// | `.db`, `.sqlite`, `.sqlite3` | [`SqliteSource`] |
///
/// Text formats may additionally end in `.gz`.
///
/// # Errors
///
/// Returns `CatalogError::UnsupportedSource` for unknown extensions.
pub fn open_source(path: &Path) -> Result<Box<dyn RecordSource>, CatalogError> {
    let ext = base_extension(path);
    let source: Box<dyn RecordSource> = match ext.as_deref() {
        Some("json") => Box::new(JsonSource::new(path)),
        Some("tsv" | "tab") => Box::new(DelimitedSource::new(path, '\t')),
        Some("csv") => Box::new(DelimitedSource::new(path, ',')),
        Some("txt") => Box::new(ListingSource::new(vec![path.to_path_buf()])),
        Some("db" | "sqlite" | "sqlite3") if !parsing::is_gzipped(path) => {
            Box::new(SqliteSource::new(path))
        }
        _ => {
            return Err(CatalogError::UnsupportedSource(
                path.display().to_string(),
            ))
        }
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_source_from_pairs() {
        let mut source: MemorySource = [("AAPL", "APPLE INC"), ("MSFT", "MICROSOFT")]
            .into_iter()
            .collect();
        let records = source.read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], TickerRecord::new("MSFT", "MICROSOFT"));
    }

    #[test]
    fn test_open_source_by_extension() {
        assert!(open_source(Path::new("a.json")).is_ok());
        assert!(open_source(Path::new("a.csv.gz")).is_ok());
        assert!(open_source(Path::new("nasdaqlisted.txt")).is_ok());
        assert!(open_source(Path::new("tickers.db")).is_ok());
        assert!(matches!(
            open_source(Path::new("tickers.xlsx")),
            Err(CatalogError::UnsupportedSource(_))
        ));
        assert!(open_source(Path::new("tickers.db.gz")).is_err());
    }

    #[test]
    fn test_sqlite_source_reads_ticker_table() {
        let temp = tempfile::Builder::new().suffix(".db").tempfile().unwrap();
        {
            let conn = Connection::open(temp.path()).unwrap();
            conn.execute_batch(
                "CREATE TABLE tickers (ticker TEXT PRIMARY KEY, company TEXT);
                 INSERT INTO tickers VALUES ('AAPL', 'APPLE');
                 INSERT INTO tickers VALUES ('NULLNAME', NULL);",
            )
            .unwrap();
        }

        let records = SqliteSource::new(temp.path()).read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TickerRecord::new("AAPL", "APPLE"));
        assert!(records[1].name.is_empty());
    }

    #[test]
    fn test_sqlite_source_missing_table_is_error() {
        let temp = tempfile::Builder::new().suffix(".db").tempfile().unwrap();
        Connection::open(temp.path()).unwrap();
        let result = SqliteSource::new(temp.path()).read_records();
        assert!(matches!(result, Err(CatalogError::Sqlite(_))));
    }

    #[test]
    fn test_sqlite_source_missing_file_is_error() {
        let result = SqliteSource::new("/nonexistent/dir/tickers.db").read_records();
        assert!(result.is_err());
    }

    #[test]
    fn test_delimited_source() {
        let mut temp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp, "ticker,name\nGE,General Electric").unwrap();
        let mut source = open_source(temp.path()).unwrap();
        let records = source.read_records().unwrap();
        assert_eq!(records, vec![TickerRecord::new("GE", "General Electric")]);
    }
}
