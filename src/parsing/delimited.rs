use std::path::Path;

use crate::core::entry::TickerRecord;
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// Parse a TSV/CSV file with columns: ticker, name
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_delimited_file(path: &Path, delimiter: char) -> Result<Vec<TickerRecord>, ParseError> {
    let content = read_text(path)?;
    parse_delimited_text(&content, delimiter)
}

/// Parse TSV/CSV text with columns: ticker, name
///
/// Blank lines and `#` comments are skipped, and a leading header row
/// (`ticker`, `symbol`) is recognized. Extra columns are ignored. Rows with an
/// empty ticker or name are passed through; dropping them is the catalog's job.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 2 fields, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_delimited_text(text: &str, delimiter: char) -> Result<Vec<TickerRecord>, ParseError> {
    let mut records = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if first == "ticker" || first == "symbol" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(TickerRecord::new(fields[0].trim(), fields[1].trim()));
    }

    Ok(records)
}
