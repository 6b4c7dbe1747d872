//! Centralized validation and normalization helpers.

/// Maximum number of records accepted from a single source (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Maximum query length in bytes accepted by the web API
pub const MAX_QUERY_LENGTH: usize = 256;

/// Normalize a ticker symbol: trim surrounding whitespace and uppercase.
///
/// # Examples
///
/// ```
/// use ticker_resolver::utils::validation::normalize_ticker;
///
/// assert_eq!(normalize_ticker(" brk.b "), "BRK.B");
/// assert_eq!(normalize_ticker("   "), "");
/// ```
#[must_use]
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_ascii_uppercase()
}

/// Normalize a catalog display name: trim surrounding whitespace and uppercase.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Normalize a user query. Only case is folded; whitespace is significant.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.to_ascii_uppercase()
}

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Validation errors for user-supplied queries
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query is empty")]
    Empty,
    #[error("Query too long: exceeds {MAX_QUERY_LENGTH} bytes")]
    TooLong,
    #[error("Query contains control characters")]
    ControlCharacters,
}

/// Validate a query received over the network before resolving it.
///
/// # Errors
///
/// Returns `QueryError::Empty` for blank queries, `QueryError::TooLong` when the
/// query exceeds [`MAX_QUERY_LENGTH`], or `QueryError::ControlCharacters` if it
/// contains control characters.
pub fn validate_query(query: &str) -> Result<&str, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::Empty);
    }
    if query.len() > MAX_QUERY_LENGTH {
        return Err(QueryError::TooLong);
    }
    if query.chars().any(char::is_control) {
        return Err(QueryError::ControlCharacters);
    }
    Ok(query)
}
