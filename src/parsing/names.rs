//! Cleaning of security names from exchange listings.
//!
//! Listing files carry full security names such as
//! `"Apple Inc. - Common Stock"`. Matching works better on the distinctive part
//! of the name, so imports reduce it to `"APPLE"`:
//!
//! 1. Uppercase and replace every character outside `A-Z`, `0-9` and space
//!    with a space
//! 2. Drop share-class and instrument phrases (`CLASS A`, `COMMON STOCK`, ...)
//! 3. Drop corporate suffix words (`INC`, `CORP`, `HOLDINGS`, ...)
//! 4. Collapse whitespace

/// Multi-word phrases removed as a unit
const NOISE_PHRASES: &[&[&str]] = &[
    &["CLASS", "A"],
    &["CLASS", "B"],
    &["CLASS", "C"],
    &["COMMON", "STOCK"],
    &["PREFERRED", "STOCK"],
    &["WARRANT"],
    &["WARRANTS"],
];

/// Single words removed wherever they occur
const CORPORATE_STOPWORDS: &[&str] = &[
    "INC",
    "INCORPORATED",
    "CORP",
    "CORPORATION",
    "TECH",
    "TECHNOLOGY",
    "TECHNOLOGIES",
    "COMPANY",
    "CO",
    "GROUP",
    "HOLDINGS",
    "LIMITED",
    "LTD",
    "COMMUNICATIONS",
    "COMMUNICATION",
    "SYSTEMS",
    "PLC",
    "SA",
    "LLC",
    "COMMON",
    "STOCK",
    "SHARES",
];

/// Reduce a listing security name to its distinctive words.
///
/// Returns an empty string when nothing distinctive remains.
///
/// # Examples
///
/// ```
/// use ticker_resolver::parsing::names::clean_company_name;
///
/// assert_eq!(clean_company_name("Apple Inc. - Common Stock"), "APPLE");
/// assert_eq!(clean_company_name("Alphabet Inc. - Class A Common Stock"), "ALPHABET");
/// ```
#[must_use]
pub fn clean_company_name(name: &str) -> String {
    let upper: String = name
        .chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let tokens: Vec<&str> = upper.split_whitespace().collect();
    let tokens = remove_phrases(&tokens);

    tokens
        .into_iter()
        .filter(|token| !CORPORATE_STOPWORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn remove_phrases<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    'outer: while i < tokens.len() {
        for phrase in NOISE_PHRASES {
            if tokens[i..].starts_with(*phrase) {
                i += phrase.len();
                continue 'outer;
            }
        }
        kept.push(tokens[i]);
        i += 1;
    }
    kept
}
