//! End-to-end resolver behavior through the public API.

use std::sync::Arc;

use ticker_resolver::catalog::source::MemorySource;
use ticker_resolver::matching::similarity::{cosine_similarity, levenshtein};
use ticker_resolver::core::features::{vectorize, Embedding};
use ticker_resolver::{Confidence, Resolution, Resolver, TickerCatalog, TickerRecord};

fn catalog(pairs: &[(&str, &str)]) -> TickerCatalog {
    TickerCatalog::from_records(
        pairs.iter().map(|(t, n)| TickerRecord::new(*t, *n)),
        3,
    )
    .expect("in-memory catalog")
}

fn assert_valid(result: &Resolution) {
    if result.is_match() {
        assert!(
            (0.333..=1.0).contains(&result.confidence),
            "confidence {} out of range",
            result.confidence
        );
    } else {
        assert_eq!(result.confidence, 0.0);
    }
}

#[test]
fn test_similarity_properties() {
    let v = vectorize("APPLE INC", 3);
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);

    let zero = Embedding::zeros();
    assert_eq!(cosine_similarity(&zero, &zero), 0.0);

    for s in ["", "A", "MICROSOFT CORP"] {
        assert_eq!(levenshtein(s, s), 0);
        assert_eq!(levenshtein("", s), s.len());
    }
    assert_eq!(levenshtein("APPLE", "MAPLE"), levenshtein("MAPLE", "APPLE"));
}

#[test]
fn test_empty_query_is_no_match() {
    let catalog = catalog(&[("AAPL", "APPLE INC")]);
    let resolver = Resolver::new(&catalog);
    assert_eq!(resolver.find_best_match(""), Resolution::new("", 0.0));
}

#[test]
fn test_exact_ticker_shortcut() {
    let catalog = catalog(&[("AAPL", "APPLE INC"), ("AAPL2", "APPLE HOLDINGS")]);
    let resolver = Resolver::new(&catalog);
    assert_eq!(resolver.find_best_match("aapl"), Resolution::new("AAPL", 1.0));
}

#[test]
fn test_mask_prefilter_rejection() {
    let catalog = catalog(&[("AAPL", "APPLE INC")]);
    let resolver = Resolver::new(&catalog);
    assert_eq!(resolver.find_best_match("@@@"), Resolution::new("", 0.0));
}

#[test]
fn test_end_to_end_microsoft() {
    let catalog = catalog(&[("MSFT", "MICROSOFT CORP"), ("META", "META PLATFORMS INC")]);
    let resolver = Resolver::new(&catalog);

    let result = resolver.find_best_match("microsft");
    assert_eq!(result.ticker, "MSFT");
    assert!(result.confidence > 0.333);
    assert!(result.confidence <= 1.0);

    assert_eq!(resolver.find_best_match("xyz"), Resolution::new("", 0.0));
}

#[test]
fn test_long_query_earns_no_containment_bonus() {
    let catalog = catalog(&[("MSFT", "MICROSOFT CORP"), ("META", "META PLATFORMS INC")]);
    let resolver = Resolver::new(&catalog);

    let matches = resolver.find_matches("microsoft", 1);
    assert_eq!(matches[0].entry.ticker(), "MSFT");
    assert_eq!(matches[0].score.bonus, 0.0);

    let result = resolver.find_best_match("microsoft");
    assert_eq!(result.ticker, "MSFT");
    assert!((result.confidence - matches[0].score.raw).abs() < 1e-12);
    assert_eq!(result.level(), Confidence::Medium);
}

#[test]
fn test_query_case_does_not_matter() {
    let catalog = catalog(&[("MSFT", "MICROSOFT CORP"), ("META", "META PLATFORMS INC")]);
    let resolver = Resolver::new(&catalog);
    assert_eq!(
        resolver.find_best_match("microsft"),
        resolver.find_best_match("MicroSFT")
    );
}

#[test]
fn test_malformed_records_are_dropped() {
    let mut source: MemorySource = vec![("", "NO TICKER"), ("GHOST", ""), ("IBM", "IBM")]
        .into_iter()
        .collect();
    let catalog = TickerCatalog::from_source(&mut source, 3).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.dropped(), 2);
}

#[test]
fn test_empty_catalog_never_matches() {
    let catalog = TickerCatalog::new();
    let resolver = Resolver::new(&catalog);
    for query in ["AAPL", "apple", "microsoft", "x"] {
        assert_eq!(resolver.find_best_match(query), Resolution::no_match());
    }
}

#[test]
fn test_embedded_catalog_resolution() {
    let catalog = TickerCatalog::load_embedded().unwrap();
    let resolver = Resolver::new(&catalog);

    let cases = [
        ("microsft", "MSFT"),
        ("Apple", "AAPL"),
        ("aapl", "AAPL"),
        ("meta platfroms", "META"),
        ("berkshire", "BRK.B"),
        ("coca-cola", "KO"),
        ("disney", "DIS"),
    ];
    for (query, expected) in cases {
        let result = resolver.find_best_match(query);
        assert_eq!(result.ticker, expected, "query {query:?}");
        assert_valid(&result);
    }

    // Prefix bonus pushes the raw score past 1.0
    let apple = resolver.find_best_match("apple");
    assert_eq!(apple.confidence, 1.0);
    assert_eq!(apple.level(), Confidence::Exact);

    for query in ["xyz", "@@@", "googel", "zzzz"] {
        let result = resolver.find_best_match(query);
        assert!(!result.is_match(), "query {query:?} matched {}", result.ticker);
        assert_valid(&result);
    }
}

#[test]
fn test_deterministic_across_resolvers() {
    let catalog = TickerCatalog::load_embedded().unwrap();
    let first = Resolver::new(&catalog).find_best_match("jp morgan");
    for _ in 0..5 {
        assert_eq!(Resolver::new(&catalog).find_best_match("jp morgan"), first);
    }
}

#[test]
fn test_concurrent_lookups_share_catalog() {
    let catalog = Arc::new(TickerCatalog::load_embedded().unwrap());
    let expected = Resolver::new(&catalog).find_best_match("nvidai");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || Resolver::new(&catalog).find_best_match("nvidai"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(expected.ticker, "NVDA");
}

#[test]
fn test_find_matches_ranked() {
    let catalog = TickerCatalog::load_embedded().unwrap();
    let resolver = Resolver::new(&catalog);

    let matches = resolver.find_matches("microsft", 3);
    assert_eq!(matches[0].entry.ticker(), "MSFT");
    for pair in matches.windows(2) {
        assert!(pair[0].score.raw >= pair[1].score.raw);
    }
    assert!(matches.iter().all(|m| m.score.raw >= 0.333));
}
