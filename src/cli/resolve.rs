use std::io::BufRead;

use clap::Args;

use crate::cli::{OutputFormat, TuningArgs};
use crate::core::types::Resolution;
use crate::matching::engine::{Resolver, ScoredMatch};
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct ResolveArgs {
    /// Queries to resolve (company names or tickers).
    /// Use '-' to read one query per line from stdin
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Number of candidates to show per query (1 shows only the best match)
    #[arg(short = 'n', long, default_value = "1")]
    pub max_matches: usize,

    /// Exit with an error if any query is unresolved
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// One resolved query, ready for output
struct QueryResult<'a> {
    query: String,
    best: Resolution,
    candidates: Vec<ScoredMatch<'a>>,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a query is invalid, or
/// `--strict` is set and a query is unresolved.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.tuning.config()?;
    let catalog = args.tuning.load_catalog(verbose)?;
    let resolver = Resolver::with_config(&catalog, config)?;

    let queries = collect_queries(&args.queries)?;
    if verbose {
        eprintln!("Resolving {} queries", queries.len());
    }

    let mut results = Vec::with_capacity(queries.len());
    for query in queries {
        validate_query(&query).map_err(|e| anyhow::anyhow!("Invalid query '{query}': {e}"))?;

        let best = resolver.find_best_match(&query);
        let candidates = if args.max_matches > 1 {
            resolver.find_matches(&query, args.max_matches)
        } else {
            Vec::new()
        };
        results.push(QueryResult {
            query,
            best,
            candidates,
        });
    }

    match format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Tsv => print_tsv(&results),
    }

    let unresolved = results.iter().filter(|r| !r.best.is_match()).count();
    if args.strict && unresolved > 0 {
        anyhow::bail!("{unresolved} of {} queries could not be resolved", results.len());
    }

    Ok(())
}

/// Expand `-` into the non-empty lines of stdin
fn collect_queries(args: &[String]) -> anyhow::Result<Vec<String>> {
    let mut queries = Vec::new();
    for arg in args {
        if arg == "-" {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                let line = line.trim_end_matches('\r');
                if !line.trim().is_empty() {
                    queries.push(line.to_string());
                }
            }
        } else {
            queries.push(arg.clone());
        }
    }
    Ok(queries)
}

fn print_text(results: &[QueryResult]) {
    for result in results {
        if result.best.is_match() {
            println!(
                "{} -> {} ({:.1}%, {})",
                result.query,
                result.best.ticker,
                result.best.confidence * 100.0,
                result.best.level()
            );
        } else {
            println!("{} -> no match", result.query);
        }

        for (i, m) in result.candidates.iter().enumerate() {
            println!(
                "   #{}: {:<8} {:<40} {:>5.1}%",
                i + 1,
                m.entry.ticker(),
                m.entry.name(),
                m.score.composite * 100.0
            );
        }
    }
}

fn print_json(results: &[QueryResult]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            let mut json = serde_json::json!({
                "query": r.query,
                "ticker": r.best.is_match().then_some(&r.best.ticker),
                "confidence": r.best.confidence,
                "level": r.best.level().to_string(),
            });
            if !r.candidates.is_empty() {
                json["candidates"] = r
                    .candidates
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "ticker": m.entry.ticker(),
                            "name": m.entry.name(),
                            "score": m.score,
                        })
                    })
                    .collect();
            }
            json
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(results: &[QueryResult]) {
    println!("query\trank\tticker\tconfidence\tlevel");
    for result in results {
        if result.candidates.is_empty() {
            let ticker = if result.best.is_match() {
                result.best.ticker.as_str()
            } else {
                "NA"
            };
            println!(
                "{}\t1\t{}\t{:.4}\t{}",
                result.query,
                ticker,
                result.best.confidence,
                result.best.level()
            );
            continue;
        }

        for (i, m) in result.candidates.iter().enumerate() {
            println!(
                "{}\t{}\t{}\t{:.4}\t{}",
                result.query,
                i + 1,
                m.entry.ticker(),
                m.score.composite,
                m.score.confidence
            );
        }
    }
}
