//! Score command - show how a query scores against one specific ticker.
//!
//! Unlike `resolve`, this skips the exact-ticker shortcut, the character
//! prefilter and the confidence floor, so it always reports the full breakdown.
//! Useful for understanding why a query did or did not resolve.

use clap::Args;

use crate::cli::{OutputFormat, TuningArgs};
use crate::core::entry::Entry;
use crate::matching::engine::Resolver;
use crate::matching::scoring::MatchScore;
use crate::utils::validation::normalize_ticker;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Query text (company name or ticker)
    #[arg(required = true)]
    pub query: String,

    /// Ticker to score the query against
    #[arg(required = true)]
    pub ticker: String,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the ticker is not in it.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.tuning.config()?;
    let catalog = args.tuning.load_catalog(verbose)?;
    let resolver = Resolver::with_config(&catalog, config)?;

    let entry = catalog
        .get(&normalize_ticker(&args.ticker))
        .ok_or_else(|| anyhow::anyhow!("Ticker '{}' not found in catalog", args.ticker))?;
    let score = resolver
        .score_entry(&args.query, entry.ticker())
        .ok_or_else(|| anyhow::anyhow!("Ticker '{}' not found in catalog", args.ticker))?;

    let accepted = score.raw >= resolver.config().thresholds.min_confidence;

    match format {
        OutputFormat::Text => print_text(&args.query, entry, &score, accepted),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": args.query,
                "ticker": entry.ticker(),
                "name": entry.name(),
                "score": score,
                "above_floor": accepted,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("query\tticker\tname\tcosine\tlevenshtein\tbonus\tweight_cosine\tweight_levenshtein\tscore\tconfidence\tabove_floor");
            println!(
                "{}\t{}\t{}\t{:.4}\t{:.4}\t{:.2}\t{:.2}\t{:.2}\t{:.4}\t{}\t{}",
                args.query,
                entry.ticker(),
                entry.name(),
                score.cosine,
                score.levenshtein,
                score.bonus,
                score.weights.cosine,
                score.weights.levenshtein,
                score.composite,
                score.confidence,
                accepted,
            );
        }
    }

    Ok(())
}

fn print_text(query: &str, entry: &Entry, score: &MatchScore, accepted: bool) {
    println!("\nScoring: \"{query}\" vs {} ({})", entry.ticker(), entry.name());

    println!(
        "\n   Score: {:.1}% = {:.2}×cosine + {:.2}×levenshtein + {:.2} bonus",
        score.composite * 100.0,
        score.weights.cosine,
        score.weights.levenshtein,
        score.bonus,
    );
    println!("   Cosine:      {:.4}", score.cosine);
    println!("   Levenshtein: {:.4}", score.levenshtein);
    if score.raw > score.composite {
        println!("   Unclamped:   {:.4}", score.raw);
    }

    println!("   Confidence: {}", score.confidence);
    if !accepted {
        println!("   Below the confidence floor: would not be reported as a match");
    }
}
