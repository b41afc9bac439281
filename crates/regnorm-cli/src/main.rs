//! regnorm: command-line interface for regnorm-core
//!
//! Matches noisy Russian region names against the bundled catalog (or a
//! catalog file of your own) from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Best match per text
//!   $ regnorm match "московск обл" "СПб" "респ. Татарстан"
//!
//! - Near misses and how a score came about
//!   $ regnorm match "новосиб" --top 3
//!   $ regnorm match "Свердловской обл." --explain
//!
//! - Normalized forms
//!   $ regnorm normalize "Mосковская област"
//!
//! - Batch-match a CSV column and attach catalog attributes
//!   $ regnorm table -i raw.csv --column region -o out.csv --attach name_eng,okato
//!
//! - Custom weighting
//!   $ regnorm --weights levenshtein=0.4,token_set=0.6 --threshold 70 match "свердловск"
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` for more detail.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use regnorm_core::text::normalize;
use regnorm_core::{Catalog, MatchConfig, RegionMatcher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &CliArgs) -> anyhow::Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::from_path(path)
            .with_context(|| format!("reading match config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(weights) = &args.weights {
        config.weights.metric_weights = weights.clone();
    }
    if let Some(weights) = &args.approach_weights {
        config.weights.approach_weights = weights.clone();
    }
    if args.no_abbreviations {
        config.expand_abbreviations = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let catalog = match &args.catalog {
        Some(path) => Catalog::load_from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::load().context("loading built-in catalog")?,
    };
    let config = load_config(&args)?;
    debug!(?config, entries = catalog.len(), "starting");
    let matcher = config.matcher(&catalog);

    match args.command {
        Commands::Match { texts, top, explain } => {
            for text in &texts {
                run_match(&matcher, &config, text, top, explain);
            }
        }

        Commands::Normalize { texts } => {
            for text in &texts {
                let n = normalize(text);
                println!("{text}");
                println!("  original: {}", n.original);
                println!("  stemmed:  {}", n.stemmed);
            }
        }

        Commands::Table {
            input,
            column,
            output,
            attach,
            match_column,
            score_column,
        } => {
            #[cfg(feature = "csv")]
            {
                use regnorm_core::{read_csv, BatchOptions};

                let table = read_csv(&input).with_context(|| format!("reading {}", input.display()))?;
                let options = BatchOptions::default()
                    .with_match_column(match_column.clone())
                    .with_score_column(score_column);
                let mut table =
                    matcher.match_table_with(table, &column, &config.weights, config.threshold, &options)?;
                if !attach.is_empty() {
                    let fields: Vec<&str> = attach.iter().map(String::as_str).collect();
                    table = matcher.attach_fields(table, &match_column, &fields)?;
                }
                match output {
                    Some(path) => {
                        regnorm_core::write_csv(&table, &path)
                            .with_context(|| format!("writing {}", path.display()))?;
                        eprintln!("wrote {} rows to {}", table.rows().len(), path.display());
                    }
                    None => table.to_csv_writer(std::io::stdout().lock())?,
                }
            }
            #[cfg(not(feature = "csv"))]
            {
                let _ = (input, column, output, attach, match_column, score_column);
                anyhow::bail!("the table command needs the 'csv' feature");
            }
        }

        Commands::Stats => {
            let stats = catalog.stats();
            println!("Catalog statistics:");
            println!("  Entries: {}", stats.entries);
            println!("  Alternate names: {}", stats.alternate_names);
            println!("  Attribute keys: {}", stats.attribute_keys);
            let keys: Vec<&str> = catalog.attribute_keys().into_iter().collect();
            if !keys.is_empty() {
                println!("  Attributes: {}", keys.join(", "));
            }
        }
    }

    Ok(())
}

fn run_match(matcher: &RegionMatcher<'_>, config: &MatchConfig, text: &str, top: Option<usize>, explain: bool) {
    if let Some(n) = top {
        println!("{text}");
        for (rank, hit) in matcher.top_matches(text, &config.weights, n).iter().enumerate() {
            println!(
                "  {}. {} ({:.1}, via '{}')",
                rank + 1,
                hit.entry.name(),
                hit.score,
                hit.matched_name
            );
        }
        return;
    }

    let hit = matcher.find_best_match(text, &config.weights, config.threshold);
    match hit.candidate() {
        Some(name) => println!("{text}\t{name}\t{:.1}", hit.score),
        None => println!("{text}\t-\t{:.1}", hit.score),
    }

    if explain {
        if let Some(name) = hit.candidate() {
            if let Some(breakdown) = matcher.explain(text, name, &config.weights) {
                for approach in &breakdown.approaches {
                    println!(
                        "  {} (w={}): '{}' vs '{}' -> {:.1}",
                        approach.approach, approach.weight, approach.input, approach.candidate, approach.score
                    );
                    for metric in &approach.metrics {
                        println!("    {} (w={}): {:.1}", metric.metric, metric.weight, metric.score);
                    }
                }
            }
        }
    }
}
