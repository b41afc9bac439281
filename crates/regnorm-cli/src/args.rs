use clap::{Parser, Subcommand};
use regnorm_core::{Approach, Metric};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for regnorm
#[derive(Debug, Parser)]
#[command(
    name = "regnorm",
    version,
    about = "Match noisy Russian region names against a canonical region catalog"
)]
pub struct CliArgs {
    /// Catalog file (.json, .yaml, .yml or .bin, optionally .gz). Defaults to the built-in catalog
    #[arg(short = 'c', long = "catalog", global = true)]
    pub catalog: Option<PathBuf>,

    /// Match configuration file (JSON or YAML) with weights and threshold
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Minimum score (0-100) a match must reach
    #[arg(short = 't', long = "threshold", global = true)]
    pub threshold: Option<f64>,

    /// Metric weights, e.g. levenshtein=0.4,token_set=0.6
    #[arg(long = "weights", global = true, value_parser = parse_weights::<Metric>)]
    pub weights: Option<BTreeMap<Metric, f64>>,

    /// Approach weights, e.g. original=0.3,stemmed=0.7
    #[arg(long = "approach-weights", global = true, value_parser = parse_weights::<Approach>)]
    pub approach_weights: Option<BTreeMap<Approach, f64>>,

    /// Do not expand abbreviations such as "спб" or "хмао"
    #[arg(long = "no-abbreviations", global = true)]
    pub no_abbreviations: bool,

    /// More log output (-v debug, -vv trace). RUST_LOG overrides this
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the best catalog entry for each text
    Match {
        /// Raw region names
        #[arg(required = true)]
        texts: Vec<String>,

        /// Print the N best entries per text instead of the single match
        #[arg(long = "top")]
        top: Option<usize>,

        /// Print the per-approach, per-metric score breakdown of the match
        #[arg(long = "explain")]
        explain: bool,
    },

    /// Print the normalized forms of each text
    Normalize {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Match a column of a CSV file and append the results
    Table {
        /// Input CSV file (header row required)
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Column holding the raw region names
        #[arg(long = "column")]
        column: String,

        /// Output CSV file. Defaults to stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Comma-separated catalog attributes to attach, e.g. name_eng,okato
        #[arg(long = "attach", value_delimiter = ',')]
        attach: Vec<String>,

        /// Name of the appended match column
        #[arg(long = "match-column", default_value = "ter")]
        match_column: String,

        /// Name of the appended score column
        #[arg(long = "score-column", default_value = "levenshtein_score")]
        score_column: String,
    },

    /// Show a summary of the catalog contents
    Stats,
}

/// Parses `key=weight,key=weight`.
pub fn parse_weights<K>(s: &str) -> Result<BTreeMap<K, f64>, String>
where
    K: FromStr<Err = String> + Ord,
{
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, weight) = part
                .split_once('=')
                .ok_or_else(|| format!("expected key=weight, got '{part}'"))?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|e| format!("bad weight in '{part}': {e}"))?;
            Ok((key.parse()?, weight))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metric_weights() {
        let w = parse_weights::<Metric>("levenshtein=0.4, token_set=0.6").unwrap();
        assert_eq!(w[&Metric::Levenshtein], 0.4);
        assert_eq!(w[&Metric::TokenSet], 0.6);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_numbers() {
        assert!(parse_weights::<Metric>("soundex=1").is_err());
        assert!(parse_weights::<Approach>("stemmed=lots").is_err());
        assert!(parse_weights::<Approach>("stemmed").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
