// crates/regnorm-core/src/similarity.rs

//! # Similarity Engine
//!
//! A closed registry of string similarity metrics. Every metric is a pure
//! `(a, b) -> [0, 100]` function and is symmetric in its arguments.
//! Adding a metric means adding a [`Metric`] variant and its registry arm;
//! the scorer iterates whatever the registry holds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Signature every registered metric implements.
pub type ScoreFn = fn(&str, &str) -> f64;

/// A registered similarity metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Normalized inverse Levenshtein distance. Catches character typos.
    Levenshtein,
    /// Token-set ratio. Catches reordering, dropped or extra qualifier words,
    /// and one token set containing the other.
    TokenSet,
    /// Edit ratio over alphabetically sorted tokens.
    TokenSort,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Levenshtein, Metric::TokenSet, Metric::TokenSort];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Levenshtein => "levenshtein",
            Metric::TokenSet => "token_set",
            Metric::TokenSort => "token_sort",
        }
    }

    /// The registry: metric -> scoring function.
    pub fn scorer(self) -> ScoreFn {
        match self {
            Metric::Levenshtein => levenshtein_ratio,
            Metric::TokenSet => token_set_ratio,
            Metric::TokenSort => token_sort_ratio,
        }
    }

    /// Scores `a` against `b` in `[0, 100]`.
    ///
    /// An empty string on either side scores 0.
    pub fn score(self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        (self.scorer())(a, b).clamp(0.0, 100.0)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
                format!("unknown metric '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// `100 * (1 - levenshtein(a, b) / max(len a, len b))`, counted in chars.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Token-set ratio.
///
/// With `I` the sorted intersection of both token sets and `Da`, `Db` the
/// sorted leftovers of each side, compares `I` against `I + Da`, `I` against
/// `I + Db`, and `I + Da` against `I + Db`, keeping the best edit ratio.
/// If every token of one side also appears on the other side the result is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let shared = join(ta.intersection(&tb));
    let with_a = join_parts(&shared, &join(ta.difference(&tb)));
    let with_b = join_parts(&shared, &join(tb.difference(&ta)));

    [
        levenshtein_ratio(&shared, &with_a),
        levenshtein_ratio(&shared, &with_b),
        levenshtein_ratio(&with_a, &with_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Edit ratio after sorting each side's tokens alphabetically.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    levenshtein_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn join_parts(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}
