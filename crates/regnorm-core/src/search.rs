// crates/regnorm-core/src/search.rs

//! # Best-Match Selector
//!
//! [`RegionMatcher`] scores one input against every catalog entry and keeps
//! the best one. An entry's score is the best score over its canonical name
//! and all of its alternates.
//!
//! Ties are broken by catalog order: an entry only replaces the current best
//! when it scores strictly higher, so the first entry reaching the maximum
//! wins. Inside one entry the canonical name is tried first, then the
//! alternates in declaration order, with the same strict rule.
//!
//! An input that is a known abbreviation is scored twice, as typed and as
//! its expansion, and each entry keeps the better score.

use crate::alias::Abbreviations;
use crate::model::{Catalog, CatalogEntry};
use crate::scoring::{score_breakdown, score_candidate, ScoreBreakdown, WeightConfig};
use crate::text::{clean, NormalizedName};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Threshold used when the caller has no opinion (the reference tool's default).
pub const DEFAULT_THRESHOLD: f64 = 65.0;

/// Outcome of one query.
///
/// `candidate` is `None` when nothing clears the threshold; `score` is still
/// the best score observed so near misses can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate: Option<String>,
    pub score: f64,
}

impl MatchResult {
    /// `(none, 0)`.
    pub fn no_match() -> Self {
        Self {
            candidate: None,
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }

    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }
}

/// One ranked entry returned by [`RegionMatcher::top_matches`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a CatalogEntry,
    /// The canonical or alternate name that produced `score`.
    pub matched_name: &'a str,
    pub score: f64,
}

/// A query ready for scoring.
///
/// The input is scored as typed and, when it is a known abbreviation, as its
/// expansion; each entry keeps the better of the two. A catalog that lists the
/// abbreviation itself as a name still gets its verbatim match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreparedInput {
    pub typed: NormalizedName,
    pub expanded: Option<NormalizedName>,
}

impl PreparedInput {
    /// The typed form first, then the expansion if there is one.
    pub fn variants(&self) -> impl Iterator<Item = &NormalizedName> {
        std::iter::once(&self.typed).chain(self.expanded.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.typed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EntryScore {
    score: f64,
    form_idx: usize,
    variant: usize,
}

/// Matcher bound to one catalog.
///
/// Construction normalizes every canonical and alternate name once; queries
/// then only normalize their own input. The matcher borrows the catalog and
/// never changes it, so one matcher can serve any number of threads.
///
/// # Examples
///
/// ```rust
/// use regnorm_core::{Catalog, CatalogEntry, RegionMatcher, WeightConfig};
///
/// let catalog = Catalog::new(vec![
///     CatalogEntry::new("Московская область").with_alternate("московская обл."),
///     CatalogEntry::new("Санкт-Петербург").with_alternate("спб"),
/// ])
/// .unwrap();
///
/// let matcher = RegionMatcher::new(&catalog);
/// let hit = matcher.find_best_match("московск область", &WeightConfig::default(), 65.0);
/// assert_eq!(hit.candidate(), Some("Московская область"));
/// assert!(hit.score >= 70.0);
/// ```
#[derive(Debug, Clone)]
pub struct RegionMatcher<'a> {
    catalog: &'a Catalog,
    /// Per entry, in catalog order: canonical form first, then alternates.
    prepared: Vec<Vec<NormalizedName>>,
    abbreviations: Cow<'a, Abbreviations>,
}

impl<'a> RegionMatcher<'a> {
    /// Matcher with the built-in abbreviation table.
    pub fn new(catalog: &'a Catalog) -> Self {
        let prepared = catalog
            .entries()
            .iter()
            .map(|entry| entry.names().map(crate::text::normalize).collect())
            .collect();
        Self {
            catalog,
            prepared,
            abbreviations: Cow::Borrowed(Abbreviations::builtin()),
        }
    }

    /// Replaces the abbreviation table.
    pub fn with_abbreviations(mut self, abbreviations: Abbreviations) -> Self {
        self.abbreviations = Cow::Owned(abbreviations);
        self
    }

    /// Disables abbreviation expansion.
    pub fn without_abbreviations(self) -> Self {
        self.with_abbreviations(Abbreviations::empty())
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn abbreviations(&self) -> &Abbreviations {
        &self.abbreviations
    }

    /// Normalizes a query: the cleaned input as typed, plus its expansion
    /// when the whole cleaned input is a known abbreviation.
    pub fn prepare_input(&self, raw: &str) -> PreparedInput {
        let cleaned = clean(raw);
        let expanded = self
            .abbreviations
            .expand(&cleaned)
            .map(clean)
            .filter(|full| !full.is_empty() && *full != cleaned)
            .map(NormalizedName::from_cleaned);
        PreparedInput {
            typed: NormalizedName::from_cleaned(cleaned),
            expanded,
        }
    }

    /// Best score of entry `idx` over every query variant and every name of
    /// the entry, with the name index that produced it.
    fn entry_score(&self, input: &PreparedInput, idx: usize, weights: &WeightConfig) -> EntryScore {
        let mut best = EntryScore::default();
        for (variant, query) in input.variants().enumerate() {
            for (form_idx, form) in self.prepared[idx].iter().enumerate() {
                let score = score_candidate(query, form, weights);
                if score > best.score {
                    best = EntryScore {
                        score,
                        form_idx,
                        variant,
                    };
                }
            }
        }
        best
    }

    /// Best entry index and its score, or `None` if nothing scored above 0.
    fn best_entry(&self, input: &PreparedInput, weights: &WeightConfig) -> Option<(usize, f64)> {
        if input.is_empty() || !weights.is_effective() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for idx in 0..self.prepared.len() {
            let score = self.entry_score(input, idx, weights).score;
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((idx, score));
            }
        }
        best
    }

    /// Finds the catalog entry that best matches `raw`.
    ///
    /// Returns `(none, best_score)` when the best score is below `threshold`,
    /// and `(none, 0)` for empty input or an empty catalog.
    pub fn find_best_match(&self, raw: &str, weights: &WeightConfig, threshold: f64) -> MatchResult {
        let input = self.prepare_input(raw);
        self.match_prepared(raw, &input, weights, threshold)
    }

    pub(crate) fn match_prepared(
        &self,
        raw: &str,
        input: &PreparedInput,
        weights: &WeightConfig,
        threshold: f64,
    ) -> MatchResult {
        let Some((idx, score)) = self.best_entry(input, weights) else {
            debug!(input = raw, "no catalog entry scored above zero");
            return MatchResult::no_match();
        };
        let name = self.catalog.entries()[idx].name();

        if score < threshold {
            warn!(
                input = raw,
                best = name,
                score,
                threshold,
                "best match is below the threshold, check it manually"
            );
            return MatchResult {
                candidate: None,
                score,
            };
        }
        MatchResult {
            candidate: Some(name.to_string()),
            score,
        }
    }

    /// Every entry ranked by its best score, highest first, at most `limit`
    /// long. Entries with equal scores keep catalog order; entries scoring 0
    /// are left out.
    pub fn top_matches(&self, raw: &str, weights: &WeightConfig, limit: usize) -> Vec<ScoredCandidate<'a>> {
        let input = self.prepare_input(raw);
        if input.is_empty() {
            return Vec::new();
        }
        let entries = self.catalog.entries();
        let mut ranked: Vec<ScoredCandidate<'a>> = (0..entries.len())
            .filter_map(|idx| {
                let best = self.entry_score(&input, idx, weights);
                (best.score > 0.0).then(|| {
                    let entry = &entries[idx];
                    ScoredCandidate {
                        entry,
                        matched_name: entry.names().nth(best.form_idx).unwrap_or(entry.name()),
                        score: best.score,
                    }
                })
            })
            .collect();
        // stable: ties stay in catalog order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }

    /// How `raw` scores against the entry named `canonical_name`, using the
    /// entry's best-scoring name. `None` if the catalog has no such entry.
    pub fn explain(&self, raw: &str, canonical_name: &str, weights: &WeightConfig) -> Option<ScoreBreakdown> {
        let idx = self
            .catalog
            .entries()
            .iter()
            .position(|e| e.name() == canonical_name)?;
        let input = self.prepare_input(raw);
        let best = self.entry_score(&input, idx, weights);
        let query = input.variants().nth(best.variant).unwrap_or(&input.typed);
        Some(score_breakdown(query, &self.prepared[idx][best.form_idx], weights))
    }
}

/// One-shot form of [`RegionMatcher::find_best_match`].
///
/// Prepares the catalog on every call; keep a [`RegionMatcher`] around when
/// matching more than a handful of strings.
pub fn find_best_match(raw: &str, catalog: &Catalog, weights: &WeightConfig, threshold: f64) -> MatchResult {
    RegionMatcher::new(catalog).find_best_match(raw, weights, threshold)
}
