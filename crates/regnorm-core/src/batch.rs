// crates/regnorm-core/src/batch.rs

//! # Batch Matcher and Field Attacher
//!
//! Table-level wrappers around [`RegionMatcher::find_best_match`].
//!
//! - [`RegionMatcher::match_table`] appends a match column and a score column.
//!   Each distinct value is scored once and the result is mapped back to every
//!   row carrying it; with the `parallel` feature distinct values are scored on
//!   rayon workers. Row order never changes.
//! - [`attach_field`] / [`attach_fields`] copy catalog attributes next to an
//!   existing match column.

use crate::error::{RegionError, Result};
use crate::model::Catalog;
use crate::scoring::WeightConfig;
use crate::search::{MatchResult, RegionMatcher};
use crate::table::Cell;
use crate::traits::Tabular;
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Column names used when batch matching appends its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Winning canonical name, or missing. Defaults to `ter`.
    pub match_column: String,
    /// Best observed score, also for rejected rows. Defaults to `levenshtein_score`.
    pub score_column: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            match_column: "ter".to_string(),
            score_column: "levenshtein_score".to_string(),
        }
    }
}

impl BatchOptions {
    pub fn with_match_column(mut self, name: impl Into<String>) -> Self {
        self.match_column = name.into();
        self
    }

    pub fn with_score_column(mut self, name: impl Into<String>) -> Self {
        self.score_column = name.into();
        self
    }
}

impl<'a> RegionMatcher<'a> {
    /// Matches every value, returning one result per input in input order.
    ///
    /// `None` values yield `(none, 0)`. Equal values are scored once.
    pub fn match_values(
        &self,
        values: &[Option<String>],
        weights: &WeightConfig,
        threshold: f64,
    ) -> Vec<MatchResult> {
        // distinct values in first-seen order
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        let mut distinct: Vec<&str> = Vec::new();
        let slots: Vec<Option<usize>> = values
            .iter()
            .map(|value| {
                value.as_deref().map(|v| {
                    *slot_of.entry(v).or_insert_with(|| {
                        distinct.push(v);
                        distinct.len() - 1
                    })
                })
            })
            .collect();

        debug!(rows = values.len(), distinct = distinct.len(), threshold, "batch match");

        #[cfg(feature = "parallel")]
        let results: Vec<MatchResult> = distinct
            .par_iter()
            .map(|v| self.find_best_match(v, weights, threshold))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<MatchResult> = distinct
            .iter()
            .map(|v| self.find_best_match(v, weights, threshold))
            .collect();

        slots
            .into_iter()
            .map(|slot| slot.map_or_else(MatchResult::no_match, |i| results[i].clone()))
            .collect()
    }

    /// Matches `column` of `table` and appends `ter` / `levenshtein_score`.
    ///
    /// Fails only when `column` does not exist.
    pub fn match_table<T: Tabular>(
        &self,
        table: T,
        column: &str,
        weights: &WeightConfig,
        threshold: f64,
    ) -> Result<T> {
        self.match_table_with(table, column, weights, threshold, &BatchOptions::default())
    }

    /// [`match_table`](Self::match_table) with custom output column names.
    pub fn match_table_with<T: Tabular>(
        &self,
        table: T,
        column: &str,
        weights: &WeightConfig,
        threshold: f64,
        options: &BatchOptions,
    ) -> Result<T> {
        let values = table.text_column(column)?;
        let results = self.match_values(&values, weights, threshold);

        let matched = results.iter().filter(|r| r.is_match()).count();
        debug!(
            column,
            rows = table.row_count(),
            matched,
            unmatched = results.len() - matched,
            "batch match finished"
        );

        let (names, scores): (Vec<Cell>, Vec<Cell>) = results
            .into_iter()
            .map(|r| (Cell::from(r.candidate), Cell::Number(r.score)))
            .unzip();

        table
            .with_column(&options.match_column, names)?
            .with_column(&options.score_column, scores)
    }

    /// [`attach_field`] against this matcher's catalog.
    pub fn attach_field<T: Tabular>(&self, table: T, match_column: &str, field: &str) -> Result<T> {
        attach_field(table, self.catalog(), match_column, field)
    }

    /// [`attach_fields`] against this matcher's catalog.
    pub fn attach_fields<T: Tabular>(&self, table: T, match_column: &str, fields: &[&str]) -> Result<T> {
        attach_fields(table, self.catalog(), match_column, fields)
    }
}

/// Matches `column` against `catalog` with a one-off [`RegionMatcher`].
pub fn match_table<T: Tabular>(
    table: T,
    column: &str,
    catalog: &Catalog,
    weights: &WeightConfig,
    threshold: f64,
) -> Result<T> {
    RegionMatcher::new(catalog).match_table(table, column, weights, threshold)
}

/// Appends a column named `field` holding `attributes[field]` of the entry
/// named in `match_column`.
///
/// Rows whose match is missing, or whose entry lacks `field`, get
/// [`Cell::Missing`]. Errors with [`RegionError::UnknownField`] when no entry
/// in the catalog carries `field` at all.
pub fn attach_field<T: Tabular>(table: T, catalog: &Catalog, match_column: &str, field: &str) -> Result<T> {
    attach_fields(table, catalog, match_column, &[field])
}

/// Like [`attach_field`] for several fields at once. Every field is checked
/// before any column is added, and each row's entry is looked up once.
pub fn attach_fields<T: Tabular>(
    table: T,
    catalog: &Catalog,
    match_column: &str,
    fields: &[&str],
) -> Result<T> {
    if let Some(unknown) = fields.iter().find(|f| !catalog.has_attribute(f)) {
        return Err(RegionError::UnknownField(unknown.to_string()));
    }
    let matches = table.text_column(match_column)?;

    let entries: Vec<_> = matches
        .iter()
        .map(|name| name.as_deref().and_then(|n| catalog.get(n)))
        .collect();

    let mut table = table;
    for field in fields {
        let column: Vec<Cell> = entries
            .iter()
            .map(|entry| Cell::from(entry.and_then(|e| e.attribute(field))))
            .collect();
        table = table.with_column(field, column)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogEntry;
    use crate::table::Table;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("Московская область")
                .with_attribute("okato", "46")
                .with_attribute("name_eng", "Moscow Oblast"),
            CatalogEntry::new("Санкт-Петербург").with_alternate("спб").with_attribute("okato", "40"),
            CatalogEntry::new("Свердловская область").with_attribute("okato", "65"),
        ])
        .unwrap()
    }

    #[test]
    fn appends_default_columns_in_row_order() {
        let catalog = catalog();
        let table = Table::from_column("region", [Some("спб"), None, Some("московск обл"), Some("спб")]);
        let out = match_table(table, "region", &catalog, &WeightConfig::default(), 65.0).unwrap();

        assert_eq!(out.columns(), ["region", "ter", "levenshtein_score"]);
        assert_eq!(out.cell(0, "ter"), Some(&Cell::from("Санкт-Петербург")));
        assert_eq!(out.cell(1, "ter"), Some(&Cell::Missing));
        assert_eq!(out.cell(1, "levenshtein_score"), Some(&Cell::Number(0.0)));
        assert_eq!(out.cell(2, "ter"), Some(&Cell::from("Московская область")));
        assert_eq!(out.cell(3, "ter"), out.cell(0, "ter"));
    }

    #[test]
    fn rejected_rows_keep_their_score() {
        let catalog = catalog();
        let table = Table::from_column("region", ["свердловск"]);
        let out = match_table(table, "region", &catalog, &WeightConfig::default(), 99.5).unwrap();
        assert_eq!(out.cell(0, "ter"), Some(&Cell::Missing));
        let score = out.cell(0, "levenshtein_score").and_then(Cell::as_number).unwrap();
        assert!(score > 0.0 && score < 99.5);
    }

    #[test]
    fn custom_column_names() {
        let catalog = catalog();
        let matcher = RegionMatcher::new(&catalog);
        let options = BatchOptions::default().with_match_column("region_std").with_score_column("score");
        let out = matcher
            .match_table_with(Table::from_column("r", ["спб"]), "r", &WeightConfig::default(), 65.0, &options)
            .unwrap();
        assert_eq!(out.columns(), ["r", "region_std", "score"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let catalog = catalog();
        let err = match_table(Table::from_column("r", ["спб"]), "region", &catalog, &WeightConfig::default(), 65.0)
            .unwrap_err();
        assert!(matches!(err, RegionError::ColumnNotFound(c) if c == "region"));
    }

    #[test]
    fn attach_field_marks_missing_attributes() {
        let catalog = catalog();
        let table = Table::from_column("ter", [Some("Московская область"), Some("Санкт-Петербург"), None]);
        let out = attach_field(table, &catalog, "ter", "name_eng").unwrap();
        assert_eq!(out.cell(0, "name_eng"), Some(&Cell::from("Moscow Oblast")));
        assert_eq!(out.cell(1, "name_eng"), Some(&Cell::Missing));
        assert_eq!(out.cell(2, "name_eng"), Some(&Cell::Missing));
    }

    #[test]
    fn unknown_field_fails_before_touching_the_table() {
        let catalog = catalog();
        let table = Table::from_column("ter", ["Московская область"]);
        let err = attach_fields(table, &catalog, "ter", &["okato", "okatto"]).unwrap_err();
        assert!(matches!(err, RegionError::UnknownField(f) if f == "okatto"));
    }

    #[test]
    fn attach_fields_adds_each_field() {
        let catalog = catalog();
        let matcher = RegionMatcher::new(&catalog);
        let table = matcher
            .match_table(Table::from_column("region", ["спб", "свердловская обл"]), "region", &WeightConfig::default(), 65.0)
            .unwrap();
        let out = matcher.attach_fields(table, "ter", &["okato", "name_eng"]).unwrap();
        assert_eq!(out.cell(0, "okato"), Some(&Cell::from("40")));
        assert_eq!(out.cell(1, "okato"), Some(&Cell::from("65")));
        assert_eq!(out.cell(1, "name_eng"), Some(&Cell::Missing));
    }

    #[test]
    fn match_values_is_independent_of_duplicates() {
        let catalog = catalog();
        let matcher = RegionMatcher::new(&catalog);
        let w = WeightConfig::default();
        let single = matcher.match_values(&[Some("московск обл".into())], &w, 65.0);
        let many = matcher.match_values(
            &[Some("спб".into()), Some("московск обл".into()), Some("московск обл".into())],
            &w,
            65.0,
        );
        assert_eq!(many[1], single[0]);
        assert_eq!(many[2], single[0]);
    }
}
