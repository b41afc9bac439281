// crates/regnorm-core/src/model.rs
use crate::common::CatalogStats;
use crate::error::{RegionError, Result};
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A canonical region record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Authoritative display form, e.g. `Московская область`.
    pub canonical_name: String,
    /// Extra match candidates (historical names, abbreviations, administrative
    /// variants). Never displayed.
    pub alternate_names: Vec<String>,
    /// Attribute key -> value (`name_eng`, `okato`, `iso_code`, ...).
    pub attributes: BTreeMap<String, String>,
}

impl CatalogEntry {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            alternate_names: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_alternate(mut self, alternate: impl Into<String>) -> Self {
        self.alternate_names.push(alternate.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.canonical_name
    }

    pub fn alternate_names(&self) -> &[String] {
        &self.alternate_names
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Canonical name followed by every alternate, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_name.as_str())
            .chain(self.alternate_names.iter().map(String::as_str))
    }
}

impl NameMatch for CatalogEntry {
    fn name_str(&self) -> &str {
        &self.canonical_name
    }

    fn alias_strs(&self) -> &[String] {
        &self.alternate_names
    }
}

/// The reference catalog: an ordered, immutable set of [`CatalogEntry`] values.
///
/// Iteration order is insertion order. The matcher breaks score ties in
/// favour of the entry that comes first in this order, so the order is part
/// of the catalog's contract.
///
/// Construct it once (see [`Catalog::new`], [`Catalog::load`] or the loaders)
/// and share it by reference; nothing mutates a catalog after construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "Vec<CatalogEntry>", try_from = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate canonical names.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.canonical_name.clone(), idx).is_some() {
                return Err(RegionError::InvalidData(format!(
                    "duplicate canonical name '{}'",
                    entry.canonical_name
                )));
            }
        }
        Ok(Self { entries, by_name })
    }

    /// A catalog with no entries. Every query against it yields no match.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by canonical name.
    pub fn get(&self, canonical_name: &str) -> Option<&CatalogEntry> {
        self.by_name
            .get(canonical_name)
            .map(|&idx| &self.entries[idx])
    }

    /// Fold-insensitive lookup over canonical and alternate names.
    ///
    /// Returns the first entry (in catalog order) whose canonical name or one
    /// of whose alternates equals `query` after normalization.
    pub fn find_by_name(&self, query: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.is_named(query))
    }

    /// Every attribute key carried by at least one entry.
    pub fn attribute_keys(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.attributes.keys().map(String::as_str))
            .collect()
    }

    /// `true` when at least one entry carries `key`.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.attributes.contains_key(key))
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            entries: self.entries.len(),
            alternate_names: self.entries.iter().map(|e| e.alternate_names.len()).sum(),
            attribute_keys: self.attribute_keys().len(),
        }
    }
}

impl TryFrom<Vec<CatalogEntry>> for Catalog {
    type Error = RegionError;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("Московская область")
                .with_alternate("московская обл.")
                .with_attribute("okato", "46"),
            CatalogEntry::new("Санкт-Петербург")
                .with_alternate("спб")
                .with_attribute("name_eng", "Saint Petersburg"),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_canonical_names() {
        let err = Catalog::new(vec![CatalogEntry::new("Москва"), CatalogEntry::new("Москва")])
            .unwrap_err();
        assert!(matches!(err, RegionError::InvalidData(_)));
    }

    #[test]
    fn keeps_insertion_order() {
        let catalog = sample();
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Московская область", "Санкт-Петербург"]);
    }

    #[test]
    fn get_is_exact() {
        let catalog = sample();
        assert!(catalog.get("Санкт-Петербург").is_some());
        assert!(catalog.get("санкт-петербург").is_none());
    }

    #[test]
    fn find_by_name_folds_case_and_punctuation() {
        let catalog = sample();
        let hit = catalog.find_by_name("САНКТ ПЕТЕРБУРГ").unwrap();
        assert_eq!(hit.name(), "Санкт-Петербург");
        let alt = catalog.find_by_name("Московская обл").unwrap();
        assert_eq!(alt.name(), "Московская область");
    }

    #[test]
    fn attribute_keys_are_collected_across_entries() {
        let catalog = sample();
        let keys: Vec<&str> = catalog.attribute_keys().into_iter().collect();
        assert_eq!(keys, vec!["name_eng", "okato"]);
        assert!(catalog.has_attribute("okato"));
        assert!(!catalog.has_attribute("iso_code"));
    }

    #[test]
    fn stats_count_alternates() {
        let stats = sample().stats();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.alternate_names, 2);
        assert_eq!(stats.attribute_keys, 2);
    }

    #[test]
    fn names_lists_canonical_first() {
        let entry = CatalogEntry::new("A").with_alternate("B").with_alternate("C");
        assert_eq!(entry.names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }
}
