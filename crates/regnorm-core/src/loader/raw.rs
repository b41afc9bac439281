// crates/regnorm-core/src/loader/raw.rs

//! Source-document shapes accepted by the JSON and YAML loaders.
//!
//! Two layouts are understood:
//!
//! ```yaml
//! regions:                      # ordered list
//!   - name: Московская область
//!     alternate_names: [московская обл]
//!     okato: "46"
//! ```
//!
//! ```yaml
//! dict:                         # keyed records, the reference sheet layout
//!   1: { name_rus: Алтайский край, name_eng: Altai Krai, okato: "01" }
//! ```
//!
//! A bare list of records is accepted as well. Scalar attribute values of any
//! type are kept as strings; `null` means the attribute is absent.

use crate::error::{RegionError, Result};
use crate::model::{Catalog, CatalogEntry};
use serde::Deserialize;
use std::collections::BTreeMap;

const NAME_KEYS: &[&str] = &["name", "name_rus"];
const ALTERNATE_KEYS: &[&str] = &["alternate_names", "aliases"];

/// Any value a record field may hold.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    fn into_scalar(self) -> Option<String> {
        match self {
            RawValue::Null | RawValue::List(_) | RawValue::Map(_) => None,
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Int(i) => Some(i.to_string()),
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Text(s) => Some(s),
        }
    }
}

/// Record key in a keyed document (YAML allows integer keys).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
pub enum RawKey {
    Int(i64),
    Text(String),
}

impl RawKey {
    /// Numeric keys (including numeric strings) first, in numeric order,
    /// then the rest lexicographically.
    fn order(&self) -> (u8, i64, &str) {
        match self {
            RawKey::Int(i) => (0, *i, ""),
            RawKey::Text(s) => match s.trim().parse::<i64>() {
                Ok(i) => (0, i, s),
                Err(_) => (1, 0, s),
            },
        }
    }
}

pub type RegionRaw = BTreeMap<String, RawValue>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogRaw {
    Regions { regions: Vec<RegionRaw> },
    Dict { dict: BTreeMap<RawKey, RegionRaw> },
    List(Vec<RegionRaw>),
}

impl CatalogRaw {
    pub fn into_catalog(self) -> Result<Catalog> {
        let records: Vec<RegionRaw> = match self {
            CatalogRaw::Regions { regions } | CatalogRaw::List(regions) => regions,
            CatalogRaw::Dict { dict } => {
                let mut keyed: Vec<(RawKey, RegionRaw)> = dict.into_iter().collect();
                keyed.sort_by(|(a, _), (b, _)| a.order().cmp(&b.order()));
                keyed.into_iter().map(|(_, record)| record).collect()
            }
        };
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| entry_from_raw(idx, record))
            .collect::<Result<Vec<_>>>()?;
        Catalog::new(entries)
    }
}

fn take_first(record: &mut RegionRaw, keys: &[&str]) -> Option<RawValue> {
    keys.iter().find_map(|k| record.remove(*k))
}

fn entry_from_raw(idx: usize, mut record: RegionRaw) -> Result<CatalogEntry> {
    let name = match take_first(&mut record, NAME_KEYS) {
        Some(RawValue::Text(name)) if !name.trim().is_empty() => name,
        _ => {
            return Err(RegionError::InvalidData(format!(
                "record #{idx} has no 'name' (or 'name_rus') string"
            )))
        }
    };
    // the other name key may still be present; keep it as an attribute
    let mut entry = CatalogEntry::new(name);

    match take_first(&mut record, ALTERNATE_KEYS) {
        None | Some(RawValue::Null) => {}
        Some(RawValue::List(items)) => {
            for item in items {
                if let Some(alt) = item.into_scalar().filter(|s| !s.trim().is_empty()) {
                    entry = entry.with_alternate(alt);
                }
            }
        }
        Some(RawValue::Text(single)) => entry = entry.with_alternate(single),
        Some(other) => {
            return Err(RegionError::InvalidData(format!(
                "record '{}': alternate names must be a list of strings, got {other:?}",
                entry.name()
            )))
        }
    }

    for (key, value) in record {
        if let Some(value) = value.into_scalar() {
            entry = entry.with_attribute(key, value);
        }
    }
    Ok(entry)
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Catalog> {
        serde_json::from_str::<CatalogRaw>(json)?.into_catalog()
    }

    #[test]
    fn reads_region_list() {
        let catalog = parse(
            r#"{"regions": [
                {"name": "Москва", "alternate_names": ["мск", "г. Москва"], "okato": "45"},
                {"name": "Санкт-Петербург", "okato": 40, "note": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        let moscow = catalog.get("Москва").unwrap();
        assert_eq!(moscow.alternate_names(), ["мск", "г. Москва"]);
        assert_eq!(moscow.attribute("okato"), Some("45"));
        let spb = catalog.get("Санкт-Петербург").unwrap();
        assert_eq!(spb.attribute("okato"), Some("40"));
        assert_eq!(spb.attribute("note"), None);
    }

    #[test]
    fn reads_keyed_dict_in_numeric_key_order() {
        let catalog = parse(
            r#"{"dict": {
                "10": {"name_rus": "Десятый"},
                "2": {"name_rus": "Второй", "name_eng": "Second"},
                "1": {"name_rus": "Первый"}
            }}"#,
        )
        .unwrap();
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["Первый", "Второй", "Десятый"]);
        assert_eq!(catalog.get("Второй").unwrap().attribute("name_eng"), Some("Second"));
    }

    #[test]
    fn reads_bare_list() {
        let catalog = parse(r#"[{"name": "A"}, {"name": "B", "aliases": "b"}]"#).unwrap();
        assert_eq!(catalog.get("B").unwrap().alternate_names(), ["b"]);
    }

    #[test]
    fn missing_name_is_invalid() {
        let err = parse(r#"{"regions": [{"okato": "1"}]}"#).unwrap_err();
        assert!(matches!(err, RegionError::InvalidData(_)));
    }

    #[test]
    fn duplicate_names_are_invalid() {
        assert!(parse(r#"[{"name": "A"}, {"name": "A"}]"#).is_err());
    }
}
