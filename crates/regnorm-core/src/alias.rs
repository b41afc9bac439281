// crates/regnorm-core/src/alias.rs

//! Abbreviations and official long forms that should be read as a full
//! region name before matching (`спб`, `хмао`, `цфо`, ...).
//!
//! Lookups are whole-string: the cleaned input must equal a key exactly.

use crate::text::clean;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const BUILTIN: &[(&str, &str)] = &[
    ("хмао", "Ханты-Мансийский автономный округ — Югра"),
    ("хм ао", "Ханты-Мансийский автономный округ — Югра"),
    ("хмао югра", "Ханты-Мансийский автономный округ — Югра"),
    ("янао", "Ямало-Ненецкий автономный округ"),
    ("я н ао", "Ямало-Ненецкий автономный округ"),
    ("нао", "Ненецкий автономный округ"),
    ("н а о", "Ненецкий автономный округ"),
    ("чао", "Чукотский автономный округ"),
    ("еао", "Еврейская автономная область"),
    ("мо", "Московская область"),
    ("мск", "Москва"),
    ("спб", "Санкт-Петербург"),
    ("питер", "Санкт-Петербург"),
    ("ло", "Ленинградская область"),
    ("свердл", "Свердловская область"),
    ("рт", "Республика Татарстан"),
    ("рб", "Республика Башкортостан"),
    ("кбр", "Кабардино-Балкарская Республика"),
    ("кчр", "Карачаево-Черкесская Республика"),
    ("рсо", "Республика Северная Осетия — Алания"),
    ("рсо алания", "Республика Северная Осетия — Алания"),
    ("днр", "Донецкая Народная Республика"),
    ("лнр", "Луганская Народная Республика"),
    ("цфо", "Центральный федеральный округ"),
    ("сзфо", "Северо-Западный федеральный округ"),
    ("юфо", "Южный федеральный округ"),
    ("скфо", "Северо-Кавказский федеральный округ"),
    ("пфо", "Приволжский федеральный округ"),
    ("уфо", "Уральский федеральный округ"),
    ("сфо", "Сибирский федеральный округ"),
    ("двфо", "Дальневосточный федеральный округ"),
    ("рф", "Российская Федерация"),
    ("россия", "Российская Федерация"),
    ("россии", "Российская Федерация"),
    (
        "город москва столица российской федерации город федерального значения",
        "Москва",
    ),
    ("город санкт петербург город федерального значения", "Санкт-Петербург"),
    ("город федерального значения севастополь", "Севастополь"),
    (
        "тюменская область (кроме ханты-мансийского автономного округа-югры и ямало-ненецкого автономного округа)",
        "Тюменская область",
    ),
    ("ненецкий автономный округ (архангельская область)", "Ненецкий автономный округ"),
    ("архангельская область (кроме ненецкого автономного округа)", "Архангельская область"),
    (
        "ямало-ненецкий автономный округ (тюменская область)",
        "Ямало-Ненецкий автономный округ",
    ),
    (
        "ханты-мансийский автономный округ - югра (тюменская область)",
        "Ханты-Мансийский автономный округ — Югра",
    ),
    ("республика татарстан (татарстан)", "Республика Татарстан"),
    ("республика адыгея (адыгея)", "Республика Адыгея"),
];

static DEFAULT_TABLE: Lazy<Abbreviations> =
    Lazy::new(|| Abbreviations::from_pairs(builtin_pairs()));

/// The built-in `(abbreviation, full name)` pairs, uncleaned.
pub fn builtin_pairs() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILTIN.iter().copied()
}

/// Abbreviation -> full name table, keyed by cleaned abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abbreviations {
    map: HashMap<String, String>,
}

impl Abbreviations {
    /// A table that expands nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table of Russian region abbreviations.
    pub fn builtin() -> &'static Abbreviations {
        &DEFAULT_TABLE
    }

    /// Builds a table from `(abbreviation, full name)` pairs.
    ///
    /// Keys are cleaned, so `"С.-Пб."` and `"с пб"` are the same key. Keys that
    /// clean to an empty string are skipped. A later pair wins over an
    /// earlier pair with the same key.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .filter_map(|(k, v)| {
                let key = clean(k.as_ref());
                (!key.is_empty()).then(|| (key, v.into()))
            })
            .collect();
        Self { map }
    }

    /// Adds or replaces one abbreviation.
    pub fn with(mut self, abbreviation: &str, full_name: impl Into<String>) -> Self {
        let key = clean(abbreviation);
        if !key.is_empty() {
            self.map.insert(key, full_name.into());
        }
        self
    }

    /// Full name for an already cleaned input, if it is a known abbreviation.
    pub fn expand(&self, cleaned: &str) -> Option<&str> {
        self.map.get(cleaned).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keys_are_cleaned() {
        let table = Abbreviations::builtin();
        assert_eq!(table.expand("спб"), Some("Санкт-Петербург"));
        assert_eq!(
            table.expand(&clean("Республика Татарстан (Татарстан)")),
            Some("Республика Татарстан")
        );
        assert_eq!(
            table.expand(&clean("Ханты-Мансийский автономный округ - Югра (Тюменская область)")),
            Some("Ханты-Мансийский автономный округ — Югра")
        );
    }

    #[test]
    fn lookup_is_whole_string() {
        let table = Abbreviations::builtin();
        assert_eq!(table.expand("спб город"), None);
        assert_eq!(table.expand("сп"), None);
    }

    #[test]
    fn punctuation_in_custom_keys_is_ignored() {
        let table = Abbreviations::from_pairs([("С.-Пб.", "Санкт-Петербург")]);
        assert_eq!(table.expand(&clean("с пб")), Some("Санкт-Петербург"));
    }

    #[test]
    fn later_pairs_override_earlier_ones() {
        let table = Abbreviations::empty().with("мо", "Московская область").with("МО", "Москва");
        assert_eq!(table.len(), 1);
        assert_eq!(table.expand("мо"), Some("Москва"));
    }

    #[test]
    fn empty_keys_are_skipped() {
        let table = Abbreviations::from_pairs([("...", "Москва"), ("  ", "Москва")]);
        assert!(table.is_empty());
    }
}
