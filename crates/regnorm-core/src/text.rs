// crates/regnorm-core/src/text.rs

//! # Text Normalizer
//!
//! Turns a raw region mention into its comparison forms:
//!
//! - **original**: the cleaned string (see [`clean`]),
//! - **stemmed**: the cleaned string with every token reduced to its Russian
//!   Snowball stem, so `московская`, `московской` and `московск` meet.
//!
//! Everything here is a pure function of its input. Nothing depends on a
//! catalog or on an abbreviation table.

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static RUSSIAN_STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::Russian));

/// Trailing qualifiers used by statistical tables. The cleaned string is cut
/// at the first whole-word occurrence of each phrase.
///
/// Phrases are written in cleaned form (dates lose their dots, parentheses
/// are gone).
const QUALIFIERS: &[&str] = &[
    "в границах",
    "после",
    "без учета новых субъектов",
    "по 2009 год",
    "с 2010 года",
    "без ао",
    "с 29 07 2016",
    "с 03 11 2018",
    "с 01 01 2023",
];

/// Which normalization produced a comparison string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    Original,
    Stemmed,
}

impl Approach {
    pub const ALL: [Approach; 2] = [Approach::Original, Approach::Stemmed];

    pub fn name(self) -> &'static str {
        match self {
            Approach::Original => "original",
            Approach::Stemmed => "stemmed",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Approach {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Approach::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown approach '{s}' (expected original or stemmed)"))
    }
}

/// A normalized string tagged with the approach that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonForm<'a> {
    pub approach: Approach,
    pub text: &'a str,
}

/// Both comparison forms of one raw string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedName {
    pub original: String,
    pub stemmed: String,
}

impl NormalizedName {
    /// Builds the forms from an already cleaned string.
    pub fn from_cleaned(cleaned: String) -> Self {
        let stemmed = stem(&cleaned);
        Self {
            original: cleaned,
            stemmed,
        }
    }

    pub fn form(&self, approach: Approach) -> &str {
        match approach {
            Approach::Original => &self.original,
            Approach::Stemmed => &self.stemmed,
        }
    }

    pub fn forms(&self) -> impl Iterator<Item = ComparisonForm<'_>> {
        Approach::ALL.into_iter().map(move |approach| ComparisonForm {
            approach,
            text: self.form(approach),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

/// Normalizes `raw` into its `original` and `stemmed` forms.
///
/// # Examples
///
/// ```rust
/// use regnorm_core::text::normalize;
///
/// let n = normalize("Свердловской  области");
/// assert_eq!(n.original, "свердловской области");
/// assert_eq!(n.stemmed, normalize("Свердловская область").stemmed);
///
/// let empty = normalize("   ");
/// assert!(empty.original.is_empty() && empty.stemmed.is_empty());
/// ```
pub fn normalize(raw: &str) -> NormalizedName {
    NormalizedName::from_cleaned(clean(raw))
}

/// Cleans a raw string into the `original` comparison form.
///
/// Steps:
/// 1. lowercase; `ё` folds to `е`; letters outside Latin and Cyrillic are
///    transliterated to ASCII with `deunicode`;
/// 2. every character that is not a letter or digit becomes a space
///    (periods after abbreviations, quotes, dashes, parentheses);
/// 3. whitespace collapses to single spaces, ends are trimmed;
/// 4. per token: Latin letters mixed into a Cyrillic word, or a Latin word
///    made only of Cyrillic look-alikes (`MOCKBA`), are folded to the Cyrillic
///    letter they imitate; any other all-Latin word is transliterated;
/// 5. the string is cut at known trailing qualifiers (`в границах`, `без ао`, ...).
///
/// `clean(clean(s)) == clean(s)` for every `s`.
pub fn clean(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for ch in raw.chars() {
        fold_char(ch, &mut folded);
    }

    let cleaned = folded
        .split_whitespace()
        .map(fold_token)
        .collect::<Vec<_>>()
        .join(" ");

    strip_qualifiers(cleaned)
}

/// Reduces every whitespace-delimited token of a cleaned string to its stem.
pub fn stem(cleaned: &str) -> String {
    cleaned
        .split_whitespace()
        .map(|word| RUSSIAN_STEMMER.stem(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[inline]
fn is_cyrillic(ch: char) -> bool {
    matches!(ch, '\u{0400}'..='\u{052F}')
}

fn push_ascii_folded(ch: char, out: &mut String) {
    if ch.is_ascii_alphanumeric() {
        out.push(ch.to_ascii_lowercase());
    } else {
        out.push(' ');
    }
}

fn fold_char(ch: char, out: &mut String) {
    if ch == 'ё' || ch == 'Ё' {
        out.push('е');
    } else if ch.is_ascii() {
        push_ascii_folded(ch, out);
    } else if is_cyrillic(ch) {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(' ');
        }
    } else if ch.is_alphanumeric() {
        match deunicode::deunicode_char(ch) {
            Some(ascii) => ascii.chars().for_each(|c| push_ascii_folded(c, out)),
            None => out.push(' '),
        }
    } else {
        out.push(' ');
    }
}

/// Latin letters that look like a Cyrillic letter (in either case).
fn homoglyph(ch: char) -> Option<char> {
    let cyr = match ch {
        'a' => 'а',
        'b' => 'в',
        'c' => 'с',
        'e' => 'е',
        'h' => 'н',
        'k' => 'к',
        'm' => 'м',
        'o' => 'о',
        'p' => 'р',
        't' => 'т',
        'x' => 'х',
        'y' => 'у',
        _ => return None,
    };
    Some(cyr)
}

fn fold_token(token: &str) -> String {
    if !token.chars().any(|c| c.is_ascii_alphabetic()) {
        return token.to_string();
    }
    let has_cyrillic = token.chars().any(is_cyrillic);
    let only_lookalikes = token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .all(|c| homoglyph(c).is_some());

    if has_cyrillic || only_lookalikes {
        token.chars().map(|c| homoglyph(c).unwrap_or(c)).collect()
    } else {
        transliterate(token)
    }
}

const DIGRAPHS: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("zh", "ж"),
    ("kh", "х"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("ya", "я"),
    ("yu", "ю"),
    ("yo", "е"),
    ("ye", "е"),
    ("ja", "я"),
    ("ju", "ю"),
];

/// Latin -> Cyrillic transliteration of an all-ASCII token.
fn transliterate(token: &str) -> String {
    let bytes = token.as_bytes();
    let mut out = String::with_capacity(token.len() * 2);
    let mut i = 0;

    'outer: while i < bytes.len() {
        let rest = &token[i..];
        for (latin, cyr) in DIGRAPHS {
            if rest.starts_with(latin) {
                out.push_str(cyr);
                i += latin.len();
                continue 'outer;
            }
        }

        let c = bytes[i] as char;
        let after_vowel = i > 0 && b"aeiouy".contains(&bytes[i - 1]);
        let cyr = match c {
            'a' => "а",
            'b' => "б",
            'c' => "ц",
            'd' => "д",
            'e' => "е",
            'f' => "ф",
            'g' => "г",
            'h' => "х",
            'i' => "и",
            'j' => "й",
            'k' => "к",
            'l' => "л",
            'm' => "м",
            'n' => "н",
            'o' => "о",
            'p' => "п",
            'q' => "к",
            'r' => "р",
            's' => "с",
            't' => "т",
            'u' => "у",
            'v' | 'w' => "в",
            'x' => "кс",
            'y' if after_vowel => "й",
            'y' => "ы",
            'z' => "з",
            _ => {
                out.push(c);
                i += 1;
                continue;
            }
        };
        out.push_str(cyr);
        i += 1;
    }
    out
}

fn strip_qualifiers(mut s: String) -> String {
    for phrase in QUALIFIERS {
        if let Some(pos) = find_phrase(&s, phrase) {
            s.truncate(pos);
            let kept = s.trim_end().len();
            s.truncate(kept);
        }
    }
    s
}

/// Byte offset of the first whole-word occurrence of `phrase`.
fn find_phrase(haystack: &str, phrase: &str) -> Option<usize> {
    haystack.match_indices(phrase).map(|(i, _)| i).find(|&i| {
        let end = i + phrase.len();
        let starts_word = i == 0 || haystack[..i].ends_with(' ');
        let ends_word = end == haystack.len() || haystack[end..].starts_with(' ');
        starts_word && ends_word
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_trims_and_collapses_whitespace() {
        assert_eq!(clean("  Московская   ОБЛАСТЬ \t"), "московская область");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(clean("Татарстан респ."), "татарстан респ");
        assert_eq!(clean("«Ханты-Мансийский» АО"), "ханты мансийский ао");
        assert_eq!(clean("обл.Московская"), "обл московская");
    }

    #[test]
    fn folds_latin_lookalikes_inside_cyrillic_words() {
        // Latin 'M' and 'o'
        assert_eq!(clean("Mocковская област"), "московская област");
    }

    #[test]
    fn folds_words_made_only_of_lookalikes() {
        assert_eq!(clean("MOCKBA"), "москва");
    }

    #[test]
    fn transliterates_latin_words() {
        assert_eq!(clean("Moskovskaya oblast"), "московская област");
        assert_eq!(clean("Irkutskaya"), "иркутская");
        assert_eq!(clean("SPb"), "спб");
        assert_eq!(clean("Chukotskiy"), "чукотский");
    }

    #[test]
    fn folds_yo_and_foreign_diacritics() {
        assert_eq!(clean("Орёл"), "орел");
        assert_eq!(clean("café"), clean("cafe"));
    }

    #[test]
    fn cuts_trailing_qualifiers() {
        assert_eq!(clean("Тюменская область (без АО)"), "тюменская область");
        assert_eq!(
            clean("Российская Федерация без учета новых субъектов (с 01.01.2023)"),
            "российская федерация"
        );
        assert_eq!(clean("Республика Крым (с 29.07.2016)"), "республика крым");
        assert_eq!(clean("Пермский край (с 2010 года)"), "пермский край");
    }

    #[test]
    fn qualifiers_only_match_whole_words() {
        // "послед..." must not trigger the "после" qualifier
        assert_eq!(clean("последний край"), "последний край");
    }

    #[test]
    fn empty_and_whitespace_inputs_normalize_to_empty() {
        for raw in ["", "   ", "\n\t", "...", "—"] {
            let n = normalize(raw);
            assert!(n.original.is_empty(), "{raw:?}");
            assert!(n.stemmed.is_empty(), "{raw:?}");
        }
    }

    #[test]
    fn stemming_absorbs_inflection() {
        assert_eq!(stem("московская"), stem("московской"));
        assert_eq!(
            normalize("свердловской области").stemmed,
            normalize("Свердловская область").stemmed
        );
    }

    #[test]
    fn clean_is_idempotent_on_samples() {
        let samples = [
            "Ханты-Мансийский автономный округ — Югра",
            "Mосковская област",
            "tatarstan resp.",
            "Республика Саха (Якутия)",
            "Кемеровская область - Кузбасс после 2019",
            "Zürich Œuvre 123",
            "x y z",
        ];
        for s in samples {
            let once = clean(s);
            assert_eq!(clean(&once), once, "{s:?}");
        }
    }

    #[test]
    fn forms_are_tagged() {
        let n = normalize("Московская область");
        let tags: Vec<Approach> = n.forms().map(|f| f.approach).collect();
        assert_eq!(tags, vec![Approach::Original, Approach::Stemmed]);
        assert_eq!(n.form(Approach::Original), "московская область");
    }

    #[test]
    fn approach_parses_from_name() {
        assert_eq!("Stemmed".parse::<Approach>(), Ok(Approach::Stemmed));
        assert!("phonetic".parse::<Approach>().is_err());
    }
}
