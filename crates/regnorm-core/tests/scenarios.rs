// crates/regnorm-core/tests/scenarios.rs
use regnorm_core::prelude::*;
use regnorm_core::{attach_field, RegionError};

fn builtin() -> &'static Catalog {
    Catalog::builtin().expect("built-in catalog")
}

#[test]
fn truncated_adjective_matches_oblast() {
    let matcher = RegionMatcher::new(builtin());
    let hit = matcher.find_best_match("московск область", &WeightConfig::default(), 65.0);
    assert_eq!(hit.candidate(), Some("Московская область"));
    assert!(hit.score >= 70.0, "score {}", hit.score);
}

#[test]
fn exact_alternate_or_abbreviation_scores_full_marks() {
    let matcher = RegionMatcher::new(builtin());
    let hit = matcher.find_best_match("спб", &WeightConfig::default(), 65.0);
    assert_eq!(hit.candidate(), Some("Санкт-Петербург"));
    assert!((hit.score - 100.0).abs() < 1e-9);
}

#[test]
fn empty_input_yields_no_match() {
    let matcher = RegionMatcher::new(builtin());
    for raw in ["", "   ", "\t"] {
        let hit = matcher.find_best_match(raw, &WeightConfig::default(), 0.0);
        assert_eq!(hit, MatchResult { candidate: None, score: 0.0 });
    }
}

#[test]
fn strict_threshold_rejects_but_reports_score() {
    let matcher = RegionMatcher::new(builtin());
    let weights = WeightConfig::default();
    let loose = matcher.find_best_match("свердловск", &weights, 0.0);
    assert_eq!(loose.candidate(), Some("Свердловская область"));
    assert!(loose.score < 99.0);

    let strict = matcher.find_best_match("свердловск", &weights, 99.0);
    assert!(strict.candidate.is_none());
    assert_eq!(strict.score, loose.score);
}

#[test]
fn attach_field_marks_entries_without_the_attribute() {
    let catalog = builtin();
    // Crimea has no ISO 3166-2:RU code in the catalog, Tatarstan has one.
    let table = Table::from_column("ter", [Some("Республика Крым"), Some("Республика Татарстан"), None]);
    let out = attach_field(table, catalog, "ter", "iso_code").unwrap();
    assert_eq!(out.cell(0, "iso_code"), Some(&Cell::Missing));
    assert_eq!(out.cell(1, "iso_code"), Some(&Cell::from("RU-TA")));
    assert_eq!(out.cell(2, "iso_code"), Some(&Cell::Missing));
}

#[test]
fn typo_in_field_name_is_a_configuration_error() {
    let table = Table::from_column("ter", ["Москва"]);
    let err = attach_field(table, builtin(), "ter", "iso_cod").unwrap_err();
    assert!(matches!(err, RegionError::UnknownField(_)));
}

#[test]
fn noisy_inputs_resolve_against_builtin_catalog() {
    let matcher = RegionMatcher::new(builtin());
    let weights = WeightConfig::default();
    let cases = [
        ("Свердловской обл.", "Свердловская область"),
        ("респ. Татарстан", "Республика Татарстан"),
        ("Татарстан", "Республика Татарстан"),
        ("ХМАО", "Ханты-Мансийский автономный округ — Югра"),
        ("Тюменская область (без АО)", "Тюменская область"),
        ("MOCKBA", "Москва"),
        ("г. Москва", "Москва"),
        ("Республика Саха (Якутия)", "Республика Саха (Якутия)"),
        ("Кемеровская область", "Кемеровская область — Кузбасс"),
        ("ЦФО", "Центральный федеральный округ"),
    ];
    for (raw, expected) in cases {
        let hit = matcher.find_best_match(raw, &weights, DEFAULT_THRESHOLD);
        assert_eq!(hit.candidate(), Some(expected), "{raw} scored {}", hit.score);
    }
}

#[test]
fn batch_results_follow_row_order_and_single_matching() {
    let catalog = builtin();
    let matcher = RegionMatcher::new(catalog);
    let weights = WeightConfig::default();
    let raws = ["спб", "московск обл", "", "Татарстан", "спб"];
    let table = Table::from_column("region", raws);
    let out = matcher.match_table(table, "region", &weights, 65.0).unwrap();

    for (row, raw) in raws.iter().enumerate() {
        let single = matcher.find_best_match(raw, &weights, 65.0);
        assert_eq!(out.cell(row, "ter"), Some(&Cell::from(single.candidate)));
        assert_eq!(out.cell(row, "levenshtein_score"), Some(&Cell::Number(single.score)));
    }
}
