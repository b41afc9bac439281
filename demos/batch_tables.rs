//! Batch matching example for regnorm-rs
//!
//! Matches a column of messy region names, then attaches catalog attributes
//! (English name, OKATO and ISO codes) next to the matches.

use regnorm_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== regnorm-rs Batch Example ===\n");

    let catalog = Catalog::load()?;
    let matcher = RegionMatcher::new(&catalog);

    let table = Table::from_column(
        "region_name",
        [
            Some("московск обл"),
            Some("свердловск"),
            Some("спб"),
            None,
            Some("Респ. Саха (Якутия)"),
            Some("московск обл"),
            Some("Новые субъекты"),
        ],
    );

    let weights = WeightConfig::default()
        .with_metric(Metric::Levenshtein, 0.4)
        .with_metric(Metric::TokenSet, 0.6);

    let matched = matcher.match_table(table, "region_name", &weights, 70.0)?;
    let enriched = matcher.attach_fields(matched, "ter", &["name_eng", "okato", "iso_code"])?;

    println!("{}", enriched.columns().join(" | "));
    for row in enriched.rows() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join(" | "));
    }
    println!();

    // A typo'd field name is a configuration error, reported before any work.
    match matcher.attach_field(Table::from_column("ter", ["Москва"]), "ter", "okatto") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}
