//! Basic usage example for regnorm-rs
//!
//! This example demonstrates how to:
//! - Load the built-in region catalog
//! - Normalize raw region strings
//! - Find the best catalog match for noisy input
//! - Tune weights and inspect a score breakdown

use regnorm_rs::prelude::*;
use regnorm_rs::text::normalize;

fn main() -> Result<()> {
    println!("=== regnorm-rs Basic Usage Example ===\n");

    println!("Loading region catalog...");
    let catalog = Catalog::load()?;
    let stats = catalog.stats();
    println!(
        "✓ Catalog loaded: {} entries, {} alternate names\n",
        stats.entries, stats.alternate_names
    );

    // Example 1: Normalization
    println!("--- Example 1: Normalized forms ---");
    for raw in ["Свердловской обл.", "Mосковская област", "Tatarstan resp."] {
        let n = normalize(raw);
        println!("{raw:>22} -> original: {:<24} stemmed: {}", n.original, n.stemmed);
    }
    println!();

    // Example 2: Best match with default weights
    println!("--- Example 2: Best match (defaults, threshold {DEFAULT_THRESHOLD}) ---");
    let matcher = RegionMatcher::new(&catalog);
    let weights = WeightConfig::default();
    for raw in ["московск область", "СПб", "респ. Татарстан", "ХМАО", "Атлантида"] {
        let hit = matcher.find_best_match(raw, &weights, DEFAULT_THRESHOLD);
        match hit.candidate() {
            Some(name) => println!("{raw:>18} -> {name} ({:.1})", hit.score),
            None => println!("{raw:>18} -> no match (best score {:.1})", hit.score),
        }
    }
    println!();

    // Example 3: Custom weights
    println!("--- Example 3: Word-order tolerant weighting ---");
    let order_tolerant = WeightConfig::default()
        .with_metric(Metric::Levenshtein, 0.2)
        .with_metric(Metric::TokenSet, 0.8);
    let hit = matcher.find_best_match("область Московская", &order_tolerant, 70.0);
    println!("область Московская -> {:?} ({:.1})\n", hit.candidate(), hit.score);

    // Example 4: Near misses and explanations
    println!("--- Example 4: Top candidates and breakdown ---");
    for candidate in matcher.top_matches("новосиб", &weights, 3) {
        println!("  {:<28} {:.1} via '{}'", candidate.entry.name(), candidate.score, candidate.matched_name);
    }
    if let Some(breakdown) = matcher.explain("новосиб", "Новосибирская область", &weights) {
        for approach in &breakdown.approaches {
            println!("  {} '{}' vs '{}': {:.1}", approach.approach, approach.input, approach.candidate, approach.score);
        }
        println!("  total: {:.1}", breakdown.total);
    }

    Ok(())
}
