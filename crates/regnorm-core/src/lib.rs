// crates/regnorm-core/src/lib.rs

//! # regnorm-core
//!
//! Fuzzy matching of noisy Russian region names (`"московск обл."`,
//! `"СПб"`, `"Татарстан респ"`) against a canonical catalog of regions.
//!
//! Pipeline: raw string -> [`text`] (cleaned + stemmed forms) ->
//! [`similarity`] (per-metric scores) -> [`scoring`] (weighted confidence) ->
//! [`search`] (best entry above a threshold). [`batch`] applies the pipeline to
//! whole tables and copies catalog attributes next to the matches.
//!
//! ```rust
//! use regnorm_core::prelude::*;
//!
//! let catalog = Catalog::load()?;
//! let matcher = RegionMatcher::new(&catalog);
//!
//! let hit = matcher.find_best_match("Свердловской обл.", &WeightConfig::default(), DEFAULT_THRESHOLD);
//! assert_eq!(hit.candidate(), Some("Свердловская область"));
//! # Ok::<(), regnorm_core::RegionError>(())
//! ```

pub mod alias;
pub mod batch;
pub mod common;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod scoring;
pub mod search;
pub mod similarity;
pub mod table;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::alias::Abbreviations;
pub use crate::batch::{attach_field, attach_fields, match_table, BatchOptions};
pub use crate::common::CatalogStats;
pub use crate::config::MatchConfig;
pub use crate::error::{RegionError, Result};
pub use crate::loader::SourceFormat;
pub use crate::model::{Catalog, CatalogEntry};
pub use crate::scoring::{score_breakdown, score_candidate, ScoreBreakdown, WeightConfig};
pub use crate::search::{find_best_match, MatchResult, PreparedInput, RegionMatcher, ScoredCandidate, DEFAULT_THRESHOLD};
pub use crate::similarity::Metric;
pub use crate::table::{Cell, Table};
pub use crate::text::{clean, normalize, Approach, NormalizedName};
pub use crate::traits::{NameMatch, Tabular};

#[cfg(feature = "csv")]
pub use crate::table::{read_csv, write_csv};

pub mod prelude {
    pub use crate::batch::BatchOptions;
    pub use crate::config::MatchConfig;
    pub use crate::model::{Catalog, CatalogEntry};
    pub use crate::scoring::WeightConfig;
    pub use crate::search::{MatchResult, RegionMatcher, DEFAULT_THRESHOLD};
    pub use crate::similarity::Metric;
    pub use crate::table::{Cell, Table};
    pub use crate::text::Approach;
    pub use crate::traits::{NameMatch, Tabular};
}
