// crates/regnorm-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a catalog.
///
/// Returned by [`Catalog::stats`](crate::Catalog::stats), these counts reflect
/// the catalog as it was constructed (catalogs never change afterwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub entries: usize,
    pub alternate_names: usize,
    pub attribute_keys: usize,
}
