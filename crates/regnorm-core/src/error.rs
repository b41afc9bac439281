// crates/regnorm-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading a catalog or configuring a table operation.
///
/// Matching itself never fails: empty input, an empty catalog, threshold
/// rejection and degenerate weights all produce defined results instead.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The requested attribute is not carried by any catalog entry.
    #[error("Unknown catalog field '{0}': no entry in the catalog carries it")]
    UnknownField(String),

    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),
}

pub type Result<T> = std::result::Result<T, RegionError>;
