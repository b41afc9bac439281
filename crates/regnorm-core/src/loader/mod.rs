// crates/regnorm-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, decompression) and delegates to the
//! format parsers: JSON and YAML source documents (see [`raw`]) and bincode
//! snapshots.
//!
//! The built-in catalog of Russian federal subjects ships inside the crate
//! and is parsed at most once per process.

use crate::error::{RegionError, Result};
use crate::model::Catalog;
use once_cell::sync::OnceCell;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub mod common_io;
pub mod raw;
mod standard;

pub use common_io::SourceFormat;

#[cfg(feature = "json")]
const BUILTIN_CATALOG: &str = include_str!("../../data/regions.json");

static CATALOG_CACHE: OnceCell<Catalog> = OnceCell::new();

impl Catalog {
    /// The built-in catalog: 89 federal subjects, 8 federal districts and the
    /// country itself, with `name_eng`, `iso_code`, `okato` and
    /// `federal_district` attributes where they exist.
    ///
    /// Parsed on first use and shared afterwards.
    pub fn builtin() -> Result<&'static Catalog> {
        CATALOG_CACHE.get_or_try_init(|| {
            let catalog = parse_builtin()?;
            debug!(entries = catalog.len(), "loaded built-in catalog");
            Ok(catalog)
        })
    }

    /// Owned copy of [`Catalog::builtin`].
    pub fn load() -> Result<Self> {
        Self::builtin().cloned()
    }

    /// Loads a catalog file, choosing the parser by extension:
    /// `.json`, `.yaml`/`.yml` or `.bin`, each optionally followed by `.gz`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;
        let catalog = match format {
            SourceFormat::Binary => standard::load_binary(path)?,
            _ => Self::from_reader(common_io::open_stream(path)?, format)?,
        };
        debug!(
            path = %path.display(),
            ?format,
            entries = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parses a source document (`Json` or `Yaml`) from any reader.
    pub fn from_reader<R: Read>(reader: R, format: SourceFormat) -> Result<Self> {
        match format {
            #[cfg(feature = "json")]
            SourceFormat::Json => serde_json::from_reader::<_, raw::CatalogRaw>(reader)?.into_catalog(),
            #[cfg(feature = "yaml")]
            SourceFormat::Yaml => serde_yaml::from_reader::<_, raw::CatalogRaw>(reader)?.into_catalog(),
            SourceFormat::Binary => {
                let mut data = Vec::new();
                let mut reader = reader;
                reader.read_to_end(&mut data)?;
                Self::from_bytes(&data)
            }
            #[allow(unreachable_patterns)]
            other => Err(RegionError::InvalidData(format!(
                "{other:?} catalogs need the matching crate feature"
            ))),
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str::<raw::CatalogRaw>(s)?.into_catalog()
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str::<raw::CatalogRaw>(s)?.into_catalog()
    }
}

#[cfg(feature = "json")]
fn parse_builtin() -> Result<Catalog> {
    Catalog::from_json_str(BUILTIN_CATALOG)
}

#[cfg(not(feature = "json"))]
fn parse_builtin() -> Result<Catalog> {
    Err(RegionError::InvalidData(
        "the built-in catalog needs the 'json' feature".into(),
    ))
}
