// crates/regnorm-core/src/loader/standard.rs

//! Binary catalog snapshots (bincode), optionally gzip-compressed.

use super::common_io;
use crate::error::{RegionError, Result};
use crate::model::Catalog;
use bincode::Options;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

/// Upper bound on a snapshot's decoded size, to refuse corrupt length prefixes.
const SNAPSHOT_LIMIT: u64 = 64 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
}

impl Catalog {
    /// Serializes the catalog into a binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(options().serialize(self)?)
    }

    /// Rebuilds a catalog from [`Catalog::to_bytes`] output. Duplicate
    /// canonical names are rejected just as in [`Catalog::new`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(options().deserialize(data)?)
    }

    /// Writes a binary snapshot to `path`, gzip-compressed when the name ends
    /// in `.gz`.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let mut out = BufWriter::new(File::create(path)?);

        if common_io::is_gzip(path) {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(out, Compression::default());
                encoder.write_all(&bytes)?;
                encoder.finish()?.flush()?;
                return Ok(());
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(RegionError::InvalidData(format!(
                    "{} asks for gzip; enable the 'compact' feature",
                    path.display()
                )));
            }
        }

        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }
}

pub(super) fn load_binary(path: &Path) -> Result<Catalog> {
    let mut stream = common_io::open_stream(path)?;
    let mut data = Vec::new();
    stream.read_to_end(&mut data).map_err(RegionError::Io)?;
    Catalog::from_bytes(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogEntry;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("Москва").with_alternate("мск").with_attribute("okato", "45"),
            CatalogEntry::new("Санкт-Петербург").with_attribute("iso_code", "RU-SPE"),
        ])
        .unwrap()
    }

    #[test]
    fn bytes_preserve_order_and_attributes() {
        let catalog = sample();
        let back = Catalog::from_bytes(&catalog.to_bytes().unwrap()).unwrap();
        assert_eq!(back.entries(), catalog.entries());
        assert_eq!(back.get("Москва").unwrap().attribute("okato"), Some("45"));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Catalog::from_bytes(&[0xff; 7]).unwrap_err();
        assert!(matches!(err, RegionError::Bincode(_)));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gz_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.bin.gz");
        sample().save_as(&path).unwrap();
        assert_eq!(load_binary(&path).unwrap().entries(), sample().entries());
    }
}
