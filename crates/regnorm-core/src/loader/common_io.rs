// crates/regnorm-core/src/loader/common_io.rs
use crate::error::{RegionError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// On-disk catalog encodings, recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
    Binary,
}

impl SourceFormat {
    /// Format of `path`, looking through a trailing `.gz`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let inner = if is_gzip(path) {
            path.file_stem().map(Path::new).unwrap_or(path)
        } else {
            path
        };
        match inner.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SourceFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(SourceFormat::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Ok(SourceFormat::Binary),
            _ => Err(RegionError::InvalidData(format!(
                "cannot tell the catalog format of {} (expected .json, .yaml, .yml or .bin, optionally .gz)",
                path.display()
            ))),
        }
    }
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        RegionError::NotFound(format!("File not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(RegionError::InvalidData(format!(
                "{} is gzip-compressed; enable the 'compact' feature",
                path.display()
            )));
        }
    }
    Ok(Box::new(reader))
}
