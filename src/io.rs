//! File opening helpers shared by the table and locus-list loaders.

use crate::error::M2mcError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a text file for line-oriented reading (supports `.gz`).
pub fn open_text<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, M2mcError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| M2mcError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Check whether a path names a gzip-compressed file.
pub fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
