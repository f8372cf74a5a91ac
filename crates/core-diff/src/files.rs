//! File access in front of the diff engine.
//!
//! Both inputs must exist and be regular files. Content is decoded as UTF-8
//! with lossy replacement; encoding detection is not attempted. `open_pair`
//! turns every failure into an empty result so the viewer shows a filler
//! screen instead of aborting.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::{DiffAlgorithm, DiffError, DiffResult, diff_texts};

fn read_text(path: &Path) -> Result<String, DiffError> {
    let meta = fs::metadata(path).map_err(|source| {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            DiffError::Missing { path, source }
        } else {
            DiffError::Read { path, source }
        }
    })?;
    if !meta.is_file() {
        return Err(DiffError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| DiffError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(target: "diff.io", file = %path.display(), size_bytes = bytes.len(), "file_read_ok");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Diff two files, surfacing access errors.
pub fn diff_files(
    left: &Path,
    right: &Path,
    algorithm: DiffAlgorithm,
) -> Result<DiffResult, DiffError> {
    let old = read_text(left)?;
    let new = read_text(right)?;
    Ok(diff_texts(&old, &new, algorithm))
}

/// Diff two files, falling back to an empty result on any access error.
pub fn open_pair(left: &Path, right: &Path, algorithm: DiffAlgorithm) -> DiffResult {
    match diff_files(left, right, algorithm) {
        Ok(result) => result,
        Err(err) => {
            warn!(target: "diff.io", error = %err, "input_unavailable_empty_view");
            DiffResult::empty()
        }
    }
}
