use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use thiserror::Error;
use walkdir::WalkDir;

use crate::resources::{copy_preserving_mtime, ResourceError};

#[derive(Debug, Error)]
pub enum BulkCopyError {
    #[error("failed to clear {path:?}: {source}")]
    Clear { path: PathBuf, source: io::Error },
    #[error("failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error(transparent)]
    Copy(#[from] ResourceError),
}

/// Replaces `destination` with a full copy of `source`. Not a merge: whatever
/// was in `destination` before is gone afterwards.
///
/// Returns the number of files copied, or `None` when `source` does not exist.
pub fn replace_image_tree(source: &Path, destination: &Path) -> Result<Option<usize>, BulkCopyError> {
    if !source.is_dir() {
        engine_warn!("Image directory not found: {:?}", source);
        return Ok(None);
    }

    if destination.exists() {
        fs::remove_dir_all(destination).map_err(|source| BulkCopyError::Clear {
            path: destination.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(destination).map_err(|source| BulkCopyError::Clear {
        path: destination.to_path_buf(),
        source,
    })?;

    let mut copied = 0;
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|err| BulkCopyError::Walk {
            path: source.to_path_buf(),
            source: err,
        })?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|err| ResourceError::CreateDir {
                path: target.clone(),
                source: err,
            })?;
        } else {
            copy_preserving_mtime(entry.path(), &target)?;
            copied += 1;
        }
    }

    engine_info!("Copied image directory {:?} -> {:?} ({} files)", source, destination, copied);
    Ok(Some(copied))
}
