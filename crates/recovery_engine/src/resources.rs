//! Copies the images a page references into the blog's `images` tree.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use recovery_core::ImageTally;
use thiserror::Error;

use crate::query::{DocumentQuery, QueryElement};

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to create {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// Resolves an `img` `src` against the site: `/x` is relative to the
/// recovery root, anything else to the page's directory. `.` and `..` are
/// folded lexically; query strings and fragments are dropped.
pub fn resolve_image_source(src: &str, page_dir: &Path, recovery_root: &Path) -> PathBuf {
    let path_part = src.split(['?', '#']).next().unwrap_or(src);
    let joined = match path_part.strip_prefix('/') {
        Some(rooted) => recovery_root.join(rooted.trim_start_matches('/')),
        None => page_dir.join(path_part),
    };
    normalize(&joined)
}

/// Copies every local image referenced by `doc`. Problems are logged and
/// counted; they never fail the page.
pub fn copy_page_images<D: DocumentQuery>(
    doc: &D,
    page_path: &Path,
    recovery_root: &Path,
    images_output: &Path,
) -> ImageTally {
    let mut tally = ImageTally::default();
    let page_dir = page_path.parent().unwrap_or(recovery_root);
    let root = normalize(recovery_root);

    for img in doc.select_all("img") {
        let Some(src) = img.attr("src").map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        if is_remote(src) {
            engine_debug!("Ignoring remote image {} in {:?}", src, page_path);
            tally.ignored += 1;
            continue;
        }

        let source = resolve_image_source(src, page_dir, recovery_root);
        if !source.is_file() {
            engine_warn!("Image not found: {:?} (referenced by {:?})", source, page_path);
            tally.missing += 1;
            continue;
        }
        let Ok(relative) = source.strip_prefix(&root) else {
            engine_warn!(
                "Image {:?} lies outside the recovery root, not copied",
                source
            );
            tally.ignored += 1;
            continue;
        };

        let target = images_output.join(relative);
        match copy_preserving_mtime(&source, &target) {
            Ok(()) => {
                engine_info!("Copied image {:?} -> {:?}", source, target);
                tally.copied += 1;
            }
            Err(err) => {
                engine_error!("Image copy failed for {:?}: {}", page_path, err);
                tally.failed += 1;
            }
        }
    }
    tally
}

fn is_remote(src: &str) -> bool {
    src.contains("://") || src.starts_with("data:")
}

pub(crate) fn copy_preserving_mtime(from: &Path, to: &Path) -> Result<(), ResourceError> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|source| ResourceError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::copy(from, to).map_err(|source| ResourceError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;

    // Permissions come along with fs::copy; the timestamp does not.
    let preserved = fs::metadata(from)
        .and_then(|meta| meta.modified())
        .and_then(|modified| File::options().write(true).open(to)?.set_modified(modified));
    if let Err(err) = preserved {
        engine_debug!("Could not preserve modification time of {:?}: {}", to, err);
    }
    Ok(())
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
