use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use recovery_core::{ImageTally, PageOutcome, PostRecord, RecoveryConfig, RunSummary};
use thiserror::Error;
use walkdir::WalkDir;

use crate::classify::is_article_page;
use crate::convert::{Html2MdConverter, MarkupToText};
use crate::decode::{decode_html, DecodeError};
use crate::extract::extract_content;
use crate::images::replace_image_tree;
use crate::metadata::{extract_categories, extract_dates, extract_tags, extract_title};
use crate::persist::{ensure_output_dir, PersistError, PostWriter};
use crate::query::{DocumentQuery, HtmlDocument};
use crate::resources::copy_page_images;

const PAGE_FILENAME: &str = "index.html";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to write post: {0}")]
    Persist(#[from] PersistError),
}

/// Assembles everything recoverable from a parsed article page.
pub fn build_post_record<D: DocumentQuery>(doc: &D, converter: &dyn MarkupToText) -> PostRecord {
    let (created_at, updated_at) = extract_dates(doc);
    let mut record = PostRecord::new(extract_title(doc));
    record.created_at = created_at;
    record.updated_at = updated_at;
    record.categories = extract_categories(doc);
    record.tags = extract_tags(doc);
    record.body_markdown = extract_content(doc, converter);
    record
}

/// One recovery run over a rendered site.
pub struct Recovery<C = Html2MdConverter> {
    config: RecoveryConfig,
    converter: C,
}

impl Recovery<Html2MdConverter> {
    pub fn new(config: RecoveryConfig) -> Self {
        Self::with_converter(config, Html2MdConverter)
    }
}

impl<C: MarkupToText> Recovery<C> {
    pub fn with_converter(config: RecoveryConfig, converter: C) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Processes every candidate page, then mirrors the whole `images`
    /// directory. Only failing to create the output directories aborts.
    pub fn run(&self) -> Result<RunSummary, PersistError> {
        let posts_dir = self.config.posts_dir();
        ensure_output_dir(&posts_dir)?;
        ensure_output_dir(&self.config.images_output_dir())?;

        let writer = PostWriter::new(posts_dir);
        let mut summary = RunSummary::default();
        for page in self.discover_candidates() {
            let outcome = self.process_page(&page, &writer);
            summary.record(&outcome);
        }

        summary.bulk_images_copied = match replace_image_tree(
            &self.config.images_source_dir(),
            &self.config.images_output_dir(),
        ) {
            Ok(copied) => copied,
            Err(err) => {
                engine_error!("Copying the image directory failed: {}", err);
                None
            }
        };
        Ok(summary)
    }

    /// Every `index.html` below the accepted year directories, in file-name order.
    pub fn discover_candidates(&self) -> Vec<PathBuf> {
        let root = &self.config.recovery_root;
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(err) => {
                engine_error!("Cannot list recovery root {:?}: {}", root, err);
                return Vec::new();
            }
        };

        let mut year_dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| self.config.accepts_year_directory(name))
            })
            .map(|e| e.path())
            .collect();
        year_dirs.sort();

        let mut candidates = Vec::new();
        for year_dir in year_dirs {
            engine_info!("Scanning {:?}", year_dir);
            candidates.extend(
                WalkDir::new(&year_dir)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| match e {
                        Ok(entry) => Some(entry),
                        Err(err) => {
                            engine_warn!("Skipping unreadable entry under {:?}: {}", year_dir, err);
                            None
                        }
                    })
                    .filter(|e| e.file_type().is_file() && e.file_name() == PAGE_FILENAME)
                    .map(|e| e.into_path()),
            );
        }
        candidates
    }

    /// Runs the per-page pipeline. Errors stay inside the returned outcome.
    pub fn process_page(&self, html_path: &Path, writer: &PostWriter) -> PageOutcome {
        match self.recover_page(html_path, writer) {
            Ok(Some((post, images))) => {
                engine_info!("Recovered {:?} -> {:?}", html_path, post);
                PageOutcome::Recovered { post, images }
            }
            Ok(None) => {
                engine_debug!("Not an article page: {:?}", html_path);
                PageOutcome::Skipped
            }
            Err(err) => {
                engine_error!("Failed to process {:?}: {}", html_path, err);
                PageOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn recover_page(
        &self,
        html_path: &Path,
        writer: &PostWriter,
    ) -> Result<Option<(PathBuf, ImageTally)>, PageError> {
        let bytes = fs::read(html_path).map_err(|source| PageError::Read {
            path: html_path.to_path_buf(),
            source,
        })?;
        let decoded = decode_html(&bytes)?;
        if decoded.encoding_label != "UTF-8" {
            engine_debug!("Decoded {:?} as {}", html_path, decoded.encoding_label);
        }
        if !is_article_page(&decoded.html) {
            return Ok(None);
        }

        let doc = HtmlDocument::parse(&decoded.html);
        let record = build_post_record(&doc, &self.converter);
        let post = writer.write_post(&record)?;

        let images = copy_page_images(
            &doc,
            html_path,
            &self.config.recovery_root,
            &self.config.images_output_dir(),
        );
        Ok(Some((post, images)))
    }
}
