//! Recovery core: pure post model, naming and front-matter rules.
mod config;
mod date;
mod filename;
mod frontmatter;
mod record;
mod summary;

pub use config::{RecoveryConfig, IMAGES_DIR, POSTS_DIR};
pub use date::{format_timestamp, parse_timestamp, PostTimestamp};
pub use filename::{numbered_stem, post_file_stem, sanitize_title, MAX_FILENAME_CHARS};
pub use frontmatter::build_markdown_document;
pub use record::{PostRecord, PLACEHOLDER_TITLE};
pub use summary::{ImageTally, PageOutcome, RunSummary};
