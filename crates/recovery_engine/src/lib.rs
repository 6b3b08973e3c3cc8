//! Recovery engine: HTML extraction and filesystem pipeline.
mod classify;
mod convert;
mod decode;
mod extract;
mod images;
mod metadata;
mod persist;
mod pipeline;
mod query;
mod resources;

pub use classify::{is_article_page, ARTICLE_MARKER};
pub use convert::{Html2MdConverter, MarkupToText};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use extract::{extract_content, ARTICLE_SELECTOR};
pub use images::{replace_image_tree, BulkCopyError};
pub use metadata::{extract_categories, extract_dates, extract_tags, extract_title};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, PostWriter};
pub use pipeline::{build_post_record, PageError, Recovery};
pub use query::{DocumentQuery, HtmlDocument, QueryElement};
pub use resources::{copy_page_images, resolve_image_source, ResourceError};
