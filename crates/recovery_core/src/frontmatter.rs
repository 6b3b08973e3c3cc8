use crate::date::format_timestamp;
use crate::record::PostRecord;

/// Renders the Hexo source file for a post: front-matter, blank line, body.
///
/// Only the first category and the first tag are written.
pub fn build_markdown_document(record: &PostRecord) -> String {
    let mut frontmatter = String::from("---\n");
    frontmatter.push_str(&format!("title: \"{}\"\n", escape_quoted(record.title())));
    if let Some(created) = &record.created_at {
        frontmatter.push_str(&format!("date: {}\n", format_timestamp(created)));
    }
    if let Some(updated) = record.distinct_update() {
        frontmatter.push_str(&format!("updated: {}\n", format_timestamp(updated)));
    }
    if let Some(category) = record.first_category() {
        frontmatter.push_str(&format!("categories: {category}\n"));
    }
    if let Some(tag) = record.first_tag() {
        frontmatter.push_str(&format!("tags: {tag}\n"));
    }
    frontmatter.push_str("---\n\n");

    format!(
        "{frontmatter}{body}",
        frontmatter = frontmatter,
        body = record.body_markdown
    )
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
