//! Post metadata: structured `<meta>` properties first, visible page
//! elements second.

use recovery_core::{parse_timestamp, PostTimestamp, PLACEHOLDER_TITLE};

use crate::query::{DocumentQuery, QueryElement};

const TITLE_SITE_SEPARATOR: &str = " | ";

pub fn extract_title<D: DocumentQuery>(doc: &D) -> String {
    if let Some(og_title) = doc
        .first_attr(r#"meta[property="og:title"]"#, "content")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
    {
        return og_title;
    }

    if let Some(title) = doc.select_first("title") {
        let text = title.text();
        let text = text.trim();
        // "Post | Site name"
        return match text.split_once(TITLE_SITE_SEPARATOR) {
            Some((head, _)) => head.to_string(),
            None => text.to_string(),
        };
    }

    PLACEHOLDER_TITLE.to_string()
}

/// Returns `(created, updated)`; either may be absent.
pub fn extract_dates<D: DocumentQuery>(
    doc: &D,
) -> (Option<PostTimestamp>, Option<PostTimestamp>) {
    let created = meta_timestamp(doc, "article:published_time")
        .or_else(|| time_element(doc, "post-meta-date-created"));
    let updated = meta_timestamp(doc, "article:modified_time")
        .or_else(|| time_element(doc, "post-meta-date-updated"));
    (created, updated)
}

pub fn extract_categories<D: DocumentQuery>(doc: &D) -> Vec<String> {
    collect_terms(doc, "article:section", "a.post-meta-categories")
}

pub fn extract_tags<D: DocumentQuery>(doc: &D) -> Vec<String> {
    collect_terms(doc, "article:tag", "a.post-meta__tags")
}

fn meta_timestamp<D: DocumentQuery>(doc: &D, property: &str) -> Option<PostTimestamp> {
    doc.first_attr(&format!(r#"meta[property="{property}"]"#), "content")
        .and_then(|raw| parse_timestamp(&raw))
}

fn time_element<D: DocumentQuery>(doc: &D, class: &str) -> Option<PostTimestamp> {
    doc.first_attr(&format!("time.{class}"), "datetime")
        .and_then(|raw| parse_timestamp(&raw))
}

/// One entry from the meta property, then the link texts, first-seen order.
fn collect_terms<D: DocumentQuery>(doc: &D, property: &str, link_selector: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let from_meta = doc.first_attr(&format!(r#"meta[property="{property}"]"#), "content");
    let from_links = doc
        .select_all(link_selector)
        .into_iter()
        .map(|link| link.text());

    for term in from_meta.into_iter().chain(from_links) {
        let term = term.trim();
        if !term.is_empty() && !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}
