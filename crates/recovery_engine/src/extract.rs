//! Article body extraction.
//!
//! Only the immediate children of the article container are considered.
//! Highlighted code is pulled out before Markdown conversion and spliced back
//! in afterwards, so the converter never sees gutter tables or line spans.

use crate::convert::MarkupToText;
use crate::query::{DocumentQuery, QueryElement};

pub const ARTICLE_SELECTOR: &str = "article.container.post-content";

/// Container children with one of these classes are theme chrome.
const EXCLUDED_CLASSES: &[&str] = &["post-copyright", "tag_share", "pagination-post"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct CodeBlock {
    lang: String,
    code: String,
}

impl CodeBlock {
    fn fenced(&self) -> String {
        format!("```{}\n{}\n```", self.lang, self.code)
    }
}

/// Markdown body of the post, trimmed. Empty when the page has no article
/// container.
pub fn extract_content<D: DocumentQuery>(doc: &D, converter: &dyn MarkupToText) -> String {
    let Some(container) = doc.select_first(ARTICLE_SELECTOR) else {
        return String::new();
    };

    let mut content_html = String::new();
    let mut code_blocks = Vec::new();

    for child in container.child_elements() {
        match child.tag_name() {
            "figure" if child.has_class("highlight") => {
                content_html.push_str(&placeholder_paragraph(code_blocks.len()));
                code_blocks.push(highlight_block(child));
            }
            "pre" => {
                content_html.push_str(&placeholder_paragraph(code_blocks.len()));
                code_blocks.push(CodeBlock {
                    lang: String::new(),
                    code: trim_code(&child.text()),
                });
            }
            "div" | "nav" if is_theme_chrome(&child.classes()) => {}
            _ => content_html.push_str(&child.outer_html()),
        }
    }

    if content_html.trim().is_empty() {
        for paragraph in container.select_all("p") {
            content_html.push_str(&paragraph.outer_html());
        }
    }

    for (original, repaired) in image_src_repairs(container) {
        content_html = content_html.replace(
            &format!(r#"src="{}""#, escape_attr(&original)),
            &format!(r#"src="{}""#, escape_attr(&repaired)),
        );
    }

    let mut markdown = converter.to_markdown(&content_html);
    for (index, block) in code_blocks.iter().enumerate() {
        markdown = markdown.replace(&placeholder(index), &block.fenced());
    }
    markdown.trim().to_string()
}

fn is_theme_chrome(classes: &[&str]) -> bool {
    classes.iter().any(|c| EXCLUDED_CLASSES.contains(c))
}

fn placeholder(index: usize) -> String {
    format!("RECOVEREDCODEBLOCK{index}PLACEHOLDER")
}

fn placeholder_paragraph(index: usize) -> String {
    format!("<p>{}</p>", placeholder(index))
}

/// `figure.highlight` as rendered by Hexo: a gutter/code table whose code
/// cell holds one `span.line` per source line.
fn highlight_block<'a, E: QueryElement<'a>>(figure: E) -> CodeBlock {
    let code = match figure.select_first("td.code") {
        Some(cell) => match cell.select_first("pre") {
            Some(pre) => pre
                .select_all("span.line")
                .into_iter()
                .map(|line| line.text())
                .collect::<Vec<_>>()
                .join("\n"),
            None => cell.text_joined("\n"),
        },
        None => match figure.select_first("pre") {
            Some(pre) => trim_code(&pre.text()),
            None => trim_code(&figure.text()),
        },
    };
    let lang = figure
        .classes()
        .iter()
        .find_map(|c| c.strip_prefix("language-"))
        .unwrap_or_default()
        .to_string();
    CodeBlock { lang, code }
}

fn trim_code(text: &str) -> String {
    text.trim_end_matches(['\n', '\r']).to_string()
}

/// Theme output sometimes carries `/../img.png` or `//img.png`.
fn repair_image_src(src: &str) -> Option<String> {
    if src.starts_with("/..") {
        Some(src[1..].to_string())
    } else if src.starts_with("//") {
        Some(src.trim_start_matches('/').to_string())
    } else {
        None
    }
}

fn image_src_repairs<'a, E: QueryElement<'a>>(container: E) -> Vec<(String, String)> {
    container
        .select_all("img")
        .into_iter()
        .filter_map(|img| img.attr("src"))
        .filter_map(|src| repair_image_src(src).map(|fixed| (src.to_string(), fixed)))
        .collect()
}

/// Mirrors how the serializer escapes attribute values.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}
