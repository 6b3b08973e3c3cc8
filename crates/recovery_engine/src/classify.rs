/// Opening tag of the article container in rendered post pages.
pub const ARTICLE_MARKER: &str = r#"<article class="container post-content""#;

/// Cheap textual check run before any parsing. Archive, tag and category
/// listings also have an `index.html` but never this container.
pub fn is_article_page(html: &str) -> bool {
    html.contains(ARTICLE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::is_article_page;

    #[test]
    fn recognises_post_container() {
        let html = r#"<body><article class="container post-content" id="article-container"><p>x</p></article></body>"#;
        assert!(is_article_page(html));
    }

    #[test]
    fn rejects_pages_without_exact_marker() {
        assert!(!is_article_page("<body><article><p>x</p></article></body>"));
        assert!(!is_article_page(
            r#"<article class="post-content container"><p>x</p></article>"#
        ));
        assert!(!is_article_page(""));
    }
}
