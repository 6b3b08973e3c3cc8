use crate::record::PLACEHOLDER_TITLE;

/// Upper bound on a sanitized title, counted in characters.
pub const MAX_FILENAME_CHARS: usize = 100;

/// Strips characters illegal in filenames, collapses whitespace runs and caps
/// the length. The result may be empty.
pub fn sanitize_title(title: &str) -> String {
    let mut collapsed = String::with_capacity(title.len());
    let mut pending_space = false;
    for c in title.chars().filter(|c| !is_forbidden(*c)) {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !collapsed.is_empty() {
            collapsed.push(' ');
        }
        pending_space = false;
        collapsed.push(c);
    }
    collapsed.chars().take(MAX_FILENAME_CHARS).collect()
}

/// File stem for a post title, never empty.
pub fn post_file_stem(title: &str) -> String {
    let sanitized = sanitize_title(title);
    if sanitized.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        sanitized
    }
}

/// Stem tried on the `attempt`-th collision; attempt 0 is the stem itself.
pub fn numbered_stem(stem: &str, attempt: usize) -> String {
    if attempt == 0 {
        stem.to_string()
    } else {
        format!("{stem}_{attempt}")
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_illegal_characters() {
        assert_eq!(sanitize_title(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(sanitize_title("  Hello \t\n  World  "), "Hello World");
        assert_eq!(sanitize_title("A : B"), "A B");
    }

    #[test]
    fn caps_length_in_characters() {
        let long = "字".repeat(150);
        let sanitized = sanitize_title(&long);
        assert_eq!(sanitized.chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn empty_stem_uses_placeholder() {
        assert_eq!(post_file_stem("???"), PLACEHOLDER_TITLE);
        assert_eq!(post_file_stem("Post"), "Post");
    }

    #[test]
    fn numbered_stems_start_at_one() {
        assert_eq!(numbered_stem("Post", 0), "Post");
        assert_eq!(numbered_stem("Post", 1), "Post_1");
        assert_eq!(numbered_stem("Post", 12), "Post_12");
    }
}
