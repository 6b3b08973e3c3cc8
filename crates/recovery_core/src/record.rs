use crate::date::PostTimestamp;

/// Title used when a page carries neither `og:title` nor `<title>`.
pub const PLACEHOLDER_TITLE: &str = "Untitled";

/// Everything recovered from one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    title: String,
    pub created_at: Option<PostTimestamp>,
    pub updated_at: Option<PostTimestamp>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub body_markdown: String,
}

impl PostRecord {
    /// Builds a record. Whitespace runs in the title, line breaks included,
    /// collapse to one space; a blank title becomes [`PLACEHOLDER_TITLE`].
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into().split_whitespace().collect::<Vec<_>>().join(" ");
        let title = if title.is_empty() {
            PLACEHOLDER_TITLE.to_string()
        } else {
            title
        };
        Self {
            title,
            created_at: None,
            updated_at: None,
            categories: Vec::new(),
            tags: Vec::new(),
            body_markdown: String::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn first_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// The `updated` value worth writing: present and distinct from `created`.
    pub fn distinct_update(&self) -> Option<&PostTimestamp> {
        match (&self.created_at, &self.updated_at) {
            (Some(created), Some(updated)) if created == updated => None,
            (_, updated) => updated.as_ref(),
        }
    }
}
