//! DOM query capability used by the extractors.
//!
//! Extractors only talk to [`DocumentQuery`] and [`QueryElement`], so any
//! parser able to answer CSS selector queries can stand in for `scraper`.

use scraper::{ElementRef, Html, Selector};

pub trait DocumentQuery {
    type Element<'a>: QueryElement<'a>
    where
        Self: 'a;

    fn parse(markup: &str) -> Self
    where
        Self: Sized;

    /// All elements matching `selector`, in document order. An invalid
    /// selector matches nothing.
    fn select_all(&self, selector: &str) -> Vec<Self::Element<'_>>;

    fn select_first(&self, selector: &str) -> Option<Self::Element<'_>> {
        self.select_all(selector).into_iter().next()
    }

    /// Value of `attr` on the first element matching `selector`.
    fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        self.select_first(selector)
            .and_then(|el| el.attr(attr).map(str::to_string))
    }
}

pub trait QueryElement<'a>: Copy {
    fn tag_name(&self) -> &'a str;
    fn attr(&self, name: &str) -> Option<&'a str>;
    fn classes(&self) -> Vec<&'a str>;
    /// Concatenated descendant text.
    fn text(&self) -> String;
    /// Descendant text nodes joined with `separator`.
    fn text_joined(&self, separator: &str) -> String;
    fn outer_html(&self) -> String;
    fn child_elements(&self) -> Vec<Self>;
    /// Descendants matching `selector`.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    fn select_first(&self, selector: &str) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }
}

/// `scraper`-backed document.
pub struct HtmlDocument {
    html: Html,
}

impl DocumentQuery for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    fn select_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl<'a> QueryElement<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn classes(&self) -> Vec<&'a str> {
        self.value().classes().collect()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn text_joined(&self, separator: &str) -> String {
        ElementRef::text(self).collect::<Vec<_>>().join(separator)
    }

    fn outer_html(&self) -> String {
        self.html()
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(sel) => self.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }
}
