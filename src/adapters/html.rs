use crate::domain::ports::DocumentNode;
use scraper::{ElementRef, Html};

/// A saved EdT page parsed with `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            tracing::debug!("HTML parser recovered from {} errors", html.errors.len());
        }
        Self { html }
    }

    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.root_element())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    fn has_any_class(&self, classes: &[&str]) -> bool {
        classes.is_empty() || self.0.value().classes().any(|class| classes.contains(&class))
    }
}

impl<'a> DocumentNode for HtmlNode<'a> {
    fn find_all(&self, tag: &str, classes: &[&str]) -> Vec<Self> {
        self.0
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(HtmlNode)
            .filter(|node| node.0.value().name().eq_ignore_ascii_case(tag))
            .filter(|node| node.has_any_class(classes))
            .collect()
    }

    fn first_child_element(&self) -> Option<Self> {
        self.0.children().find_map(ElementRef::wrap).map(HtmlNode)
    }

    fn closest(&self, tag: &str) -> Option<Self> {
        self.0
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name().eq_ignore_ascii_case(tag))
            .map(HtmlNode)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }
}
