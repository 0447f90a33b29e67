use std::fmt::Write;

use ego_tree::NodeRef;
use scraper::node::{Element, Node};
use scraper::{Html, Selector};

/// Containers that hold the article body on common documentation sites, in
/// order of preference.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "main.content",
    "div.content",
    "article.doc-content",
    "div.doc-body",
    "div#main-content",
    "div.markdown-body",
    "div.documentation-content",
    "section.content",
    "main",
    "article",
];

const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "script", "style", "noscript"];
const CHROME_CLASS_MARKERS: &[&str] = &["sidebar", "side-nav", "toc"];
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub content_html: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedContent;
}

/// Picks the main documentation container and drops page chrome
/// (navigation, headers, footers, scripts, sidebars) from it.
#[derive(Debug, Clone)]
pub struct DocsContentExtractor {
    selectors: Vec<Selector>,
}

impl Default for DocsContentExtractor {
    fn default() -> Self {
        Self::with_selectors(DEFAULT_CONTENT_SELECTORS)
    }
}

impl DocsContentExtractor {
    /// Selectors that fail to parse are ignored.
    pub fn with_selectors(selectors: &[&str]) -> Self {
        Self {
            selectors: selectors
                .iter()
                .filter_map(|sel| Selector::parse(sel).ok())
                .collect(),
        }
    }
}

impl Extractor for DocsContentExtractor {
    fn extract(&self, html: &str) -> ExtractedContent {
        let doc = Html::parse_document(html);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let container = self
            .selectors
            .iter()
            .find_map(|sel| doc.select(sel).next())
            .or_else(|| {
                Selector::parse("body")
                    .ok()
                    .and_then(|sel| doc.select(&sel).next())
            })
            .unwrap_or_else(|| doc.root_element());

        let mut content_html = String::new();
        write_without_chrome(*container, &mut content_html);

        ExtractedContent {
            title,
            content_html,
        }
    }
}

fn write_without_chrome(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(&escape(text, false)),
        Node::Element(element) => {
            if is_chrome(element) {
                return;
            }
            let name = element.name();
            out.push('<');
            out.push_str(name);
            for (attr, value) in element.attrs() {
                let _ = write!(out, " {attr}=\"{}\"", escape(value, true));
            }
            out.push('>');
            if VOID_TAGS.contains(&name) {
                return;
            }
            for child in node.children() {
                write_without_chrome(child, out);
            }
            let _ = write!(out, "</{name}>");
        }
        Node::Comment(_) | Node::ProcessingInstruction(_) | Node::Doctype(_) => {}
        _ => {
            for child in node.children() {
                write_without_chrome(child, out);
            }
        }
    }
}

fn is_chrome(element: &Element) -> bool {
    CHROME_TAGS.contains(&element.name())
        || element
            .classes()
            .any(|class| CHROME_CLASS_MARKERS.iter().any(|m| class.contains(m)))
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
