//! `scraper`-backed implementation of the core document query port.

use scraper::{ElementRef, Html, Node, Selector};
use tvsub_core::{DocumentError, DocumentParser, DocumentQuery, NodePattern};

/// Parses HTML with `scraper` (html5ever).
///
/// Parsing is error-tolerant and never fails; malformed markup yields a
/// best-effort tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDocumentParser;

impl HtmlDocumentParser {
    /// Create a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentParser for HtmlDocumentParser {
    type Document = HtmlDocument;

    fn parse(&self, source: &str) -> Result<HtmlDocument, DocumentError> {
        Ok(HtmlDocument {
            html: Html::parse_document(source),
        })
    }
}

/// A parsed HTML document.
pub struct HtmlDocument {
    html: Html,
}

fn compile(pattern: &NodePattern) -> Option<Selector> {
    let css = pattern.to_css();
    match Selector::parse(&css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!(%css, error = %e, "Invalid selector");
            None
        }
    }
}

impl DocumentQuery for HtmlDocument {
    type Node<'a> = ElementRef<'a>;

    fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    fn descendants<'a>(&'a self, scope: ElementRef<'a>, pattern: &NodePattern) -> Vec<ElementRef<'a>> {
        compile(pattern).map_or_else(Vec::new, |selector| scope.select(&selector).collect())
    }

    fn children<'a>(&'a self, scope: ElementRef<'a>, pattern: &NodePattern) -> Vec<ElementRef<'a>> {
        let Some(selector) = compile(pattern) else {
            return Vec::new();
        };
        scope
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| selector.matches(child))
            .collect()
    }

    fn attr<'a>(&'a self, node: ElementRef<'a>, name: &str) -> Option<&'a str> {
        node.value().attr(name)
    }

    fn text<'a>(&'a self, node: ElementRef<'a>) -> String {
        let mut out = String::new();
        for descendant in node.descendants() {
            match descendant.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) if element.name() == "br" => out.push('\n'),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> HtmlDocument {
        HtmlDocumentParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_descendants_exclude_scope_and_keep_order() {
        let doc = parse(r#"<div id="a"><div id="b"><div id="c"></div></div></div>"#);
        let outer = doc.descendants(doc.root(), &NodePattern::id("a"));
        assert_eq!(outer.len(), 1);

        let inner = doc.descendants(outer[0], &NodePattern::tag("div"));
        let ids: Vec<_> = inner.iter().filter_map(|n| doc.attr(*n, "id")).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_children_are_direct_only() {
        let doc = parse(
            r#"<div id="outer"><div><table></table></div><span><table></table></span></div>"#,
        );
        let outer = doc.descendants(doc.root(), &NodePattern::id("outer"))[0];
        let divs = doc.children(outer, &NodePattern::tag("div"));
        assert_eq!(divs.len(), 1);
        assert_eq!(doc.children(divs[0], &NodePattern::tag("table")).len(), 1);
        assert!(doc.children(outer, &NodePattern::tag("table")).is_empty());
        assert_eq!(doc.descendants(outer, &NodePattern::tag("table")).len(), 2);
    }

    #[test]
    fn test_text_renders_br_as_newline() {
        let doc = parse("<table><tr><td> 45.3<br>GB </td></tr></table>");
        let cell = doc.descendants(doc.root(), &NodePattern::tag("td"))[0];
        assert_eq!(doc.text(cell), " 45.3\nGB ");
    }

    #[test]
    fn test_attribute_patterns() {
        let doc = parse(
            r#"<div class="x torrent-smalldescr"><span title="long title">a</span><span>b</span></div>"#,
        );
        let blocks = doc.descendants(doc.root(), &NodePattern::class("torrent-smalldescr"));
        assert_eq!(blocks.len(), 1);
        let spans = doc.descendants(blocks[0], &NodePattern::tag("span").with_attr("title"));
        assert_eq!(spans.len(), 1);
        assert_eq!(doc.attr(spans[0], "title"), Some("long title"));
    }
}
