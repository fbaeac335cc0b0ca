//! Document query port used by the listing extractor.
//!
//! The extractor never sees a concrete HTML library. It asks a
//! [`DocumentQuery`] for descendants or children matching a small structural
//! pattern ([`NodePattern`]) and reads attributes and text from the nodes it
//! gets back. The production adapter lives in `tvsub-tracker` and is backed
//! by `scraper`; tests use the in-memory tree in [`testing`].

use std::fmt::Write;

use thiserror::Error;

/// Error raised when a document cannot be parsed.
///
/// The listing extractor swallows this and returns an empty result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The source could not be turned into a document.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Attribute constraint on a [`NodePattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatch {
    /// The attribute is present (any value).
    Present(&'static str),
    /// The attribute value contains `needle`.
    Contains {
        /// Attribute name.
        name: &'static str,
        /// Substring the value must contain.
        needle: &'static str,
    },
}

/// A single-element structural pattern: tag, id, class and one attribute.
///
/// Every part is optional; an empty pattern matches any element.
///
/// ```
/// use tvsub_core::NodePattern;
///
/// let pattern = NodePattern::tag("a").with_attr_containing("href", "download.php");
/// assert_eq!(pattern.to_css(), r#"a[href*="download.php"]"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodePattern {
    tag: Option<&'static str>,
    id: Option<&'static str>,
    class: Option<&'static str>,
    attr: Option<AttrMatch>,
}

impl NodePattern {
    /// Match any element.
    pub const fn any() -> Self {
        Self {
            tag: None,
            id: None,
            class: None,
            attr: None,
        }
    }

    /// Match elements with the given tag name.
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            ..Self::any()
        }
    }

    /// Match the element with the given `id` attribute.
    pub const fn id(id: &'static str) -> Self {
        Self {
            id: Some(id),
            ..Self::any()
        }
    }

    /// Match elements carrying the given class.
    pub const fn class(class: &'static str) -> Self {
        Self {
            class: Some(class),
            ..Self::any()
        }
    }

    /// Additionally require the attribute to be present.
    #[must_use]
    pub const fn with_attr(mut self, name: &'static str) -> Self {
        self.attr = Some(AttrMatch::Present(name));
        self
    }

    /// Additionally require the attribute value to contain `needle`.
    #[must_use]
    pub const fn with_attr_containing(mut self, name: &'static str, needle: &'static str) -> Self {
        self.attr = Some(AttrMatch::Contains { name, needle });
        self
    }

    /// Render the pattern as a CSS compound selector.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        css.push_str(self.tag.unwrap_or("*"));
        if let Some(id) = self.id {
            let _ = write!(css, "#{id}");
        }
        if let Some(class) = self.class {
            let _ = write!(css, ".{class}");
        }
        match self.attr {
            Some(AttrMatch::Present(name)) => {
                let _ = write!(css, "[{name}]");
            }
            Some(AttrMatch::Contains { name, needle }) => {
                let escaped = needle.replace('\\', "\\\\").replace('"', "\\\"");
                let _ = write!(css, "[{name}*=\"{escaped}\"]");
            }
            None => {}
        }
        css
    }

    /// Check an element against the pattern.
    ///
    /// `attr` looks up an attribute value on the element. Adapters that can
    /// compile [`NodePattern::to_css`] do not need this; it exists for
    /// hand-built document trees.
    pub fn matches<'a>(&self, tag: &str, attr: impl Fn(&str) -> Option<&'a str>) -> bool {
        if self.tag.is_some_and(|t| !t.eq_ignore_ascii_case(tag)) {
            return false;
        }
        if let Some(id) = self.id {
            if attr("id") != Some(id) {
                return false;
            }
        }
        if let Some(class) = self.class {
            let has_class = attr("class")
                .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class));
            if !has_class {
                return false;
            }
        }
        match self.attr {
            Some(AttrMatch::Present(name)) => attr(name).is_some(),
            Some(AttrMatch::Contains { name, needle }) => {
                attr(name).is_some_and(|value| value.contains(needle))
            }
            None => true,
        }
    }
}

/// Read-only query capability over a parsed document.
///
/// Nodes are cheap copyable handles borrowed from the document. All
/// traversals return nodes in document order.
pub trait DocumentQuery {
    /// Handle to one element in the document.
    type Node<'a>: Copy
    where
        Self: 'a;

    /// The document's root element.
    fn root(&self) -> Self::Node<'_>;

    /// All descendants of `scope` (excluding `scope`) matching `pattern`.
    fn descendants<'a>(&'a self, scope: Self::Node<'a>, pattern: &NodePattern)
    -> Vec<Self::Node<'a>>;

    /// Direct element children of `scope` matching `pattern`.
    fn children<'a>(&'a self, scope: Self::Node<'a>, pattern: &NodePattern) -> Vec<Self::Node<'a>>;

    /// Attribute value on `node`.
    fn attr<'a>(&'a self, node: Self::Node<'a>, name: &str) -> Option<&'a str>;

    /// Concatenated text of `node`, with line-break elements rendered as `\n`.
    fn text<'a>(&'a self, node: Self::Node<'a>) -> String;
}

/// Turns raw markup into a queryable document.
pub trait DocumentParser: Send + Sync {
    /// Document type produced by this parser.
    type Document: DocumentQuery;

    /// Parse `source` into a document.
    fn parse(&self, source: &str) -> Result<Self::Document, DocumentError>;
}

/// In-memory document trees for tests.
#[cfg(test)]
pub mod testing {
    use super::{DocumentError, DocumentParser, DocumentQuery, NodePattern};

    const TEXT_TAG: &str = "#text";

    /// A hand-built element (or text node) in a fake document.
    #[derive(Debug, Clone, Default)]
    pub struct FakeElement {
        tag: String,
        attrs: Vec<(String, String)>,
        content: String,
        children: Vec<FakeElement>,
    }

    impl FakeElement {
        /// Create an element with the given tag.
        pub fn new(tag: &str) -> Self {
            Self {
                tag: tag.to_string(),
                ..Self::default()
            }
        }

        /// Create a text node.
        pub fn text_node(text: &str) -> Self {
            Self {
                tag: TEXT_TAG.to_string(),
                content: text.to_string(),
                ..Self::default()
            }
        }

        /// Add an attribute.
        pub fn attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.push((name.to_string(), value.to_string()));
            self
        }

        /// Append a child element.
        pub fn child(mut self, child: Self) -> Self {
            self.children.push(child);
            self
        }

        /// Append a text child.
        pub fn text(self, text: &str) -> Self {
            self.child(Self::text_node(text))
        }

        fn attr_value(&self, name: &str) -> Option<&str> {
            self.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }

        fn is_match(&self, pattern: &NodePattern) -> bool {
            self.tag != TEXT_TAG && pattern.matches(&self.tag, |name| self.attr_value(name))
        }

        fn collect_descendants<'a>(&'a self, pattern: &NodePattern, out: &mut Vec<&'a Self>) {
            for child in &self.children {
                if child.is_match(pattern) {
                    out.push(child);
                }
                child.collect_descendants(pattern, out);
            }
        }

        fn collect_text(&self, out: &mut String) {
            match self.tag.as_str() {
                TEXT_TAG => out.push_str(&self.content),
                "br" => out.push('\n'),
                _ => {
                    for child in &self.children {
                        child.collect_text(out);
                    }
                }
            }
        }
    }

    /// A parsed fake document.
    #[derive(Debug, Clone)]
    pub struct FakeDocument {
        root: FakeElement,
    }

    impl DocumentQuery for FakeDocument {
        type Node<'a> = &'a FakeElement;

        fn root(&self) -> &FakeElement {
            &self.root
        }

        fn descendants<'a>(
            &'a self,
            scope: &'a FakeElement,
            pattern: &NodePattern,
        ) -> Vec<&'a FakeElement> {
            let mut out = Vec::new();
            scope.collect_descendants(pattern, &mut out);
            out
        }

        fn children<'a>(
            &'a self,
            scope: &'a FakeElement,
            pattern: &NodePattern,
        ) -> Vec<&'a FakeElement> {
            scope.children.iter().filter(|c| c.is_match(pattern)).collect()
        }

        fn attr<'a>(&'a self, node: &'a FakeElement, name: &str) -> Option<&'a str> {
            node.attr_value(name)
        }

        fn text<'a>(&'a self, node: &'a FakeElement) -> String {
            let mut out = String::new();
            node.collect_text(&mut out);
            out
        }
    }

    /// Parser that ignores its input and returns a canned tree.
    ///
    /// With no tree configured, every parse fails.
    #[derive(Debug, Clone, Default)]
    pub struct FakeParser {
        root: Option<FakeElement>,
    }

    impl FakeParser {
        /// Parser that always yields `root`.
        pub fn returning(root: FakeElement) -> Self {
            Self { root: Some(root) }
        }

        /// Parser that always fails.
        pub fn failing() -> Self {
            Self { root: None }
        }
    }

    impl DocumentParser for FakeParser {
        type Document = FakeDocument;

        fn parse(&self, _source: &str) -> Result<FakeDocument, DocumentError> {
            self.root
                .clone()
                .map(|root| FakeDocument { root })
                .ok_or_else(|| DocumentError::Malformed("no canned document".to_string()))
        }
    }
}
