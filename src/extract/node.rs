//! Flattened view of a parsed HTML document.
//!
//! Parsing is done by `scraper`; this module only turns the tree into an
//! ordered sequence of [`Node`] values that the state machine can consume
//! one at a time.

use scraper::Html;
use scraper::node::Node as HtmlNode;

/// One element or text fragment, in document order.
///
/// Elements carry their tag name and attributes and no text. Text
/// fragments use the tag name `#text` and carry their content in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
}

impl Node {
    pub const TEXT_TAG: &'static str = "#text";

    /// A text fragment.
    pub fn text(content: impl Into<String>) -> Self {
        Node {
            tag: Self::TEXT_TAG.to_string(),
            attributes: Vec::new(),
            text: Some(content.into()),
        }
    }

    /// An element with the given attributes.
    #[cfg(test)]
    pub fn element(tag: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
        Node {
            tag: tag.into(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: None,
        }
    }

    /// Attribute values followed by the text content, if any.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .map(|(_, v)| v.as_str())
            .chain(self.text.as_deref())
    }

    /// True when any attribute value or the text equals `needle`, ignoring case.
    pub fn has_value(&self, needle: &str) -> bool {
        self.values().any(|v| v.eq_ignore_ascii_case(needle))
    }
}

/// Text that only separates lines in the export and carries no content.
pub fn is_line_break(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == '\n' || c == '\r')
}

/// The nodes of one document, consumed front to back.
///
/// The parsed tree is dropped as soon as the stream is built, so only the
/// flattened nodes for the current file are held in memory.
#[derive(Debug)]
pub struct NodeStream {
    nodes: std::vec::IntoIter<Node>,
}

impl NodeStream {
    /// Parse an HTML document and flatten it in document order.
    ///
    /// Comments, doctypes and processing instructions are skipped.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let nodes = document
            .tree
            .root()
            .descendants()
            .filter_map(|node| match node.value() {
                HtmlNode::Element(el) => Some(Node {
                    tag: el.name().to_string(),
                    attributes: el
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                    text: None,
                }),
                HtmlNode::Text(text) => Some(Node::text(&**text)),
                _ => None,
            })
            .collect::<Vec<_>>();
        NodeStream::from_nodes(nodes)
    }

    /// Wrap nodes that were produced some other way.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        NodeStream {
            nodes: nodes.into_iter(),
        }
    }
}

impl Iterator for NodeStream {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        self.nodes.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}
