//! Data model for documentation markup trees.
//!
//! The host parses documentation comments into these nodes; the engine only
//! reads them. Trees are never mutated after construction.

use std::fmt;

/// Source location span with byte offsets into the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span from byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-length span at the given offset.
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A literal text run inside a documentation comment.
///
/// The host splits text at line boundaries, so a single logical sentence that
/// wraps across comment lines arrives as multiple runs. Runs may consist
/// entirely of whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub span: Span,
}

impl TextRun {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Whether this run contains only whitespace (or nothing).
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// An attribute on a markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A node in a documentation markup tree.
///
/// Well-formedness (matching open/close tags, attribute syntax) is guaranteed
/// by the host parser; the engine assumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// Literal text, one run per source line segment.
    Text { runs: Vec<TextRun> },
    /// An element with content: `<tag ...>children</tag>`.
    Element {
        name: String,
        prefix: Option<String>,
        attributes: Vec<Attribute>,
        children: Vec<MarkupNode>,
        span: Span,
    },
    /// An element without content: `<tag .../>` or `<tag></tag>`.
    Empty {
        name: String,
        prefix: Option<String>,
        attributes: Vec<Attribute>,
        span: Span,
    },
}

impl MarkupNode {
    /// Convenience constructor for a single-run text node.
    pub fn text(text: impl Into<String>, span: Span) -> Self {
        MarkupNode::Text {
            runs: vec![TextRun::new(text, span)],
        }
    }

    /// The local tag name, if this node is an element.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            MarkupNode::Text { .. } => None,
            MarkupNode::Element { name, .. } | MarkupNode::Empty { name, .. } => Some(name),
        }
    }

    /// The namespace prefix, if this node is an element with one.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            MarkupNode::Text { .. } => None,
            MarkupNode::Element { prefix, .. } | MarkupNode::Empty { prefix, .. } => {
                prefix.as_deref()
            }
        }
    }

    /// Child nodes (empty slice for text and empty elements).
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Look up an attribute value by name (ordinal comparison).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let attrs = match self {
            MarkupNode::Text { .. } => return None,
            MarkupNode::Element { attributes, .. } | MarkupNode::Empty { attributes, .. } => {
                attributes
            }
        };
        attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// The source span of this node. For text nodes this covers all runs.
    pub fn span(&self) -> Span {
        match self {
            MarkupNode::Text { runs } => runs
                .iter()
                .map(|r| r.span)
                .reduce(Span::cover)
                .unwrap_or_default(),
            MarkupNode::Element { span, .. } | MarkupNode::Empty { span, .. } => *span,
        }
    }
}
