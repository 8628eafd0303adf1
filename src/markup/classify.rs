//! Markup node classification.
//!
//! Pure, stateless predicates used by every check above them: is a node
//! empty, is it block-level, does a container tag demand block-only content.

use phf::phf_set;

use super::node::MarkupNode;

/// Tags whose content stands as its own paragraph or unit.
static BLOCK_LEVEL_TAGS: phf::Set<&'static str> = phf_set! {
    "code",
    "list",
    "note",
    "para",
    "inheritdoc",
    "include",
    "token",
    "div",
    "p",
};

/// Container tags that must hold exclusively block-level content.
static BLOCK_ONLY_CONTAINERS: phf::Set<&'static str> = phf_set! {
    "remarks",
    "note",
};

/// Whether a node's content collapses to nothing.
///
/// True for text made up entirely of whitespace runs, for content-less
/// elements, and for elements whose children are all themselves empty.
/// Empty nodes may sit anywhere without opening or closing a block run.
pub fn is_empty(node: &MarkupNode) -> bool {
    match node {
        MarkupNode::Text { runs } => runs.iter().all(|r| r.is_whitespace()),
        MarkupNode::Empty { .. } => true,
        MarkupNode::Element { children, .. } => children.iter().all(is_empty),
    }
}

/// Whether a node is block-level for the purpose of run detection.
///
/// Text is block-level only when whitespace-only. Elements with a recognized
/// block tag are block-level, and prefixed, unnamed, or unrecognized elements
/// are treated as block-level by default, so unknown markup never gets
/// flagged on its own. Only literal text can open a violating run.
pub fn is_block_level(node: &MarkupNode) -> bool {
    match node {
        MarkupNode::Text { runs } => runs.iter().all(|r| r.is_whitespace()),
        MarkupNode::Element { .. } | MarkupNode::Empty { .. } => true,
    }
}

/// Whether a node is a recognized block-level element, strictly.
///
/// Unlike [`is_block_level`], unknown or prefixed tags do NOT qualify. Used
/// to decide whether an element "uses block content" at all, which gates the
/// once-block-always-block and cross-sibling checks.
pub fn is_recognized_block(node: &MarkupNode) -> bool {
    match node {
        MarkupNode::Text { .. } => false,
        MarkupNode::Element { name, prefix, .. } | MarkupNode::Empty { name, prefix, .. } => {
            prefix.is_none() && BLOCK_LEVEL_TAGS.contains(name.as_str())
        }
    }
}

/// Whether a container tag must hold exclusively block-level content.
pub fn requires_block_content(tag_name: &str) -> bool {
    BLOCK_ONLY_CONTAINERS.contains(tag_name)
}
