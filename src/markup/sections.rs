//! Tagged section lookup over documentation content.
//!
//! A documentation comment's top level is an ordered list of nodes; these
//! helpers find the sections (`<summary>`, `<param>`, ...) the checks care
//! about. Lookups are pure functions of the input list and stable under
//! repeated calls.

use super::node::MarkupNode;

/// Whether a node is an element (direct or empty form) with the given
/// unprefixed local tag name. Comparison is ordinal and case-sensitive;
/// prefixed tags never match a bare lookup.
pub fn matches_tag(node: &MarkupNode, tag_name: &str) -> bool {
    node.prefix().is_none() && node.tag_name() == Some(tag_name)
}

/// The first element in document order matching the tag name.
pub fn first_matching<'a>(content: &'a [MarkupNode], tag_name: &str) -> Option<&'a MarkupNode> {
    content.iter().find(|n| matches_tag(n, tag_name))
}

/// All elements matching the tag name, in document order.
pub fn all_matching<'a>(
    content: &'a [MarkupNode],
    tag_name: &'a str,
) -> impl Iterator<Item = &'a MarkupNode> {
    content.iter().filter(move |n| matches_tag(n, tag_name))
}

/// Whether the tag appears anywhere in the tree, at any depth.
///
/// Used after include expansion to spot `<inheritdoc/>` and `<exclude/>`
/// markers that suppress further analysis of a declaration.
pub fn contains_tag_deep(content: &[MarkupNode], tag_name: &str) -> bool {
    content
        .iter()
        .any(|n| matches_tag(n, tag_name) || contains_tag_deep(n.children(), tag_name))
}

/// The node's text content: every descendant text run concatenated with no
/// joiner, then trimmed of outer whitespace.
pub fn normalized_text(node: &MarkupNode) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out.trim().to_string()
}

fn collect_text(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text { runs } => {
            for run in runs {
                out.push_str(&run.text);
            }
        }
        MarkupNode::Element { children, .. } => {
            for child in children {
                collect_text(child, out);
            }
        }
        MarkupNode::Empty { .. } => {}
    }
}

/// The `name` attribute of a section element, if present.
pub fn name_attribute(node: &MarkupNode) -> Option<&str> {
    node.attribute("name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::node::{Attribute, Span};

    fn elem(name: &str, children: Vec<MarkupNode>) -> MarkupNode {
        MarkupNode::Element {
            name: name.to_string(),
            prefix: None,
            attributes: Vec::new(),
            children,
            span: Span::new(0, 1),
        }
    }

    fn empty_named(name: &str, attr_value: &str) -> MarkupNode {
        MarkupNode::Empty {
            name: name.to_string(),
            prefix: None,
            attributes: vec![Attribute::new("name", attr_value)],
            span: Span::new(0, 1),
        }
    }

    #[test]
    fn test_first_matching_document_order() {
        let content = vec![
            elem("summary", Vec::new()),
            empty_named("param", "a"),
            empty_named("param", "b"),
        ];
        let first = first_matching(&content, "param").unwrap();
        assert_eq!(name_attribute(first), Some("a"));
        assert!(first_matching(&content, "returns").is_none());
    }

    #[test]
    fn test_all_matching_both_forms() {
        // Direct and empty-element forms match uniformly.
        let content = vec![
            elem("param", vec![MarkupNode::text("doc", Span::new(0, 3))]),
            empty_named("param", "x"),
        ];
        assert_eq!(all_matching(&content, "param").count(), 2);
    }

    #[test]
    fn test_prefixed_tags_never_match() {
        let prefixed = MarkupNode::Empty {
            name: "param".to_string(),
            prefix: Some("ns".to_string()),
            attributes: Vec::new(),
            span: Span::new(0, 1),
        };
        assert!(!matches_tag(&prefixed, "param"));
    }

    #[test]
    fn test_contains_tag_deep() {
        let content = vec![elem(
            "summary",
            vec![elem("para", vec![empty_named("inheritdoc", "")])],
        )];
        assert!(contains_tag_deep(&content, "inheritdoc"));
        assert!(!contains_tag_deep(&content, "exclude"));
    }

    #[test]
    fn test_normalized_text() {
        let node = elem(
            "summary",
            vec![
                MarkupNode::text("  Gets the ", Span::new(0, 11)),
                elem("c", vec![MarkupNode::text("value", Span::new(11, 16))]),
                MarkupNode::text(".  ", Span::new(16, 19)),
            ],
        );
        assert_eq!(normalized_text(&node), "Gets the value.");
    }
}
