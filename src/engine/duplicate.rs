//! Copy-pasted documentation text detection.
//!
//! One pool per declaration across its whole tag set: if the author pasted
//! the same sentence into a summary and a param (or into two params), every
//! occurrence after the first is flagged.

use std::collections::HashSet;

use crate::markup::{sections, MarkupNode};

use super::types::{Finding, Rule};

/// Scan the top-level sections in document order and flag duplicated
/// normalized text. Blank sections and sections matching the configured
/// placeholder text never participate.
pub fn check(content: &[MarkupNode], placeholder_text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    // Scratch set lives for exactly one declaration; never shared.
    let mut seen: HashSet<String> = HashSet::new();

    for node in content {
        if node.tag_name().is_none() {
            continue;
        }
        let text = sections::normalized_text(node);
        if text.is_empty() || text == placeholder_text {
            continue;
        }
        if seen.contains(&text) {
            findings.push(
                Finding::new(Rule::TextDuplicated, node.span())
                    .with_arg(node.tag_name().unwrap_or_default()),
            );
        } else {
            seen.insert(text);
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Span;

    const PLACEHOLDER: &str = "The parameter is not used.";

    fn section(tag: &str, text: &str, start: usize) -> MarkupNode {
        let span = Span::new(start, start + text.len() + 20);
        MarkupNode::Element {
            name: tag.to_string(),
            prefix: None,
            attributes: Vec::new(),
            children: vec![MarkupNode::text(
                text,
                Span::new(start + 9, start + 9 + text.len()),
            )],
            span,
        }
    }

    #[test]
    fn test_second_occurrence_flags() {
        let content = vec![
            section("summary", "Gets the value.", 0),
            section("param", "Gets the value.", 100),
            section("returns", "Sets it.", 200),
        ];
        let findings = check(&content, PLACEHOLDER);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::TextDuplicated);
        assert_eq!(findings[0].span().start, 100);
        assert_eq!(findings[0].args, vec!["param".to_string()]);
    }

    #[test]
    fn test_n_duplicates_produce_n_minus_one_findings() {
        let content = vec![
            section("param", "Same text.", 0),
            section("param", "Same text.", 100),
            section("param", "Same text.", 200),
        ];
        let findings = check(&content, PLACEHOLDER);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].span().start, 100);
        assert_eq!(findings[1].span().start, 200);
    }

    #[test]
    fn test_placeholder_never_flags() {
        let content = vec![
            section("param", PLACEHOLDER, 0),
            section("param", PLACEHOLDER, 100),
            section("param", PLACEHOLDER, 200),
        ];
        assert!(check(&content, PLACEHOLDER).is_empty());
    }

    #[test]
    fn test_blank_sections_skipped() {
        let content = vec![
            section("param", "  ", 0),
            section("param", "", 100),
            section("summary", "Real text.", 200),
        ];
        assert!(check(&content, PLACEHOLDER).is_empty());
    }

    #[test]
    fn test_normalization_trims_outer_whitespace() {
        let content = vec![
            section("summary", "  Gets the value.  ", 0),
            section("value", "Gets the value.", 100),
        ];
        let findings = check(&content, PLACEHOLDER);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].args, vec!["value".to_string()]);
    }
}
