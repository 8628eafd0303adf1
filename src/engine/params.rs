//! Reconciliation of documented parameter lists against declaration
//! signatures.
//!
//! Validates only the entries that are present: every documented name must
//! exist among the declared names, and documented entries must appear in the
//! same relative order as the declaration. Omitted parameters are owned by a
//! presence-only rule elsewhere and never reported here.

use crate::markup::{sections, MarkupNode, Span};

use super::types::{Finding, Rule};

/// Which documented list is being reconciled. Selects the rule identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Parameter,
    TypeParameter,
}

impl ParamKind {
    /// The section tag carrying entries of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ParamKind::Parameter => "param",
            ParamKind::TypeParameter => "typeparam",
        }
    }

    fn missing_name_rule(&self) -> Rule {
        match self {
            ParamKind::Parameter => Rule::ParamMissingName,
            ParamKind::TypeParameter => Rule::TypeParamMissingName,
        }
    }

    fn unknown_rule(&self) -> Rule {
        match self {
            ParamKind::Parameter => Rule::ParamUnknown,
            ParamKind::TypeParameter => Rule::TypeParamUnknown,
        }
    }

    fn wrong_order_rule(&self) -> Rule {
        match self {
            ParamKind::Parameter => Rule::ParamWrongOrder,
            ParamKind::TypeParameter => Rule::TypeParamWrongOrder,
        }
    }
}

/// A documented entry: the `name` attribute value (possibly blank) and the
/// section's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentedEntry {
    pub name: String,
    pub span: Span,
}

/// Extract the documented entries of the given kind, in document order.
///
/// Works identically for inline tags and expanded include content: both
/// arrive as markup nodes here. A section without a `name` attribute yields
/// a blank name.
pub fn extract_entries(content: &[MarkupNode], kind: ParamKind) -> Vec<DocumentedEntry> {
    sections::all_matching(content, kind.tag())
        .map(|node| DocumentedEntry {
            name: sections::name_attribute(node).unwrap_or_default().to_string(),
            span: node.span(),
        })
        .collect()
}

/// Flag documented entries whose name attribute is blank or missing.
pub fn check_missing_names(entries: &[DocumentedEntry], kind: ParamKind) -> Vec<Finding> {
    entries
        .iter()
        .filter(|e| e.name.trim().is_empty())
        .map(|e| Finding::new(kind.missing_name_rule(), e.span))
        .collect()
}

/// Reconcile documented entries against the declared ordered names.
///
/// The positional index used for the order check is the entry's index among
/// all documented entries, including blank-named ones that were skipped; the
/// expected position reported is the 1-based declared position.
pub fn reconcile(
    declared: &[String],
    entries: &[DocumentedEntry],
    kind: ParamKind,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            continue;
        }
        match declared.iter().position(|d| d == &entry.name) {
            None => {
                findings.push(
                    Finding::new(kind.unknown_rule(), entry.span).with_arg(&entry.name),
                );
            }
            Some(declared_position) => {
                if declared_position != index {
                    findings.push(
                        Finding::new(kind.wrong_order_rule(), entry.span)
                            .with_arg(&entry.name)
                            .with_arg((declared_position + 1).to_string()),
                    );
                }
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::node::Attribute;

    fn declared(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn entry(name: &str, start: usize) -> DocumentedEntry {
        DocumentedEntry {
            name: name.to_string(),
            span: Span::new(start, start + 10),
        }
    }

    #[test]
    fn test_wrong_order_both_entries() {
        // Declared [a, b, c], documented [b, a]: both are out of order.
        let findings = reconcile(
            &declared(&["a", "b", "c"]),
            &[entry("b", 0), entry("a", 20)],
            ParamKind::Parameter,
        );
        assert_eq!(findings.len(), 2);

        assert_eq!(findings[0].rule, Rule::ParamWrongOrder);
        assert_eq!(findings[0].args, vec!["b".to_string(), "2".to_string()]);
        assert_eq!(findings[1].rule, Rule::ParamWrongOrder);
        assert_eq!(findings[1].args, vec!["a".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_unknown_name() {
        // Declared [a, b], documented [a, z]: one finding for z only.
        let findings = reconcile(
            &declared(&["a", "b"]),
            &[entry("a", 0), entry("z", 20)],
            ParamKind::Parameter,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::ParamUnknown);
        assert_eq!(findings[0].args, vec!["z".to_string()]);
        assert_eq!(findings[0].span(), Span::new(20, 30));
    }

    #[test]
    fn test_blank_names_skipped_but_still_counted() {
        // The blank entry is skipped, but it still occupies documented
        // position 0, so "a" at position 1 mismatches declared position 0.
        let findings = reconcile(
            &declared(&["a", "b"]),
            &[entry("", 0), entry("a", 20)],
            ParamKind::Parameter,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::ParamWrongOrder);
        assert_eq!(findings[0].args, vec!["a".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_matching_order_no_findings() {
        let findings = reconcile(
            &declared(&["a", "b"]),
            &[entry("a", 0), entry("b", 20)],
            ParamKind::Parameter,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_undocumented_parameters_not_reported() {
        // c is declared but never documented: not this rule's business.
        let findings = reconcile(
            &declared(&["a", "b", "c"]),
            &[entry("a", 0), entry("b", 20)],
            ParamKind::Parameter,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_name_rule() {
        let entries = vec![entry("", 0), entry("  ", 20), entry("a", 40)];
        let findings = check_missing_names(&entries, ParamKind::TypeParameter);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.rule == Rule::TypeParamMissingName));
    }

    #[test]
    fn test_extract_entries() {
        let content = vec![
            MarkupNode::Element {
                name: "param".to_string(),
                prefix: None,
                attributes: vec![Attribute::new("name", "count")],
                children: vec![MarkupNode::text("The count.", Span::new(30, 40))],
                span: Span::new(10, 50),
            },
            MarkupNode::Empty {
                name: "param".to_string(),
                prefix: None,
                attributes: Vec::new(),
                span: Span::new(60, 70),
            },
            MarkupNode::Empty {
                name: "typeparam".to_string(),
                prefix: None,
                attributes: vec![Attribute::new("name", "T")],
                span: Span::new(80, 95),
            },
        ];

        let params = extract_entries(&content, ParamKind::Parameter);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "count");
        assert_eq!(params[1].name, "");

        let type_params = extract_entries(&content, ParamKind::TypeParameter);
        assert_eq!(type_params.len(), 1);
        assert_eq!(type_params[0].name, "T");
    }
}
