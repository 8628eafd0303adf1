//! Section-level content checks: summaries, return values, property values,
//! standard property wording, and end-of-sentence punctuation.

use crate::markup::classify::is_empty;
use crate::markup::{sections, MarkupNode};

use super::decl::{DeclarationContext, ReturnKind};
use super::types::{Finding, Rule};

/// Documentation exists, so it must carry a non-empty `<summary>`.
pub fn check_summary(content: &[MarkupNode], decl: &DeclarationContext) -> Vec<Finding> {
    match sections::first_matching(content, "summary") {
        None => vec![Finding::at_spans(
            Rule::SummaryMissing,
            decl.identifier_spans.clone(),
        )],
        Some(summary) if is_empty(summary) => {
            vec![Finding::new(Rule::SummaryEmpty, summary.span())]
        }
        Some(_) => Vec::new(),
    }
}

/// Non-void methods must document their return value; void methods must not.
pub fn check_returns(content: &[MarkupNode], decl: &DeclarationContext) -> Vec<Finding> {
    if !decl.kind.has_return_value() {
        return Vec::new();
    }
    let returns = sections::first_matching(content, "returns");
    match (decl.returns, returns) {
        (ReturnKind::NonVoid, None) => vec![Finding::at_spans(
            Rule::ReturnsMissing,
            decl.identifier_spans.clone(),
        )],
        (ReturnKind::Void, Some(section)) => vec![Finding::new(
            Rule::ReturnsOnVoid,
            section.span(),
        )
        .with_property("removeSection", "returns")],
        // Unresolved return types skip both directions of the check.
        _ => Vec::new(),
    }
}

/// Properties and indexers with a getter must document `<value>`.
pub fn check_value(content: &[MarkupNode], decl: &DeclarationContext) -> Vec<Finding> {
    if !decl.kind.has_accessors() {
        return Vec::new();
    }
    let has_getter = decl.accessors.map_or(false, |a| a.has_getter);
    if has_getter && sections::first_matching(content, "value").is_none() {
        return vec![Finding::at_spans(
            Rule::ValueMissing,
            decl.identifier_spans.clone(),
        )];
    }
    Vec::new()
}

/// Property summaries open with standard wording matching the accessor
/// shape: "Gets or sets", "Gets", or "Sets". Accessors hidden from the
/// member's own audience (a `private set` on a public property) do not
/// count toward the expected wording.
pub fn check_property_summary(content: &[MarkupNode], decl: &DeclarationContext) -> Vec<Finding> {
    if !decl.kind.has_accessors() {
        return Vec::new();
    }
    let Some(accessors) = decl.accessors else {
        return Vec::new();
    };

    let gets = accessors.has_getter && accessors.getter_visible;
    let sets = accessors.has_setter && accessors.setter_visible;
    let expected = match (gets, sets) {
        (true, true) => "Gets or sets ",
        (true, false) => "Gets ",
        (false, true) => "Sets ",
        (false, false) => return Vec::new(),
    };

    let Some(summary) = sections::first_matching(content, "summary") else {
        return Vec::new();
    };
    let text = sections::normalized_text(summary);
    if text.is_empty() {
        // Owned by the empty-summary rule.
        return Vec::new();
    }
    if !text.starts_with(expected) {
        return vec![Finding::new(Rule::PropertySummaryText, summary.span())
            .with_arg(expected.trim_end())];
    }
    Vec::new()
}

/// Section text ends with end-of-sentence punctuation. Sections whose tag is
/// in the configured exemption set are skipped entirely.
pub fn check_punctuation(content: &[MarkupNode], exempt_tags: &[String]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for node in content {
        let Some(tag) = node.tag_name() else {
            continue;
        };
        if node.prefix().is_some() || exempt_tags.iter().any(|t| t == tag) {
            continue;
        }
        let text = sections::normalized_text(node);
        if text.is_empty() {
            continue;
        }
        let ends_sentence = text
            .chars()
            .last()
            .map_or(false, |c| matches!(c, '.' | '!' | '?'));
        if !ends_sentence {
            findings.push(Finding::new(Rule::SentencePunctuation, node.span()).with_arg(tag));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decl::{AccessorShape, DeclarationKind};
    use crate::markup::Span;

    fn section(tag: &str, text: &str) -> MarkupNode {
        MarkupNode::Element {
            name: tag.to_string(),
            prefix: None,
            attributes: Vec::new(),
            children: vec![MarkupNode::text(text, Span::new(10, 10 + text.len()))],
            span: Span::new(0, 20 + text.len()),
        }
    }

    fn method(returns: ReturnKind) -> DeclarationContext {
        let mut decl = DeclarationContext::new("Compute", DeclarationKind::Method);
        decl.returns = returns;
        decl
    }

    fn property(shape: AccessorShape) -> DeclarationContext {
        let mut decl = DeclarationContext::new("Count", DeclarationKind::Property);
        decl.accessors = Some(shape);
        decl
    }

    #[test]
    fn test_summary_missing_and_empty() {
        let decl = method(ReturnKind::Void);

        let none: Vec<MarkupNode> = vec![section("remarks", "Notes.")];
        let findings = check_summary(&none, &decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::SummaryMissing);

        let empty = vec![section("summary", "   ")];
        let findings = check_summary(&empty, &decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::SummaryEmpty);

        let ok = vec![section("summary", "Does things.")];
        assert!(check_summary(&ok, &decl).is_empty());
    }

    #[test]
    fn test_returns_required_and_forbidden() {
        let content = vec![section("summary", "Does things.")];
        let findings = check_returns(&content, &method(ReturnKind::NonVoid));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::ReturnsMissing);

        let with_returns = vec![
            section("summary", "Does things."),
            section("returns", "The result."),
        ];
        assert!(check_returns(&with_returns, &method(ReturnKind::NonVoid)).is_empty());

        let findings = check_returns(&with_returns, &method(ReturnKind::Void));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::ReturnsOnVoid);
        assert_eq!(
            findings[0].properties.get("removeSection").map(String::as_str),
            Some("returns")
        );

        // Unknown return type: skip both directions.
        assert!(check_returns(&with_returns, &method(ReturnKind::Unknown)).is_empty());
        assert!(check_returns(&content, &method(ReturnKind::Unknown)).is_empty());
    }

    #[test]
    fn test_value_required_for_readable_properties() {
        let shape = AccessorShape {
            has_getter: true,
            has_setter: false,
            getter_visible: true,
            setter_visible: false,
        };
        let content = vec![section("summary", "Gets the count.")];
        let findings = check_value(&content, &property(shape));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::ValueMissing);

        let with_value = vec![
            section("summary", "Gets the count."),
            section("value", "The count."),
        ];
        assert!(check_value(&with_value, &property(shape)).is_empty());

        // Set-only property: no value required.
        let set_only = AccessorShape {
            has_getter: false,
            has_setter: true,
            getter_visible: false,
            setter_visible: true,
        };
        assert!(check_value(&content, &property(set_only)).is_empty());
    }

    #[test]
    fn test_property_summary_standard_text() {
        let both = AccessorShape {
            has_getter: true,
            has_setter: true,
            getter_visible: true,
            setter_visible: true,
        };
        let content = vec![section("summary", "Gets the count.")];
        let findings = check_property_summary(&content, &property(both));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::PropertySummaryText);
        assert_eq!(findings[0].args, vec!["Gets or sets".to_string()]);

        let ok = vec![section("summary", "Gets or sets the count.")];
        assert!(check_property_summary(&ok, &property(both)).is_empty());

        // A private setter on a public property reads as get-only.
        let hidden_setter = AccessorShape {
            has_getter: true,
            has_setter: true,
            getter_visible: true,
            setter_visible: false,
        };
        assert!(check_property_summary(&content, &property(hidden_setter)).is_empty());
    }

    #[test]
    fn test_punctuation() {
        let exempt = vec!["seealso".to_string()];
        let content = vec![
            section("summary", "Does things."),
            section("remarks", "No trailing period"),
            section("seealso", "exempted"),
            section("returns", "Really?"),
        ];
        let findings = check_punctuation(&content, &exempt);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::SentencePunctuation);
        assert_eq!(findings[0].args, vec!["remarks".to_string()]);
    }
}
