//! Block-level content consistency analysis.
//!
//! Containers such as `<remarks>` must hold exclusively block-level content,
//! and any element that already uses block content must not mix inline text
//! into it. Violating content is reported as maximal contiguous runs with
//! whitespace trimmed off the reported span, and sibling elements of the
//! same tag are additionally checked for consistent block usage.

use std::collections::{BTreeMap, HashSet};

use crate::markup::classify::{is_block_level, is_empty, is_recognized_block, requires_block_content};
use crate::markup::{MarkupNode, Span};

use super::types::{Finding, Rule};

/// Which of the three block rules are enabled. The cross-sibling check's
/// duplicate suppression depends on whether the mixed-content rule runs, so
/// the toggles travel together.
#[derive(Debug, Clone, Copy)]
pub struct BlockToggles {
    pub block_content_required: bool,
    pub mixed_block_inline: bool,
    pub sibling_block_mismatch: bool,
}

impl Default for BlockToggles {
    fn default() -> Self {
        Self {
            block_content_required: true,
            mixed_block_inline: true,
            sibling_block_mismatch: true,
        }
    }
}

/// Analyze the top-level content of a documentation comment.
pub fn analyze(top_level: &[MarkupNode], toggles: &BlockToggles) -> Vec<Finding> {
    let mut findings = Vec::new();
    analyze_level(top_level, toggles, &mut findings);
    findings
}

/// One level of siblings: per-element checks first (recursing into children),
/// then the cross-sibling consistency check over this level. Order matters:
/// an element flagged by the mixed-content rule is skipped by the sibling
/// check, but only while the mixed-content rule is enabled.
fn analyze_level(siblings: &[MarkupNode], toggles: &BlockToggles, findings: &mut Vec<Finding>) {
    let mut mixed_flagged: HashSet<usize> = HashSet::new();

    for (index, node) in siblings.iter().enumerate() {
        let MarkupNode::Element { name, prefix, children, .. } = node else {
            continue;
        };

        if prefix.is_none() && requires_block_content(name) {
            if toggles.block_content_required {
                for span in violating_spans(children) {
                    findings.push(Finding::new(Rule::BlockContentRequired, span).with_arg(name));
                }
            }
        } else if uses_block_content(node) && toggles.mixed_block_inline {
            let spans = violating_spans(children);
            if !spans.is_empty() {
                mixed_flagged.insert(index);
            }
            for span in spans {
                findings.push(Finding::new(Rule::MixedBlockInline, span).with_arg(name));
            }
        }

        analyze_level(children, toggles, findings);
    }

    if toggles.sibling_block_mismatch {
        check_siblings(siblings, &mixed_flagged, toggles, findings);
    }
}

/// Whether an element contains at least one non-empty recognized block child.
fn uses_block_content(node: &MarkupNode) -> bool {
    node.children()
        .iter()
        .any(|c| is_recognized_block(c) && !is_empty(c))
}

/// Whether an element carries any non-empty inline content.
fn has_inline_content(node: &MarkupNode) -> bool {
    node.children()
        .iter()
        .any(|c| !is_empty(c) && !is_block_level(c))
}

/// Cross-sibling consistency: among same-tag siblings, if any uses block
/// content then every member still carrying inline content is flagged,
/// citing the sibling that motivated the check.
fn check_siblings(
    siblings: &[MarkupNode],
    mixed_flagged: &HashSet<usize>,
    toggles: &BlockToggles,
    findings: &mut Vec<Finding>,
) {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, node) in siblings.iter().enumerate() {
        if let MarkupNode::Element { name, prefix: None, .. } = node {
            groups.entry(name).or_default().push(index);
        }
    }

    for (tag, members) in groups {
        if members.len() < 2 {
            continue;
        }

        let motivator = members
            .iter()
            .position(|&i| uses_block_content(&siblings[i]));
        let Some(motivator) = motivator else {
            continue;
        };

        for (ordinal, &index) in members.iter().enumerate() {
            let node = &siblings[index];
            if is_empty(node) || !has_inline_content(node) {
                continue;
            }
            // Already reported as mixed content; do not double-flag.
            if toggles.mixed_block_inline && mixed_flagged.contains(&index) {
                continue;
            }
            findings.push(
                Finding::new(Rule::SiblingBlockMismatch, node.span())
                    .with_arg(tag)
                    .with_arg((motivator + 1).to_string())
                    .with_arg((ordinal + 1).to_string()),
            );
        }
    }
}

/// Single forward pass over ordered children, collecting maximal contiguous
/// runs of non-block, non-empty content. Empty nodes neither extend nor
/// close a run.
fn violating_spans(children: &[MarkupNode]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut last_violating = 0usize;

    for (i, child) in children.iter().enumerate() {
        if is_empty(child) {
            continue;
        }
        if is_block_level(child) {
            if let Some(start) = run_start.take() {
                spans.push(effective_span(&children[start..=last_violating]));
            }
        } else {
            if run_start.is_none() {
                run_start = Some(i);
            }
            last_violating = i;
        }
    }
    if let Some(start) = run_start {
        spans.push(effective_span(&children[start..=last_violating]));
    }

    spans
}

/// The trimmed span of a run: from the first node's effective start to the
/// last node's effective end, excluding leading and trailing whitespace-only
/// text.
fn effective_span(run: &[MarkupNode]) -> Span {
    let first = run.first().expect("run is never empty");
    let last = run.last().expect("run is never empty");
    Span::new(effective_start(first), effective_end(last))
}

fn effective_start(node: &MarkupNode) -> usize {
    if let MarkupNode::Text { runs } = node {
        for run in runs {
            if let Some(offset) = run.text.find(|c: char| !c.is_whitespace()) {
                return run.span.start + offset;
            }
        }
    }
    node.span().start
}

fn effective_end(node: &MarkupNode) -> usize {
    if let MarkupNode::Text { runs } = node {
        for run in runs.iter().rev() {
            if let Some((offset, ch)) = run
                .text
                .char_indices()
                .rev()
                .find(|(_, c)| !c.is_whitespace())
            {
                return run.span.start + offset + ch.len_utf8();
            }
        }
    }
    node.span().end
}
