//! XML fragment parsing into markup trees.
//!
//! Documentation fragments are wrapped in a synthetic root and parsed with
//! roxmltree; node ranges come back as fragment offsets and are mapped to
//! file offsets through the comment [`LineMap`]. Text is split into one run
//! per line so the engine sees line-segment runs, matching how the comment
//! was written.

use std::fs;
use std::path::PathBuf;

use crate::engine::decl::{DeclarationContext, IncludeResolver};
use crate::markup::node::{Attribute, TextRun};
use crate::markup::{MarkupNode, Span};

use super::comments::LineMap;

const WRAPPER_OPEN: &str = "<doc>";

/// Parse a stripped comment fragment into top-level markup nodes with
/// file-accurate spans. `None` means the fragment is not well-formed XML;
/// callers skip the declaration.
pub fn parse_fragment(fragment: &str, map: &LineMap) -> Option<Vec<MarkupNode>> {
    let wrapped = format!("{}{}</doc>", WRAPPER_OPEN, fragment);
    let doc = roxmltree::Document::parse(&wrapped).ok()?;
    let to_file = |offset: usize| map.to_file(offset.saturating_sub(WRAPPER_OPEN.len()));
    Some(convert_children(&wrapped, doc.root_element(), &to_file))
}

fn convert_children(
    source: &str,
    node: roxmltree::Node<'_, '_>,
    to_file: &dyn Fn(usize) -> usize,
) -> Vec<MarkupNode> {
    node.children()
        .filter_map(|child| convert(source, child, to_file))
        .collect()
}

fn convert(
    source: &str,
    node: roxmltree::Node<'_, '_>,
    to_file: &dyn Fn(usize) -> usize,
) -> Option<MarkupNode> {
    if node.is_text() {
        return Some(text_node(source, node, to_file));
    }
    if !node.is_element() {
        return None;
    }

    let range = node.range();
    let raw = &source[range.clone()];
    let (prefix, name) = qualified_name(raw);
    let span = Span::new(to_file(range.start), to_file(range.end));
    let attributes: Vec<Attribute> = node
        .attributes()
        .map(|a| Attribute::new(a.name(), a.value()))
        .collect();

    let children = convert_children(source, node, to_file);
    if children.is_empty() {
        return Some(MarkupNode::Empty {
            name,
            prefix,
            attributes,
            span,
        });
    }
    Some(MarkupNode::Element {
        name,
        prefix,
        attributes,
        children,
        span,
    })
}

/// One run per line segment of a text node; the runs carry the raw source
/// slices so offsets stay exact even around escaped characters.
fn text_node(
    source: &str,
    node: roxmltree::Node<'_, '_>,
    to_file: &dyn Fn(usize) -> usize,
) -> MarkupNode {
    let range = node.range();
    let raw = &source[range.clone()];

    let mut runs = Vec::new();
    let mut offset = range.start;
    for line in raw.split_inclusive('\n') {
        let text = line.trim_end_matches(['\n', '\r']);
        if !text.is_empty() {
            runs.push(TextRun::new(
                text,
                Span::new(to_file(offset), to_file(offset + text.len())),
            ));
        }
        offset += line.len();
    }
    if runs.is_empty() {
        runs.push(TextRun::new(
            "",
            Span::at(to_file(range.start)),
        ));
    }
    MarkupNode::Text { runs }
}

/// Read the qualified tag name straight out of the raw `<tag ...>` text.
fn qualified_name(raw: &str) -> (Option<String>, String) {
    let name_part = raw
        .trim_start_matches('<')
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default();
    match name_part.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, name_part.to_string()),
    }
}

/// Resolves `<include file="..." path="..."/>` references against real files
/// on disk, relative to a base directory.
///
/// The selector is the XPath subset documentation tooling actually emits:
/// `/`-separated steps of `name` or `name[@attr='value']`, with an optional
/// trailing `*` meaning "the children of the matched element".
pub struct FileIncludeResolver {
    base_dir: PathBuf,
}

impl FileIncludeResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl IncludeResolver for FileIncludeResolver {
    fn resolve(
        &self,
        _declaration: &DeclarationContext,
        file: &str,
        selector: &str,
    ) -> Option<Vec<MarkupNode>> {
        if file.is_empty() || selector.is_empty() {
            return None;
        }
        let text = fs::read_to_string(self.base_dir.join(file)).ok()?;
        let doc = roxmltree::Document::parse(&text).ok()?;

        let mut steps: Vec<&str> = selector
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let take_children = steps.last() == Some(&"*");
        if take_children {
            steps.pop();
        }
        if steps.is_empty() {
            return None;
        }

        let mut current = vec![doc.root()];
        for step in steps {
            let (name, predicate) = parse_step(step)?;
            current = current
                .iter()
                .flat_map(|n| n.children())
                .filter(|n| n.is_element() && n.tag_name().name() == name)
                .filter(|n| match predicate {
                    Some((attr, value)) => n.attribute(attr) == Some(value),
                    None => true,
                })
                .collect();
            if current.is_empty() {
                return None;
            }
        }

        // Spans here are offsets into the external document; the engine
        // stamps them with the include reference's span before use.
        let identity = |offset: usize| offset;
        let mut nodes = Vec::new();
        for node in current {
            if take_children {
                nodes.extend(convert_children(&text, node, &identity));
            } else if let Some(converted) = convert(&text, node, &identity) {
                nodes.push(converted);
            }
        }
        Some(nodes)
    }
}

/// Split a selector step into its element name and optional `[@k='v']`
/// attribute predicate.
fn parse_step(step: &str) -> Option<(&str, Option<(&str, &str)>)> {
    match step.split_once('[') {
        None => Some((step, None)),
        Some((name, rest)) => {
            let predicate = rest.strip_suffix(']')?.strip_prefix('@')?;
            let (attr, value) = predicate.split_once('=')?;
            let value = value
                .trim_matches(|c| c == '\'' || c == '"');
            Some((name, Some((attr, value))))
        }
    }
}
