//! File header parsing and validation.
//!
//! A file's leading single-line-comment block is parsed into a structured
//! header in one of two dialects: plain comment lines carrying raw copyright
//! text, or comment lines forming an XML fragment with a
//! `<copyright file="" company="">` element and optional `<summary>`. The
//! validator then runs an ordered chain of checks against the configured
//! expectations, short-circuiting on missing prerequisites.

use crate::config::Config;
use crate::markup::Span;

use super::types::{Finding, Rule};

/// Presence classification of a parsed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Missing,
    Malformed,
    Present,
}

/// A named sub-element of an XML-dialect header.
#[derive(Debug, Clone)]
pub struct HeaderElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated descendant text, untrimmed.
    pub text: String,
    /// Location of the element within the source file.
    pub span: Span,
}

impl HeaderElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed file header.
#[derive(Debug, Clone)]
pub struct FileHeader {
    kind: HeaderKind,
    span: Span,
    copyright_text: String,
    elements: Vec<HeaderElement>,
}

impl FileHeader {
    fn missing() -> Self {
        Self {
            kind: HeaderKind::Missing,
            span: Span::at(0),
            copyright_text: String::new(),
            elements: Vec::new(),
        }
    }

    fn malformed(span: Span) -> Self {
        Self {
            kind: HeaderKind::Malformed,
            span,
            copyright_text: String::new(),
            elements: Vec::new(),
        }
    }

    pub fn kind(&self) -> HeaderKind {
        self.kind
    }

    pub fn is_missing(&self) -> bool {
        self.kind == HeaderKind::Missing
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == HeaderKind::Malformed
    }

    /// Location of the whole header block.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Raw copyright text (plain dialect).
    pub fn copyright_text(&self) -> &str {
        &self.copyright_text
    }

    /// The first sub-element with the given name (XML dialect).
    pub fn element(&self, name: &str) -> Option<&HeaderElement> {
        self.elements.iter().find(|e| e.name == name)
    }
}

/// One collected leading comment line.
struct CommentLine {
    /// Comment body with the `//` marker and one following space stripped.
    body: String,
    /// File byte offset of the body start.
    body_offset: usize,
    /// File span of the whole line, excluding the newline.
    line_span: Span,
}

/// Collect the maximal leading run of single-line comments and blank lines.
/// The run ends at the first fully-blank line after comment content has
/// started, or at the first non-comment, non-blank line. Documentation
/// comments (`///`) are not header material.
fn leading_comment_lines(source: &str) -> Vec<CommentLine> {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut seen_content = false;

    for raw in source.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            if seen_content {
                break;
            }
            offset += raw.len();
            continue;
        }

        if !trimmed.starts_with("//") || trimmed.starts_with("///") {
            break;
        }

        let indent = line.len() - trimmed.len();
        let mut body = &trimmed[2..];
        let mut marker_len = 2;
        if let Some(stripped) = body.strip_prefix(' ') {
            body = stripped;
            marker_len = 3;
        }
        if !body.trim().is_empty() {
            seen_content = true;
        }
        lines.push(CommentLine {
            body: body.to_string(),
            body_offset: offset + indent + marker_len,
            line_span: Span::new(offset, offset + line.len()),
        });
        offset += raw.len();
    }

    lines
}

fn header_span(lines: &[CommentLine]) -> Span {
    let first = lines.first().map(|l| l.line_span).unwrap_or_default();
    let last = lines.last().map(|l| l.line_span).unwrap_or_default();
    first.cover(last)
}

/// Parse the plain-comment header dialect.
pub fn parse_plain(source: &str) -> FileHeader {
    let lines = leading_comment_lines(source);
    if lines.is_empty() {
        return FileHeader::missing();
    }

    let copyright_text = lines
        .iter()
        .map(|l| l.body.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    FileHeader {
        kind: HeaderKind::Present,
        span: header_span(&lines),
        copyright_text,
        elements: Vec::new(),
    }
}

/// Parse the XML header dialect: the comment bodies are reinterpreted as the
/// content of a synthetic XML fragment.
pub fn parse_xml(source: &str) -> FileHeader {
    let lines = leading_comment_lines(source);
    if lines.is_empty() {
        return FileHeader::missing();
    }
    let span = header_span(&lines);

    // Per-line mapping from fragment offsets back to file offsets.
    let mut fragment = String::new();
    let mut segments: Vec<(usize, usize, usize)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            fragment.push('\n');
        }
        segments.push((fragment.len(), line.body_offset, line.body.len()));
        fragment.push_str(&line.body);
    }
    let map = |frag_offset: usize| -> usize {
        for &(frag_start, file_start, len) in segments.iter().rev() {
            if frag_offset >= frag_start {
                return file_start + (frag_offset - frag_start).min(len);
            }
        }
        segments.first().map(|s| s.1).unwrap_or(0)
    };

    const OPEN: &str = "<docstyle-header>";
    let wrapped = format!("{}{}</docstyle-header>", OPEN, fragment);
    let doc = match roxmltree::Document::parse(&wrapped) {
        Ok(doc) => doc,
        Err(_) => return FileHeader::malformed(span),
    };

    let mut elements = Vec::new();
    for node in doc.root_element().children().filter(|n| n.is_element()) {
        let range = node.range();
        let text: String = node
            .descendants()
            .filter(|d| d.is_text())
            .filter_map(|d| d.text())
            .collect();
        elements.push(HeaderElement {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text,
            span: Span::new(
                map(range.start.saturating_sub(OPEN.len())),
                map(range.end.saturating_sub(OPEN.len())),
            ),
        });
    }

    FileHeader {
        kind: HeaderKind::Present,
        span,
        copyright_text: String::new(),
        elements,
    }
}

/// Line-by-line copyright comparison, tolerant of CRLF vs LF and of leading
/// or trailing whitespace on each line. Line counts must match exactly.
pub fn copyright_matches(expected: &str, actual: &str) -> bool {
    let trim: &[char] = &[' ', '\t', '\n', '\r'];
    let expected = expected.replace("\r\n", "\n");
    let actual = actual.replace("\r\n", "\n");
    let expected_lines: Vec<&str> = expected.trim_matches(trim).split('\n').map(str::trim).collect();
    let actual_lines: Vec<&str> = actual.trim_matches(trim).split('\n').map(str::trim).collect();
    expected_lines == actual_lines
}

/// Run every enabled header check for a file. Checks short-circuit on missing
/// prerequisites: nothing downstream of a missing header or a failed XML
/// parse runs, and attribute checks stop once the copyright element itself
/// is absent.
pub fn validate(source: &str, file_name: &str, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    let emit = |findings: &mut Vec<Finding>, finding: Finding| {
        if config.is_enabled(finding.rule) {
            findings.push(finding);
        }
    };

    let header = if config.xml_header {
        parse_xml(source)
    } else {
        parse_plain(source)
    };

    if header.is_missing() {
        emit(
            &mut findings,
            Finding::new(Rule::HeaderMissing, Span::at(0)).with_property("noCodeFix", "true"),
        );
        return findings;
    }
    if header.is_malformed() {
        emit(
            &mut findings,
            Finding::new(Rule::HeaderMalformed, header.span()),
        );
        return findings;
    }

    if config.xml_header {
        match header.element("copyright") {
            None => {
                emit(
                    &mut findings,
                    Finding::new(Rule::HeaderCopyrightMissing, header.span()),
                );
            }
            Some(copyright) => {
                match copyright.attribute("file") {
                    None => emit(
                        &mut findings,
                        Finding::new(Rule::HeaderFileAttributeMissing, copyright.span),
                    ),
                    Some(value) if value != file_name => emit(
                        &mut findings,
                        Finding::new(Rule::HeaderFileAttributeMismatch, copyright.span)
                            .with_arg(value)
                            .with_arg(file_name),
                    ),
                    Some(_) => {}
                }

                match copyright.attribute("company") {
                    None => emit(
                        &mut findings,
                        Finding::new(Rule::HeaderCompanyMissing, copyright.span),
                    ),
                    Some(value) if value.trim().is_empty() => emit(
                        &mut findings,
                        Finding::new(Rule::HeaderCompanyMissing, copyright.span),
                    ),
                    Some(value) => {
                        if config.company_configured() && value != config.company_name {
                            emit(
                                &mut findings,
                                Finding::new(Rule::HeaderCompanyMismatch, copyright.span)
                                    .with_arg(&config.company_name),
                            );
                        }
                    }
                }

                if config.copyright_configured()
                    && !copyright_matches(&config.expected_copyright(), &copyright.text)
                {
                    emit(
                        &mut findings,
                        Finding::new(Rule::HeaderCopyrightMismatch, copyright.span),
                    );
                }
            }
        }

        let has_summary = header
            .element("summary")
            .map_or(false, |s| !s.text.trim().is_empty());
        if !has_summary {
            emit(
                &mut findings,
                Finding::new(Rule::HeaderSummaryMissing, header.span()),
            );
        }
    } else {
        if header.copyright_text().trim().is_empty() {
            emit(
                &mut findings,
                Finding::new(Rule::HeaderCopyrightMissing, header.span()),
            );
        } else if config.copyright_configured()
            && !copyright_matches(&config.expected_copyright(), header.copyright_text())
        {
            emit(
                &mut findings,
                Finding::new(Rule::HeaderCopyrightMismatch, header.span()),
            );
        }
    }

    findings
}
