//! Host glue: file-level analysis over C# source text.
//!
//! This layer does the reading the engine refuses to do: it extracts `///`
//! blocks, reads the declaration head under each one, parses the fragment
//! into markup, and hands everything to the engine. Declarations it cannot
//! read are skipped, never reported.

pub mod comments;
pub mod signatures;
pub mod xml;

use std::path::Path;

use serde::Serialize;

use crate::engine::decl::{DeclarationKind, DocumentationComment};
use crate::engine::{CancelToken, Engine, Finding, Rule};

use comments::LineIndex;
use xml::FileIncludeResolver;

/// A finding rendered against a concrete file location.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub rule: Rule,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Analyze one C# file: header checks, file naming, and every documented
/// declaration. Multi-site findings produce one violation per site.
pub fn analyze_file(
    path: &Path,
    engine: &Engine,
    cancel: &CancelToken,
) -> anyhow::Result<Vec<Violation>> {
    let source = std::fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let resolver = FileIncludeResolver::new(path.parent().unwrap_or(Path::new(".")));

    let mut findings = engine.check_header(&source, &file_name);

    let mut first_type_seen = false;
    for block in comments::extract_doc_blocks(&source) {
        let Some(decl) = signatures::parse(&source, block.end_offset) else {
            continue;
        };
        let Some(nodes) = xml::parse_fragment(&block.fragment, &block.map) else {
            continue;
        };

        if !first_type_seen && decl.kind == DeclarationKind::Type {
            first_type_seen = true;
            findings.extend(engine.check_file_name(&file_name, &decl));
        }

        let doc = DocumentationComment::Inline(nodes);
        findings.extend(engine.check_declaration(&decl, &doc, &resolver, cancel)?);
    }

    let index = LineIndex::new(&source);
    let mut violations = to_violations(&findings, &file_name, &index, engine);
    violations.sort_by_key(|v| (v.line, v.column));
    Ok(violations)
}

fn to_violations(
    findings: &[Finding],
    file: &str,
    index: &LineIndex,
    engine: &Engine,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for finding in findings {
        let message = engine.render_message(finding);
        for span in &finding.spans {
            let (line, column) = index.position(span.start);
            violations.push(Violation {
                rule: finding.rule,
                file: file.to_string(),
                line,
                column,
                message: message.clone(),
            });
        }
    }
    violations
}
