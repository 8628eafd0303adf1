//! Documentation-comment extraction from C# source text.
//!
//! A documentation block is a contiguous run of `///` lines. The comment
//! markers are stripped and the bodies joined into an XML fragment; a
//! [`LineMap`] records, per line, where each fragment byte lives in the
//! original file so findings can point at real source locations.

use crate::markup::Span;

/// Byte-offset to line:column conversion for one file.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line and column for a byte offset.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

struct Segment {
    frag_start: usize,
    file_start: usize,
    len: usize,
}

/// Maps offsets within a stripped comment fragment back to file offsets.
pub struct LineMap {
    segments: Vec<Segment>,
}

impl LineMap {
    /// Translate a fragment offset to a file offset. Offsets falling on the
    /// joining newline between lines clamp to the end of the earlier line.
    pub fn to_file(&self, frag_offset: usize) -> usize {
        for seg in self.segments.iter().rev() {
            if frag_offset >= seg.frag_start {
                return seg.file_start + (frag_offset - seg.frag_start).min(seg.len);
            }
        }
        self.segments.first().map(|s| s.file_start).unwrap_or(0)
    }
}

/// One extracted documentation block.
pub struct DocBlock {
    /// Comment bodies joined with `\n`, markers stripped.
    pub fragment: String,
    pub map: LineMap,
    /// File span of the whole block.
    pub span: Span,
    /// File offset just past the block's final line, where the annotated
    /// declaration begins.
    pub end_offset: usize,
}

fn is_doc_line(trimmed: &str) -> bool {
    trimmed.starts_with("///") && !trimmed.starts_with("////")
}

/// Extract every `///` documentation block in the file, in order.
pub fn extract_doc_blocks(source: &str) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(String, Vec<Segment>, Span)> = None;
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();

        if is_doc_line(trimmed) {
            let indent = line.len() - trimmed.len();
            let mut body = &trimmed[3..];
            let mut marker_len = 4;
            if let Some(stripped) = body.strip_prefix(' ') {
                body = stripped;
            } else {
                marker_len = 3;
            }
            let line_span = Span::new(offset, offset + line.len());

            let (fragment, segments, span) =
                current.get_or_insert_with(|| (String::new(), Vec::new(), line_span));
            if !fragment.is_empty() {
                fragment.push('\n');
            }
            segments.push(Segment {
                frag_start: fragment.len(),
                file_start: offset + indent + marker_len,
                len: body.len(),
            });
            fragment.push_str(body);
            *span = span.cover(line_span);
        } else if let Some((fragment, segments, span)) = current.take() {
            blocks.push(DocBlock {
                fragment,
                map: LineMap { segments },
                span,
                end_offset: offset,
            });
        }

        offset += raw.len();
    }

    if let Some((fragment, segments, span)) = current.take() {
        blocks.push(DocBlock {
            fragment,
            map: LineMap { segments },
            span,
            end_offset: offset,
        });
    }

    blocks
}
