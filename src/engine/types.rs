//! Core types for documentation findings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::markup::Span;

/// Rule identifiers for the documentation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    // Block-level content rules
    #[serde(rename = "block_content_required")]
    BlockContentRequired,
    #[serde(rename = "mixed_block_inline")]
    MixedBlockInline,
    #[serde(rename = "sibling_block_mismatch")]
    SiblingBlockMismatch,
    // Parameter documentation rules
    #[serde(rename = "param_missing_name")]
    ParamMissingName,
    #[serde(rename = "param_unknown")]
    ParamUnknown,
    #[serde(rename = "param_wrong_order")]
    ParamWrongOrder,
    #[serde(rename = "type_param_missing_name")]
    TypeParamMissingName,
    #[serde(rename = "type_param_unknown")]
    TypeParamUnknown,
    #[serde(rename = "type_param_wrong_order")]
    TypeParamWrongOrder,
    // Section content rules
    #[serde(rename = "summary_missing")]
    SummaryMissing,
    #[serde(rename = "summary_empty")]
    SummaryEmpty,
    #[serde(rename = "returns_missing")]
    ReturnsMissing,
    #[serde(rename = "returns_on_void")]
    ReturnsOnVoid,
    #[serde(rename = "value_missing")]
    ValueMissing,
    #[serde(rename = "property_summary_text")]
    PropertySummaryText,
    #[serde(rename = "sentence_punctuation")]
    SentencePunctuation,
    #[serde(rename = "text_duplicated")]
    TextDuplicated,
    // File-level rules
    #[serde(rename = "file_name_mismatch")]
    FileNameMismatch,
    // File header rules
    #[serde(rename = "header_missing")]
    HeaderMissing,
    #[serde(rename = "header_malformed")]
    HeaderMalformed,
    #[serde(rename = "header_copyright_missing")]
    HeaderCopyrightMissing,
    #[serde(rename = "header_copyright_mismatch")]
    HeaderCopyrightMismatch,
    #[serde(rename = "header_file_attribute_missing")]
    HeaderFileAttributeMissing,
    #[serde(rename = "header_file_attribute_mismatch")]
    HeaderFileAttributeMismatch,
    #[serde(rename = "header_company_missing")]
    HeaderCompanyMissing,
    #[serde(rename = "header_company_mismatch")]
    HeaderCompanyMismatch,
    #[serde(rename = "header_summary_missing")]
    HeaderSummaryMissing,
}

/// All rules, in a stable listing order (used by `rules` output and config
/// validation).
pub const ALL_RULES: &[Rule] = &[
    Rule::BlockContentRequired,
    Rule::MixedBlockInline,
    Rule::SiblingBlockMismatch,
    Rule::ParamMissingName,
    Rule::ParamUnknown,
    Rule::ParamWrongOrder,
    Rule::TypeParamMissingName,
    Rule::TypeParamUnknown,
    Rule::TypeParamWrongOrder,
    Rule::SummaryMissing,
    Rule::SummaryEmpty,
    Rule::ReturnsMissing,
    Rule::ReturnsOnVoid,
    Rule::ValueMissing,
    Rule::PropertySummaryText,
    Rule::SentencePunctuation,
    Rule::TextDuplicated,
    Rule::FileNameMismatch,
    Rule::HeaderMissing,
    Rule::HeaderMalformed,
    Rule::HeaderCopyrightMissing,
    Rule::HeaderCopyrightMismatch,
    Rule::HeaderFileAttributeMissing,
    Rule::HeaderFileAttributeMismatch,
    Rule::HeaderCompanyMissing,
    Rule::HeaderCompanyMismatch,
    Rule::HeaderSummaryMissing,
];

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::BlockContentRequired => "block_content_required",
            Rule::MixedBlockInline => "mixed_block_inline",
            Rule::SiblingBlockMismatch => "sibling_block_mismatch",
            Rule::ParamMissingName => "param_missing_name",
            Rule::ParamUnknown => "param_unknown",
            Rule::ParamWrongOrder => "param_wrong_order",
            Rule::TypeParamMissingName => "type_param_missing_name",
            Rule::TypeParamUnknown => "type_param_unknown",
            Rule::TypeParamWrongOrder => "type_param_wrong_order",
            Rule::SummaryMissing => "summary_missing",
            Rule::SummaryEmpty => "summary_empty",
            Rule::ReturnsMissing => "returns_missing",
            Rule::ReturnsOnVoid => "returns_on_void",
            Rule::ValueMissing => "value_missing",
            Rule::PropertySummaryText => "property_summary_text",
            Rule::SentencePunctuation => "sentence_punctuation",
            Rule::TextDuplicated => "text_duplicated",
            Rule::FileNameMismatch => "file_name_mismatch",
            Rule::HeaderMissing => "header_missing",
            Rule::HeaderMalformed => "header_malformed",
            Rule::HeaderCopyrightMissing => "header_copyright_missing",
            Rule::HeaderCopyrightMismatch => "header_copyright_mismatch",
            Rule::HeaderFileAttributeMissing => "header_file_attribute_missing",
            Rule::HeaderFileAttributeMismatch => "header_file_attribute_mismatch",
            Rule::HeaderCompanyMissing => "header_company_missing",
            Rule::HeaderCompanyMismatch => "header_company_mismatch",
            Rule::HeaderSummaryMissing => "header_summary_missing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_RULES.iter().copied().find(|r| r.as_str() == s)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single finding emitted by the engine.
///
/// Findings are immutable value records: rule identifier, one or more source
/// spans (several when the same message applies to multiple sites, as with
/// multi-variable field declarations), ordered message-format arguments, and
/// an optional property bag consumed only by downstream code fixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: Rule,
    pub spans: Vec<Span>,
    pub args: Vec<String>,
    pub properties: BTreeMap<String, String>,
}

impl Finding {
    /// Create a finding with a single span and no arguments.
    pub fn new(rule: Rule, span: Span) -> Self {
        Self {
            rule,
            spans: vec![span],
            args: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Create a finding covering multiple sites.
    pub fn at_spans(rule: Rule, spans: Vec<Span>) -> Self {
        Self {
            rule,
            spans,
            args: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Append a message-format argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Attach a code-fix property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The primary (first) span.
    pub fn span(&self) -> Span {
        self.spans.first().copied().unwrap_or_default()
    }
}
