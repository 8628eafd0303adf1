//! Culture-keyed message templates for findings.
//!
//! Templates use `{0}`-style positional placeholders, filled from a
//! finding's ordered argument list. Only the en-US catalog ships today;
//! unknown cultures fall back to it so rendering never fails.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::Rule;

static EN_US: Lazy<HashMap<Rule, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        Rule::BlockContentRequired,
        "The content of the <{0}> element must be wrapped in block-level elements such as <para>",
    );
    m.insert(
        Rule::MixedBlockInline,
        "The <{0}> element mixes inline text with block-level elements; wrap the inline text in a block-level element",
    );
    m.insert(
        Rule::SiblingBlockMismatch,
        "The <{0}> element at position {2} must use block-level content because the <{0}> element at position {1} does",
    );
    m.insert(
        Rule::ParamMissingName,
        "The <param> tag must declare a name attribute",
    );
    m.insert(
        Rule::ParamUnknown,
        "The documented parameter '{0}' does not exist in the declaration",
    );
    m.insert(
        Rule::ParamWrongOrder,
        "The documentation for parameter '{0}' must appear at position {1} to match the declaration",
    );
    m.insert(
        Rule::TypeParamMissingName,
        "The <typeparam> tag must declare a name attribute",
    );
    m.insert(
        Rule::TypeParamUnknown,
        "The documented type parameter '{0}' does not exist in the declaration",
    );
    m.insert(
        Rule::TypeParamWrongOrder,
        "The documentation for type parameter '{0}' must appear at position {1} to match the declaration",
    );
    m.insert(
        Rule::SummaryMissing,
        "The documentation must contain a <summary> element",
    );
    m.insert(Rule::SummaryEmpty, "The <summary> element must not be empty");
    m.insert(
        Rule::ReturnsMissing,
        "The documentation for a method returning a value must contain a <returns> element",
    );
    m.insert(
        Rule::ReturnsOnVoid,
        "Void-returning methods must not document a return value",
    );
    m.insert(
        Rule::ValueMissing,
        "The documentation for a readable property must contain a <value> element",
    );
    m.insert(
        Rule::PropertySummaryText,
        "The property summary must begin with '{0}'",
    );
    m.insert(
        Rule::SentencePunctuation,
        "The text in the <{0}> element must end with a period, exclamation mark, or question mark",
    );
    m.insert(
        Rule::TextDuplicated,
        "The text in the <{0}> element repeats documentation used elsewhere on this member",
    );
    m.insert(
        Rule::FileNameMismatch,
        "The file name '{0}' does not match the first type declared in the file, '{1}'",
    );
    m.insert(Rule::HeaderMissing, "The file has no header comment");
    m.insert(Rule::HeaderMalformed, "The file header XML is invalid");
    m.insert(
        Rule::HeaderCopyrightMissing,
        "The file header must contain copyright text",
    );
    m.insert(
        Rule::HeaderCopyrightMismatch,
        "The file header copyright text does not match the configured copyright text",
    );
    m.insert(
        Rule::HeaderFileAttributeMissing,
        "The file header copyright element must declare a file attribute",
    );
    m.insert(
        Rule::HeaderFileAttributeMismatch,
        "The file attribute value '{0}' does not match the file name '{1}'",
    );
    m.insert(
        Rule::HeaderCompanyMissing,
        "The file header copyright element must declare a non-empty company attribute",
    );
    m.insert(
        Rule::HeaderCompanyMismatch,
        "The company attribute must have the value '{0}'",
    );
    m.insert(
        Rule::HeaderSummaryMissing,
        "The file header must contain a non-empty summary element",
    );
    m
});

/// Look up the raw template for a rule in the given culture.
pub fn template(culture: &str, rule: Rule) -> &'static str {
    // Single-catalog lookup for now; the signature keeps culture in the
    // contract so additional catalogs slot in without touching callers.
    let _ = culture;
    EN_US.get(&rule).copied().unwrap_or("{0}")
}

/// Render a finding message: positional `{n}` placeholders are replaced with
/// the corresponding argument. Placeholders without a matching argument are
/// left in place.
pub fn render(culture: &str, rule: Rule, args: &[String]) -> String {
    let mut message = template(culture, rule).to_string();
    for (i, arg) in args.iter().enumerate() {
        message = message.replace(&format!("{{{}}}", i), arg);
    }
    message
}
