//! Light declaration-signature reading.
//!
//! This is deliberately not a C# parser. It reads the declaration head that
//! follows a documentation block with a handful of shape regexes, enough to
//! recover the facts the rules need: kind, name, parameter and type-parameter
//! names, return kind, accessor shape, visibility. Anything it cannot read
//! returns `None` and the caller skips the declaration.

use lazy_static::lazy_static;
use regex::Regex;

use crate::engine::decl::{
    AccessorShape, DeclarationContext, DeclarationKind, ReturnKind, Visibility,
};
use crate::markup::Span;

const MODS: &str = r"(?:(?:public|private|protected|internal|static|sealed|abstract|virtual|override|readonly|volatile|async|partial|unsafe|extern|new|const)\s+)*";
const TYPE_EXPR: &str = r"[\w.<>\[\],?\s]+?";

lazy_static! {
    static ref TYPE_DECL: Regex = Regex::new(&format!(
        r"^\s*{MODS}(?:class|struct|interface|enum|record(?:\s+(?:class|struct))?)\s+(?P<name>@?\w+)(?:\s*<(?P<tp>[^>]*)>)?"
    ))
    .unwrap();
    static ref EVENT_DECL: Regex = Regex::new(&format!(
        r"^\s*{MODS}event\s+{TYPE_EXPR}\s+(?P<name>@?\w+)\s*(?:[;={{]|$)"
    ))
    .unwrap();
    static ref INDEXER_DECL: Regex = Regex::new(&format!(
        r"(?s)^\s*{MODS}(?:{TYPE_EXPR})\s+(?P<name>this)\s*\[(?P<params>[^\]]*)\]\s*(?P<body>\{{.*|=>.*)"
    ))
    .unwrap();
    static ref METHOD_DECL: Regex = Regex::new(&format!(
        r"^\s*{MODS}(?P<ret>{TYPE_EXPR})\s+(?P<name>@?\w+)(?:\s*<(?P<tp>[^>]*)>)?\s*\((?P<params>[^)]*)\)"
    ))
    .unwrap();
    static ref CTOR_DECL: Regex = Regex::new(&format!(
        r"^\s*{MODS}(?P<name>@?[A-Z]\w*)\s*\((?P<params>[^)]*)\)"
    ))
    .unwrap();
    static ref PROPERTY_DECL: Regex = Regex::new(&format!(
        r"(?s)^\s*{MODS}(?:{TYPE_EXPR})\s+(?P<name>@?\w+)\s*(?P<body>\{{.*|=>.*)"
    ))
    .unwrap();
    static ref FIELD_DECL: Regex = Regex::new(&format!(
        r"^\s*{MODS}(?:{TYPE_EXPR})\s+(?P<names>@?\w+(?:\s*=[^,;]*)?(?:\s*,\s*@?\w+(?:\s*=[^,;]*)?)*)\s*;"
    ))
    .unwrap();
    static ref IDENT: Regex = Regex::new(r"@?[A-Za-z_]\w*").unwrap();
    static ref GET_KEYWORD: Regex = Regex::new(r"\bget\b").unwrap();
    static ref SET_KEYWORD: Regex = Regex::new(r"\b(?:set|init)\b").unwrap();
    static ref RESTRICTED_ACCESSOR: Regex = Regex::new(
        r"(?:private|protected|internal)(?:\s+(?:private|protected|internal))?\s+(?P<acc>get|set|init)\b"
    )
    .unwrap();
}

/// Read the declaration head starting at `start` in `source`. The head is
/// the text after any attribute lines, up to a blank line or a small fixed
/// number of lines.
pub fn parse(source: &str, start: usize) -> Option<DeclarationContext> {
    let (head_start, head) = declaration_head(source, start)?;

    if let Some(caps) = TYPE_DECL.captures(head) {
        let name = caps.name("name").unwrap();
        let mut decl = context(head, name, head_start, DeclarationKind::Type);
        if let Some(tp) = caps.name("tp") {
            decl.type_parameters = type_param_names(tp.as_str());
        }
        return Some(decl);
    }

    if let Some(caps) = EVENT_DECL.captures(head) {
        let name = caps.name("name").unwrap();
        return Some(context(head, name, head_start, DeclarationKind::Event));
    }

    if let Some(caps) = INDEXER_DECL.captures(head) {
        let name = caps.name("name").unwrap();
        let mut decl = context(head, name, head_start, DeclarationKind::Indexer);
        decl.parameters = param_names(caps.name("params").map_or("", |m| m.as_str()));
        decl.accessors = Some(accessor_shape(caps.name("body").unwrap().as_str()));
        return Some(decl);
    }

    if let Some(caps) = METHOD_DECL.captures(head) {
        let name = caps.name("name").unwrap();
        let mut decl = context(head, name, head_start, DeclarationKind::Method);
        decl.parameters = param_names(caps.name("params").map_or("", |m| m.as_str()));
        if let Some(tp) = caps.name("tp") {
            decl.type_parameters = type_param_names(tp.as_str());
        }
        let ret = caps.name("ret").unwrap().as_str().trim();
        decl.returns = if ret == "void" {
            ReturnKind::Void
        } else {
            ReturnKind::NonVoid
        };
        return Some(decl);
    }

    if let Some(caps) = CTOR_DECL.captures(head) {
        let name = caps.name("name").unwrap();
        let mut decl = context(head, name, head_start, DeclarationKind::Constructor);
        decl.parameters = param_names(caps.name("params").map_or("", |m| m.as_str()));
        return Some(decl);
    }

    if let Some(caps) = PROPERTY_DECL.captures(head) {
        let name = caps.name("name").unwrap();
        let mut decl = context(head, name, head_start, DeclarationKind::Property);
        decl.accessors = Some(accessor_shape(caps.name("body").unwrap().as_str()));
        return Some(decl);
    }

    if let Some(caps) = FIELD_DECL.captures(head) {
        let names = caps.name("names").unwrap();
        let spans: Vec<Span> = field_name_spans(names.as_str())
            .into_iter()
            .map(|(off, len)| {
                let s = head_start + names.start() + off;
                Span::new(s, s + len)
            })
            .collect();
        let first = IDENT.find(names.as_str())?;
        let mut decl = DeclarationContext::new(first.as_str(), DeclarationKind::Field);
        decl.visibility = visibility(head);
        decl.identifier_spans = spans;
        return Some(decl);
    }

    None
}

fn context(
    head: &str,
    name: regex::Match<'_>,
    head_start: usize,
    kind: DeclarationKind,
) -> DeclarationContext {
    let mut decl = DeclarationContext::new(name.as_str(), kind);
    decl.visibility = visibility(head);
    decl.identifier_spans = vec![Span::new(
        head_start + name.start(),
        head_start + name.end(),
    )];
    decl
}

/// The head slice for the declaration following a doc block: attribute
/// lines are skipped, then up to six lines are taken, stopping at a blank
/// line. Offsets stay file-accurate because the head is a direct slice.
fn declaration_head(source: &str, start: usize) -> Option<(usize, &str)> {
    let mut offset = start;
    let rest = source.get(start..)?;
    let mut lines = rest.split_inclusive('\n');

    // Skip attributes and leading blank lines.
    let mut head_start = offset;
    for raw in lines.by_ref() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            offset += raw.len();
            head_start = offset;
            continue;
        }
        offset += raw.len();
        break;
    }
    if head_start >= source.len() {
        return None;
    }

    let mut head_end = offset;
    for (taken, raw) in lines.enumerate() {
        if taken >= 5 || raw.trim().is_empty() {
            break;
        }
        head_end += raw.len();
    }

    Some((head_start, &source[head_start..head_end]))
}

fn visibility(head: &str) -> Visibility {
    let mods: Vec<&str> = head.split_whitespace().take(4).collect();
    if mods.contains(&"public") || mods.contains(&"protected") {
        Visibility::Public
    } else if mods.contains(&"internal") {
        Visibility::Internal
    } else {
        Visibility::Private
    }
}

/// Split a parameter list on top-level commas and take the final identifier
/// of each entry, ignoring any default-value expression.
fn param_names(list: &str) -> Vec<String> {
    let mut names = Vec::new();
    for part in split_top_level(list) {
        let part = part.split('=').next().unwrap_or("").trim();
        if part.is_empty() {
            continue;
        }
        if let Some(name) = IDENT.find_iter(part).last() {
            names.push(name.as_str().to_string());
        }
    }
    names
}

fn type_param_names(list: &str) -> Vec<String> {
    split_top_level(list)
        .into_iter()
        .filter_map(|p| IDENT.find_iter(p.trim()).last())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split on commas not nested inside `<>`, `()`, or `[]`.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts.retain(|p| !p.trim().is_empty());
    parts
}

/// Per-name offsets within a field declarator list like `a = 1, b, c`.
fn field_name_spans(names: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for part in names.split(',') {
        let declarator = part.split('=').next().unwrap_or("");
        if let Some(m) = IDENT.find(declarator) {
            spans.push((offset + m.start(), m.len()));
        }
        offset += part.len() + 1;
    }
    spans
}

/// Accessor shape from a property or indexer body. An accessor carrying its
/// own access modifier is treated as hidden from the member's audience.
fn accessor_shape(body: &str) -> AccessorShape {
    if body.trim_start().starts_with("=>") {
        // Expression-bodied member: getter only.
        return AccessorShape {
            has_getter: true,
            has_setter: false,
            getter_visible: true,
            setter_visible: false,
        };
    }

    let has_getter = GET_KEYWORD.is_match(body);
    let has_setter = SET_KEYWORD.is_match(body);
    let mut getter_visible = has_getter;
    let mut setter_visible = has_setter;
    for caps in RESTRICTED_ACCESSOR.captures_iter(body) {
        match caps.name("acc").map(|m| m.as_str()) {
            Some("get") => getter_visible = false,
            Some("set") | Some("init") => setter_visible = false,
            _ => {}
        }
    }
    AccessorShape {
        has_getter,
        has_setter,
        getter_visible,
        setter_visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_head(head: &str) -> DeclarationContext {
        parse(head, 0).expect("head should parse")
    }

    #[test]
    fn test_type_declaration_with_type_params() {
        let decl = parse_head("public class Cache<TKey, TValue>\n{\n");
        assert_eq!(decl.kind, DeclarationKind::Type);
        assert_eq!(decl.name, "Cache");
        assert_eq!(decl.type_parameters, vec!["TKey", "TValue"]);
        assert_eq!(decl.visibility, Visibility::Public);
        // The identifier span points at the name itself.
        assert_eq!(decl.span(), Span::new(13, 18));
    }

    #[test]
    fn test_method_void_and_nonvoid() {
        let decl = parse_head("public void Run(int count, string name)\n");
        assert_eq!(decl.kind, DeclarationKind::Method);
        assert_eq!(decl.returns, ReturnKind::Void);
        assert_eq!(decl.parameters, vec!["count", "name"]);

        let decl = parse_head("internal Dictionary<string, int> Tally(ref int seed)\n");
        assert_eq!(decl.kind, DeclarationKind::Method);
        assert_eq!(decl.returns, ReturnKind::NonVoid);
        assert_eq!(decl.parameters, vec!["seed"]);
        assert_eq!(decl.visibility, Visibility::Internal);
    }

    #[test]
    fn test_generic_method() {
        let decl = parse_head("public T First<T>(IEnumerable<T> items)\n");
        assert_eq!(decl.kind, DeclarationKind::Method);
        assert_eq!(decl.name, "First");
        assert_eq!(decl.type_parameters, vec!["T"]);
        assert_eq!(decl.parameters, vec!["items"]);
    }

    #[test]
    fn test_constructor() {
        let decl = parse_head("public Widget(string name, int size = 4)\n");
        assert_eq!(decl.kind, DeclarationKind::Constructor);
        assert_eq!(decl.name, "Widget");
        assert_eq!(decl.parameters, vec!["name", "size"]);
    }

    #[test]
    fn test_property_accessors() {
        let decl = parse_head("public int Count { get; private set; }\n");
        assert_eq!(decl.kind, DeclarationKind::Property);
        let shape = decl.accessors.unwrap();
        assert!(shape.has_getter && shape.getter_visible);
        assert!(shape.has_setter && !shape.setter_visible);

        let decl = parse_head("public string Name => this.name;\n");
        let shape = decl.accessors.unwrap();
        assert!(shape.has_getter && !shape.has_setter);
    }

    #[test]
    fn test_indexer() {
        let decl = parse_head("public string this[int index] { get; set; }\n");
        assert_eq!(decl.kind, DeclarationKind::Indexer);
        assert_eq!(decl.parameters, vec!["index"]);
        assert!(decl.accessors.unwrap().has_setter);
    }

    #[test]
    fn test_multi_variable_field_has_span_per_name() {
        let head = "private int first = 1, second, third;\n";
        let decl = parse_head(head);
        assert_eq!(decl.kind, DeclarationKind::Field);
        assert_eq!(decl.identifier_spans.len(), 3);
        for (span, expected) in decl.identifier_spans.iter().zip(["first", "second", "third"]) {
            assert_eq!(&head[span.start..span.end], expected);
        }
    }

    #[test]
    fn test_event() {
        let decl = parse_head("public event EventHandler Changed;\n");
        assert_eq!(decl.kind, DeclarationKind::Event);
        assert_eq!(decl.name, "Changed");
    }

    #[test]
    fn test_attributes_are_skipped() {
        let source = "[Obsolete]\n[DebuggerStepThrough]\npublic void Run()\n";
        let decl = parse(source, 0).unwrap();
        assert_eq!(decl.kind, DeclarationKind::Method);
        assert_eq!(&source[decl.span().start..decl.span().end], "Run");
    }

    #[test]
    fn test_unreadable_head_is_skipped() {
        assert!(parse("~Widget() { }\n", 0).is_none());
        assert!(parse("", 0).is_none());
    }
}
