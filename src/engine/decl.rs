//! Facts about the declaration a documentation comment is attached to.
//!
//! The host resolves these before calling the engine; the engine never looks
//! at syntax or symbols itself. All fields are read-only per analysis call.

use crate::markup::{MarkupNode, Span};

/// Kind of declaration carrying documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Type,
    Method,
    Constructor,
    Property,
    Indexer,
    Field,
    Event,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Method => "method",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Property => "property",
            DeclarationKind::Indexer => "indexer",
            DeclarationKind::Field => "field",
            DeclarationKind::Event => "event",
        }
    }

    /// Whether this declaration can carry a `<returns>` section.
    pub fn has_return_value(&self) -> bool {
        matches!(self, DeclarationKind::Method)
    }

    /// Whether this declaration has accessors.
    pub fn has_accessors(&self) -> bool {
        matches!(self, DeclarationKind::Property | DeclarationKind::Indexer)
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Return-type classification, as resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    Void,
    NonVoid,
    /// The host could not resolve the return type; return-value checks skip.
    #[default]
    Unknown,
}

/// Effective visibility tier, already resolved by the host against
/// containment nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

/// Accessor shape for properties and indexers.
///
/// "Visible" means visible to the same audience as the containing member:
/// a `private set` on a public property has `setter_visible == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessorShape {
    pub has_getter: bool,
    pub has_setter: bool,
    pub getter_visible: bool,
    pub setter_visible: bool,
}

/// Read-only facts about an annotated declaration.
#[derive(Debug, Clone)]
pub struct DeclarationContext {
    pub name: String,
    pub kind: DeclarationKind,
    /// Ordered declared parameter names (empty if none).
    pub parameters: Vec<String>,
    /// Ordered declared type-parameter names.
    pub type_parameters: Vec<String>,
    pub returns: ReturnKind,
    /// Present only for properties and indexers.
    pub accessors: Option<AccessorShape>,
    pub visibility: Visibility,
    /// Identifier locations. More than one for multi-variable field
    /// declarations, where a finding applies to every declared name.
    pub identifier_spans: Vec<Span>,
}

impl DeclarationContext {
    /// A minimal context for a named declaration, private and span-less.
    /// Useful as a starting point; callers fill in the rest.
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            returns: ReturnKind::Unknown,
            accessors: None,
            visibility: Visibility::Private,
            identifier_spans: vec![Span::default()],
        }
    }

    /// The primary identifier span.
    pub fn span(&self) -> Span {
        self.identifier_spans.first().copied().unwrap_or_default()
    }
}

/// The documentation attached to a declaration.
#[derive(Debug, Clone)]
pub enum DocumentationComment {
    /// Ordered top-level markup nodes parsed from the inline comment.
    Inline(Vec<MarkupNode>),
    /// An `<include file="..." path="..."/>` reference in place of inline
    /// content; resolution happens through an [`IncludeResolver`].
    Included {
        file: String,
        selector: String,
        span: Span,
    },
}

/// Resolves `<include>` references to their fully expanded content.
///
/// Implemented by the host's semantic layer. Resolution is a synchronous,
/// side-effect-free query: `None` means the reference could not be resolved
/// (missing file, bad selector, unresolvable symbol) and the calling rule
/// must skip analysis for that declaration rather than report anything.
pub trait IncludeResolver {
    fn resolve(
        &self,
        declaration: &DeclarationContext,
        file: &str,
        selector: &str,
    ) -> Option<Vec<MarkupNode>>;
}

/// A resolver for hosts without include support: resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeResolver for NoIncludes {
    fn resolve(&self, _: &DeclarationContext, _: &str, _: &str) -> Option<Vec<MarkupNode>> {
        None
    }
}
