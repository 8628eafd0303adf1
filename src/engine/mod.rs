//! The documentation rule engine.
//!
//! Pure analysis over parsed markup trees and declaration facts: no file IO,
//! no syntax parsing. Hosts hand in a [`DeclarationContext`], a
//! [`DocumentationComment`], and an [`IncludeResolver`], and get back
//! findings.

pub mod blocks;
pub mod cancel;
pub mod decl;
pub mod driver;
pub mod duplicate;
pub mod elements;
pub mod header;
pub mod messages;
pub mod params;
pub mod types;

pub use cancel::{CancelToken, Cancelled};
pub use decl::{
    AccessorShape, DeclarationContext, DeclarationKind, DocumentationComment, IncludeResolver,
    NoIncludes, ReturnKind, Visibility,
};
pub use driver::Engine;
pub use types::{Finding, Rule, ALL_RULES};
