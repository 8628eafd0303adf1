//! Docstyle - documentation style checker for C# XML doc comments.
//!
//! Docstyle validates the structure of `///` documentation comments: block
//! versus inline markup consistency, parameter and type-parameter list
//! reconciliation against declaration signatures, required sections, copy-
//! pasted text, and file header conventions.
//!
//! # Architecture
//!
//! The engine is a pure library over parsed inputs; all file reading lives
//! in the host layer:
//!
//! - `markup`: documentation markup tree (nodes, spans, classification)
//! - `engine`: the rules themselves and the driver that dispatches them
//! - `source`: host glue - comment extraction, signature reading, XML
//!   fragment parsing, include resolution
//! - `config`: YAML configuration schema
//! - `report`: output formatting (pretty, JSON)
//!
//! Embedders that have their own syntax layer can skip `source` entirely
//! and call [`engine::Engine::check_declaration`] with their own
//! [`engine::DeclarationContext`] and markup trees.

pub mod cli;
pub mod config;
pub mod engine;
pub mod markup;
pub mod report;
pub mod source;

pub use config::Config;
pub use engine::{Engine, Finding, Rule};
pub use markup::{MarkupNode, Span};
pub use source::Violation;
