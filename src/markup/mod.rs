//! Documentation markup tree model and leaf-level analysis primitives.

pub mod classify;
pub mod node;
pub mod sections;

pub use node::{Attribute, MarkupNode, Span, TextRun};
