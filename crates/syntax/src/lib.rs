//! # Carver Syntax
//!
//! Thin adapter over tree-sitter for the carver chunking engine.
//!
//! The chunker never talks to tree-sitter directly; it goes through this
//! crate, which owns the closed set of supported languages, loads and caches
//! grammar objects lazily, and exposes a small node-walking surface
//! (children collection, byte-slice text, offset-to-line mapping).
//!
//! ```text
//! (Language, &str)
//!     │
//!     ├──> grammar cache (lazy, per process)
//!     │
//!     └──> parse() → SyntaxTree → root Node
//! ```
//!
//! Parsing is all-or-nothing: a tree containing error nodes is rejected so
//! that downstream consumers never operate on a partial parse.

mod error;
mod language;
mod node;
mod parser;

pub use error::{Result, SyntaxError};
pub use language::Language;
pub use node::{children, named_children, node_text, LineIndex};
pub use parser::{parse, SyntaxTree};

// The chunker's classifier and splitter operate on nodes directly.
pub use tree_sitter::Node;
