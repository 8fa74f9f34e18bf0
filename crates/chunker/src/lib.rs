//! # Carver Chunker
//!
//! AST-driven, token-budget-bounded code chunking for semantic retrieval.
//!
//! ## Philosophy
//!
//! Chunk quality drives search relevance, so chunk boundaries follow the
//! syntax tree rather than line counts:
//! - Constructs that fit the hard budget stay intact, however they nest
//! - Oversized constructs are decomposed so their children get their own
//!   chance to qualify
//! - Closing punctuation attaches to the chunk it closes, never to the next
//! - Every chunk body is a verbatim byte slice of the source file
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     │
//!     ├──> Tree-sitter Parsing → AST        (carver-syntax)
//!     │
//!     ├──> Split: recursive descent
//!     │    ├─> classify nodes (wanted / scope / import, per language)
//!     │    ├─> keep small wanted nodes whole, recurse into large ones
//!     │    └─> emit gap fragments so every byte is covered
//!     │
//!     ├──> Merge: budget-aware fold
//!     │    ├─> glue closing syntax backward, buffer gaps forward
//!     │    └─> grow chunks up to the soft target
//!     │
//!     └──> Finalize
//!          ├─> render context header (file path + scope breadcrumbs)
//!          └─> assign positional ids → FinalChunk[]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use carver_chunker::{Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
//!
//! let code = r#"
//! fn process_data(input: &str) -> String {
//!     input.trim().to_uppercase()
//! }
//! "#;
//!
//! let chunks = chunker.chunk_str(code, "example.rs").unwrap();
//! for chunk in chunks {
//!     println!("{} spans lines {}-{}", chunk.id, chunk.start_line, chunk.end_line);
//! }
//! ```

mod chunker;
mod classify;
mod config;
mod error;
mod header;
mod merge;
mod split;
mod tokens;
mod types;

pub use chunker::{Chunker, ChunkingStats};
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use tokens::{HeuristicCounter, TokenCountError, TokenCounter};
pub use types::FinalChunk;

pub use carver_syntax::Language;
