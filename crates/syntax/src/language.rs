use std::fmt;
use std::path::Path;

/// Supported source language
///
/// This is a closed set: every variant has a grammar and a classifier table.
/// Unknown file types are rejected before parsing (`from_extension` returns
/// `None`), never mapped to a catch-all variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Json,
    Rust,
    Python,
}

impl Language {
    /// All supported languages, in cache-index order.
    pub const ALL: [Language; 6] = [
        Language::TypeScript,
        Language::Tsx,
        Language::JavaScript,
        Language::Json,
        Language::Rust,
        Language::Python,
    ];

    /// Detect language from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            // The JavaScript grammar parses JSX natively.
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "json" | "jsonc" => Some(Language::Json),
            "rs" => Some(Language::Rust),
            "py" | "pyw" | "pyi" => Some(Language::Python),
            _ => None,
        }
    }

    /// Detect language from a file path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get language name as string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::JavaScript => "javascript",
            Language::Json => "json",
            Language::Rust => "rust",
            Language::Python => "python",
        }
    }

    /// Stable index into per-language caches
    pub(crate) fn cache_index(self) -> usize {
        match self {
            Language::TypeScript => 0,
            Language::Tsx => 1,
            Language::JavaScript => 2,
            Language::Json => 3,
            Language::Rust => 4,
            Language::Python => 5,
        }
    }

    /// Build the tree-sitter grammar object for this language
    pub(crate) fn load_grammar(self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Json => tree_sitter_json::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
