use crate::error::{Result, SyntaxError};
use crate::language::Language;
use once_cell::sync::OnceCell;
use tree_sitter::{Node, Parser};

/// Lazily-built grammar objects, one slot per language, shared for the
/// process lifetime. Grammar construction is cheap but not free; the chunker
/// parses many files per language.
static GRAMMARS: [OnceCell<tree_sitter::Language>; Language::ALL.len()] = [
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
];

/// Get the cached grammar for a language, building it on first use
pub(crate) fn grammar(language: Language) -> &'static tree_sitter::Language {
    GRAMMARS[language.cache_index()].get_or_init(|| language.load_grammar())
}

/// A fully parsed source file
///
/// Owns the tree-sitter tree; nodes borrowed from it are valid for the
/// lifetime of this value, which is scoped to one chunking call.
#[derive(Debug)]
pub struct SyntaxTree {
    tree: tree_sitter::Tree,
}

impl SyntaxTree {
    /// Root node of the parse, spanning the whole input
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Parse source content for a language
///
/// All-or-nothing: if the grammar cannot produce a complete tree (the root
/// contains error or missing nodes), the whole parse is rejected. Partial
/// trees are never handed to the chunker.
pub fn parse(language: Language, content: &str) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser
        .set_language(grammar(language))
        .map_err(|e| SyntaxError::grammar(language.as_str(), e.to_string()))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| SyntaxError::parse(language.as_str(), "parser returned no tree"))?;

    if tree.root_node().has_error() {
        return Err(SyntaxError::parse(
            language.as_str(),
            "source contains syntax errors",
        ));
    }

    Ok(SyntaxTree { tree })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_typescript() {
        let tree = parse(Language::TypeScript, "const x: number = 1;\n").unwrap();
        assert_eq!(tree.root().kind(), "program");
        assert!(tree.root().child_count() > 0);
    }

    #[test]
    fn parses_valid_json() {
        let tree = parse(Language::Json, "{\"a\": 1}").unwrap();
        assert_eq!(tree.root().kind(), "document");
    }

    #[test]
    fn parses_valid_rust() {
        let tree = parse(Language::Rust, "fn main() {}\n").unwrap();
        assert_eq!(tree.root().kind(), "source_file");
    }

    #[test]
    fn rejects_broken_input() {
        let err = parse(Language::Json, "{\"a\": }").unwrap_err();
        assert!(matches!(err, SyntaxError::Parse { .. }));
    }

    #[test]
    fn grammar_cache_returns_same_instance() {
        let a = grammar(Language::Rust) as *const tree_sitter::Language;
        let b = grammar(Language::Rust) as *const tree_sitter::Language;
        assert_eq!(a, b);
    }

    #[test]
    fn every_language_has_a_loadable_grammar() {
        for lang in Language::ALL {
            let mut parser = Parser::new();
            parser
                .set_language(grammar(lang))
                .unwrap_or_else(|e| panic!("grammar for {lang} rejected: {e}"));
        }
    }
}
