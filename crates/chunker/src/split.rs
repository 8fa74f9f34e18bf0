use std::cell::Cell;

use carver_syntax::{children, node_text, LineIndex, Node};

use crate::classify::NodeClassifier;
use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::tokens::TokenCounter;
use crate::types::{Fragment, FragmentKind};

/// Recursive descent over one file's syntax tree
///
/// Produces an ordered fragment list that exactly tiles the file's byte
/// range: wanted nodes small enough for the hard budget become single
/// fragments, oversized nodes are decomposed so their children get their own
/// chance to qualify, and everything in between becomes a gap. Each call
/// returns a fresh list; nothing is shared across sibling subtrees.
pub(crate) struct Splitter<'a> {
    source: &'a str,
    classifier: &'static NodeClassifier,
    counter: &'a dyn TokenCounter,
    max_chunk_tokens: usize,
    max_nodes: usize,
    lines: LineIndex,
    visited: Cell<usize>,
}

impl<'a> Splitter<'a> {
    pub fn new(
        source: &'a str,
        classifier: &'static NodeClassifier,
        counter: &'a dyn TokenCounter,
        config: &ChunkerConfig,
    ) -> Self {
        Self {
            source,
            classifier,
            counter,
            max_chunk_tokens: config.max_chunk_tokens,
            max_nodes: config.max_nodes,
            lines: LineIndex::new(source),
            visited: Cell::new(0),
        }
    }

    /// Split the whole file, covering any slack around the root node
    pub fn split_file(&self, root: Node<'_>) -> Result<Vec<Fragment>> {
        let mut fragments = self.filler(0, root.start_byte())?;
        fragments.extend(self.split(root, &[])?);
        fragments.extend(self.filler(root.end_byte(), self.source.len())?);
        Ok(fragments)
    }

    fn split(&self, node: Node<'_>, scope: &[String]) -> Result<Vec<Fragment>> {
        self.visit()?;

        let token_count = self.counter.count(node_text(node, self.source))?;

        let kind = node.kind();
        let is_wanted = self.classifier.is_wanted(kind);
        let is_scope = self.classifier.is_scope(kind);
        let is_import = self.classifier.is_import(kind);

        let pushed = (is_scope && !is_import).then(|| {
            let mut path = scope.to_vec();
            path.push(self.classifier.name_of(node, self.source));
            path
        });
        let next_scope = pushed.as_deref().unwrap_or(scope);

        let child_nodes = children(node);

        // A wanted node within the hard budget (or atomic) becomes exactly
        // one fragment, regardless of internal structure.
        if is_wanted && (token_count <= self.max_chunk_tokens || child_nodes.is_empty()) {
            let scope_paths = if is_import {
                Vec::new()
            } else {
                vec![next_scope.to_vec()]
            };
            return Ok(vec![Fragment {
                kind: FragmentKind::Wanted,
                start_byte: node.start_byte(),
                end_byte: node.end_byte(),
                start_line: node.start_position().row + 1,
                end_line: node.end_position().row + 1,
                token_count,
                scope_paths,
            }]);
        }

        if child_nodes.is_empty() {
            return Ok(self.leaf_gap(node, token_count));
        }

        // Children do not tile their parent: the spans between them
        // (inter-token whitespace, comments the grammar drops) become gaps
        // so the output still covers every byte.
        let mut fragments = Vec::new();
        let mut covered = node.start_byte();
        for child in child_nodes {
            fragments.extend(self.filler(covered, child.start_byte())?);
            fragments.extend(self.split(child, next_scope)?);
            covered = child.end_byte().max(covered);
        }
        fragments.extend(self.filler(covered, node.end_byte())?);
        Ok(fragments)
    }

    fn leaf_gap(&self, node: Node<'_>, token_count: usize) -> Vec<Fragment> {
        if node.start_byte() == node.end_byte() {
            return Vec::new();
        }
        vec![Fragment::gap(
            node.start_byte(),
            node.end_byte(),
            node.start_position().row + 1,
            node.end_position().row + 1,
            token_count,
        )]
    }

    fn filler(&self, start: usize, end: usize) -> Result<Vec<Fragment>> {
        if start >= end {
            return Ok(Vec::new());
        }
        let token_count = self.counter.count(&self.source[start..end])?;
        Ok(vec![Fragment::gap(
            start,
            end,
            self.lines.line_at(start),
            self.lines.line_at(end - 1),
            token_count,
        )])
    }

    fn visit(&self) -> Result<()> {
        let visited = self.visited.get() + 1;
        self.visited.set(visited);
        if visited > self.max_nodes {
            return Err(ChunkerError::NodeBudgetExceeded {
                visited,
                limit: self.max_nodes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classifier_for;
    use crate::tokens::TokenCountError;
    use carver_syntax::{parse, Language};
    use pretty_assertions::assert_eq;

    /// One token per byte, so budgets translate directly into span widths
    struct ByteCounter;

    impl TokenCounter for ByteCounter {
        fn count(&self, text: &str) -> std::result::Result<usize, TokenCountError> {
            Ok(text.len())
        }
    }

    struct FailingCounter;

    impl TokenCounter for FailingCounter {
        fn count(&self, _text: &str) -> std::result::Result<usize, TokenCountError> {
            Err(TokenCountError::new("counter offline"))
        }
    }

    fn split_source(
        language: Language,
        source: &str,
        max_chunk_tokens: usize,
    ) -> Vec<Fragment> {
        let config = ChunkerConfig {
            target_chunk_tokens: max_chunk_tokens,
            max_chunk_tokens,
            ..Default::default()
        };
        let tree = parse(language, source).unwrap();
        let splitter = Splitter::new(source, classifier_for(language), &ByteCounter, &config);
        splitter.split_file(tree.root()).unwrap()
    }

    fn assert_tiles(fragments: &[Fragment], len: usize) {
        let mut covered = 0;
        for fragment in fragments {
            assert_eq!(fragment.start_byte, covered, "hole or overlap in {fragments:#?}");
            assert!(fragment.end_byte > fragment.start_byte);
            covered = fragment.end_byte;
        }
        assert_eq!(covered, len);
    }

    #[test]
    fn fragments_tile_the_file() {
        let source = "use std::fmt;\n\n/// Doc line\nfn run() -> i32 {\n    1\n}\n\nstruct Pair {\n    left: i32,\n    right: i32,\n}\n";
        for max in [8, 64, 4096] {
            let fragments = split_source(Language::Rust, source, max);
            assert_tiles(&fragments, source.len());
        }
    }

    #[test]
    fn fragments_tile_markup_sources() {
        let source = "const view = (\n  <section>\n    <p>hello</p>\n  </section>\n);\n";
        for max in [4, 32, 4096] {
            let fragments = split_source(Language::Tsx, source, max);
            assert_tiles(&fragments, source.len());
        }
    }

    #[test]
    fn small_wanted_node_becomes_one_fragment() {
        let source = "fn main() {}\n";
        let fragments = split_source(Language::Rust, source, 4096);

        assert_eq!(fragments[0].kind, FragmentKind::Wanted);
        assert_eq!(&source[fragments[0].start_byte..fragments[0].end_byte], "fn main() {}");
        assert_eq!(fragments[0].scope_paths, vec![vec!["main".to_string()]]);

        // Only the trailing newline remains as a gap.
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1].kind, FragmentKind::Gap);
    }

    #[test]
    fn oversized_node_descends_to_children() {
        let source = "class Outer {\n  a() { return 1; }\n  b() { return 2; }\n}\n";
        let fragments = split_source(Language::TypeScript, source, 30);

        let method_paths: Vec<_> = fragments
            .iter()
            .filter(|f| f.kind == FragmentKind::Wanted)
            .flat_map(|f| f.scope_paths.clone())
            .collect();
        assert!(method_paths.contains(&vec!["Outer".to_string(), "a".to_string()]));
        assert!(method_paths.contains(&vec!["Outer".to_string(), "b".to_string()]));

        // The class itself was too large to stay intact.
        assert!(fragments
            .iter()
            .all(|f| &source[f.start_byte..f.end_byte] != source.trim_end()));
    }

    #[test]
    fn import_fragments_carry_no_scope_paths() {
        let source = "use std::fmt;\nfn run() {}\n";
        let fragments = split_source(Language::Rust, source, 4096);

        let import = fragments
            .iter()
            .find(|f| &source[f.start_byte..f.end_byte] == "use std::fmt;")
            .unwrap();
        assert_eq!(import.kind, FragmentKind::Wanted);
        assert!(import.scope_paths.is_empty());
    }

    #[test]
    fn empty_file_yields_no_fragments() {
        let fragments = split_source(Language::Rust, "", 4096);
        assert!(fragments.is_empty());
    }

    #[test]
    fn node_ceiling_aborts_pathological_descent() {
        let source = "fn a() { if true { if true { if true {} } } }\n";
        let config = ChunkerConfig {
            target_chunk_tokens: 1,
            max_chunk_tokens: 1,
            max_nodes: 3,
        };
        let tree = parse(Language::Rust, source).unwrap();
        let splitter = Splitter::new(
            source,
            classifier_for(Language::Rust),
            &ByteCounter,
            &config,
        );
        let err = splitter.split_file(tree.root()).unwrap_err();
        assert!(matches!(err, ChunkerError::NodeBudgetExceeded { limit: 3, .. }));
    }

    #[test]
    fn counter_failure_aborts_the_split() {
        let source = "fn main() {}\n";
        let config = ChunkerConfig::default();
        let tree = parse(Language::Rust, source).unwrap();
        let splitter = Splitter::new(
            source,
            classifier_for(Language::Rust),
            &FailingCounter,
            &config,
        );
        let err = splitter.split_file(tree.root()).unwrap_err();
        assert!(matches!(err, ChunkerError::TokenCount(_)));
    }
}
