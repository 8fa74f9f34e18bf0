use tree_sitter::Node;

/// Collect all children of a node, in order, including anonymous tokens
///
/// Traversal that must tile a node's byte range needs the anonymous
/// punctuation/keyword tokens, not just the named children.
#[must_use]
pub fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Collect the named children of a node, in order
#[must_use]
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// The verbatim source text a node spans
#[must_use]
pub fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Byte-offset to line-number mapping for one source file
///
/// Node positions come for free from tree-sitter, but spans synthesized
/// between nodes (inter-token whitespace) need their own lookup.
/// Lines are 1-indexed, matching node positions as used by the chunker.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-indexed line containing the given byte offset
    ///
    /// Offsets past the end of the text map to the last line.
    #[must_use]
    pub fn line_at(&self, byte_offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= byte_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Language};
    use pretty_assertions::assert_eq;

    #[test]
    fn children_include_anonymous_tokens() {
        let source = "{\"a\": 1}";
        let tree = parse(Language::Json, source).unwrap();
        let object = children(tree.root())[0];
        assert_eq!(object.kind(), "object");

        let kinds: Vec<_> = children(object).iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["{", "pair", "}"]);

        let named: Vec<_> = named_children(object).iter().map(|n| n.kind()).collect();
        assert_eq!(named, vec!["pair"]);
    }

    #[test]
    fn node_text_is_a_verbatim_slice() {
        let source = "fn main() {}\n";
        let tree = parse(Language::Rust, source).unwrap();
        let func = children(tree.root())[0];
        assert_eq!(node_text(func, source), "fn main() {}");
    }

    #[test]
    fn line_index_maps_offsets() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_at(0), 1);
        assert_eq!(index.line_at(2), 1); // the newline itself
        assert_eq!(index.line_at(3), 2);
        assert_eq!(index.line_at(6), 3); // empty line
        assert_eq!(index.line_at(7), 4);
        assert_eq!(index.line_at(8), 4);
        assert_eq!(index.line_at(100), 4); // clamped past the end
    }

    #[test]
    fn line_index_of_empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.line_at(0), 1);
    }
}
