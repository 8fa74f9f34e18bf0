use serde::{Deserialize, Serialize};

/// Role of a span in the splitter's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FragmentKind {
    /// A chunkable unit
    Wanted,
    /// Interstitial text that must attach to a neighboring chunk
    Gap,
}

/// An intermediate span produced by the splitter
///
/// Fragments for one file are non-overlapping and, taken together, exactly
/// cover the file's byte range. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub kind: FragmentKind,
    pub start_byte: usize,
    pub end_byte: usize,
    /// 1-indexed, inclusive
    pub start_line: usize,
    /// 1-indexed, inclusive
    pub end_line: usize,
    pub token_count: usize,
    /// Enclosing-construct breadcrumbs; empty for gaps and imports
    pub scope_paths: Vec<Vec<String>>,
}

impl Fragment {
    pub fn gap(
        start_byte: usize,
        end_byte: usize,
        start_line: usize,
        end_line: usize,
        token_count: usize,
    ) -> Self {
        Self {
            kind: FragmentKind::Gap,
            start_byte,
            end_byte,
            start_line,
            end_line,
            token_count,
            scope_paths: Vec::new(),
        }
    }
}

/// A chunk being assembled by the merger
///
/// Same shape as a fragment minus the kind tag; token counts are additive
/// across merges and scope paths keep the first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChunkCandidate {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub token_count: usize,
    pub scope_paths: Vec<Vec<String>>,
}

impl ChunkCandidate {
    pub fn from_fragment(fragment: Fragment) -> Self {
        Self {
            start_byte: fragment.start_byte,
            end_byte: fragment.end_byte,
            start_line: fragment.start_line,
            end_line: fragment.end_line,
            token_count: fragment.token_count,
            scope_paths: fragment.scope_paths,
        }
    }

    /// Fold another candidate into this one
    ///
    /// Offsets and lines widen to the union, token counts add, and scope
    /// paths are deduplicated by structural equality, first occurrence wins.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.start_byte = self.start_byte.min(other.start_byte);
        self.end_byte = self.end_byte.max(other.end_byte);
        self.start_line = self.start_line.min(other.start_line);
        self.end_line = self.end_line.max(other.end_line);
        self.token_count += other.token_count;
        for path in other.scope_paths {
            if !self.scope_paths.contains(&path) {
                self.scope_paths.push(path);
            }
        }
        self
    }
}

/// A finished chunk ready for embedding and storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalChunk {
    /// Positional id: `{file_path}__{ordinal}`
    pub id: String,

    /// Source file path
    pub file_path: String,

    /// Context header followed by a verbatim slice of the source file
    pub content: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,
}

impl FinalChunk {
    /// Get the number of lines this chunk spans in the source file
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wanted(start: usize, end: usize, tokens: usize, paths: &[&[&str]]) -> ChunkCandidate {
        ChunkCandidate {
            start_byte: start,
            end_byte: end,
            start_line: 1,
            end_line: 1,
            token_count: tokens,
            scope_paths: paths
                .iter()
                .map(|p| p.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn merge_widens_span_and_adds_tokens() {
        let merged = wanted(10, 20, 3, &[]).merge(wanted(20, 35, 4, &[]));
        assert_eq!(merged.start_byte, 10);
        assert_eq!(merged.end_byte, 35);
        assert_eq!(merged.token_count, 7);
    }

    #[test]
    fn merge_dedupes_scope_paths_keeping_first_seen_order() {
        let a = wanted(0, 5, 1, &[&["Outer"], &["Outer", "first"]]);
        let b = wanted(5, 9, 1, &[&["Outer", "second"], &["Outer"]]);
        let merged = a.merge(b);
        assert_eq!(
            merged.scope_paths,
            vec![
                vec!["Outer".to_string()],
                vec!["Outer".to_string(), "first".to_string()],
                vec!["Outer".to_string(), "second".to_string()],
            ]
        );
    }

    #[test]
    fn merge_keeps_distinct_paths_with_shared_prefix() {
        let a = wanted(0, 5, 1, &[&["A", "b"]]);
        let b = wanted(5, 9, 1, &[&["A"]]);
        let merged = a.merge(b);
        assert_eq!(merged.scope_paths.len(), 2);
    }

    #[test]
    fn final_chunk_line_count_is_inclusive() {
        let chunk = FinalChunk {
            id: "lib.rs__0".to_string(),
            file_path: "lib.rs".to_string(),
            content: String::new(),
            start_line: 10,
            end_line: 15,
        };
        assert_eq!(chunk.line_count(), 6);
    }
}
