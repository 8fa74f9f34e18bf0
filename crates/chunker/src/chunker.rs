use std::sync::Arc;

use carver_syntax::{parse, Language};

use crate::classify::classifier_for;
use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::header;
use crate::merge::re_merge;
use crate::split::Splitter;
use crate::tokens::{HeuristicCounter, TokenCounter};
use crate::types::FinalChunk;

/// Main chunking interface
///
/// A pure, deterministic function from (file content, language, budgets) to
/// an ordered list of chunks. Nothing is shared or mutated across calls, so
/// one `Chunker` may serve many files in parallel.
pub struct Chunker {
    config: ChunkerConfig,
    counter: Arc<dyn TokenCounter>,
}

impl Chunker {
    /// Create a new chunker with configuration
    ///
    /// Uses the built-in character-heuristic token counter until
    /// [`with_counter`](Self::with_counter) swaps in a real one.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self {
            config,
            counter: Arc::new(HeuristicCounter),
        })
    }

    /// Replace the token counter backing all budget decisions
    #[must_use]
    pub fn with_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.counter = counter;
        self
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Chunk code with explicit language
    ///
    /// Chunk ids are positional: `{file_path}__{ordinal}`. The same path and
    /// ordinal slot always produce the same id even if the underlying text
    /// changes; changing the file path alone changes every id for the file.
    pub fn chunk(
        &self,
        file_path: &str,
        content: &str,
        language: Language,
    ) -> Result<Vec<FinalChunk>> {
        let classifier = classifier_for(language);
        let tree = parse(language, content)?;

        let splitter = Splitter::new(content, classifier, self.counter.as_ref(), &self.config);
        let fragments = splitter.split_file(tree.root())?;
        let candidates = re_merge(
            fragments,
            content,
            classifier,
            self.config.target_chunk_tokens,
        );

        let chunks: Vec<FinalChunk> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let header = header::render(file_path, &candidate.scope_paths);
                let body = &content[candidate.start_byte..candidate.end_byte];
                FinalChunk {
                    id: format!("{file_path}__{index}"),
                    file_path: file_path.to_string(),
                    content: format!("{header}{body}"),
                    start_line: candidate.start_line,
                    end_line: candidate.end_line,
                }
            })
            .collect();

        log::debug!(
            "chunked {file_path} ({language}): {} chunks from {} bytes",
            chunks.len(),
            content.len()
        );

        Ok(chunks)
    }

    /// Chunk code from a string, detecting the language from the file path
    pub fn chunk_str(&self, content: &str, file_path: &str) -> Result<Vec<FinalChunk>> {
        let language = Language::from_path(file_path)
            .ok_or_else(|| ChunkerError::unsupported_language(file_path))?;
        self.chunk(file_path, content, language)
    }

    /// Get statistics about chunking output
    #[must_use]
    pub fn stats(chunks: &[FinalChunk]) -> ChunkingStats {
        let sizes: Vec<usize> = chunks.iter().map(|chunk| chunk.content.len()).collect();
        ChunkingStats {
            total_chunks: chunks.len(),
            total_lines: chunks.iter().map(FinalChunk::line_count).sum(),
            total_bytes: sizes.iter().sum(),
            avg_bytes_per_chunk: if sizes.is_empty() {
                0
            } else {
                sizes.iter().sum::<usize>() / sizes.len()
            },
            min_bytes: sizes.iter().copied().min().unwrap_or(0),
            max_bytes: sizes.iter().copied().max().unwrap_or(0),
        }
    }
}

// Derive is impossible over the Arc'd counter; elide it.
impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Statistics about chunking results
#[derive(Debug, Clone)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_lines: usize,
    pub total_bytes: usize,
    pub avg_bytes_per_chunk: usize,
    pub min_bytes: usize,
    pub max_bytes: usize,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Lines: {} | Bytes: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_lines,
            self.total_bytes,
            self.avg_bytes_per_chunk,
            self.min_bytes,
            self.max_bytes
        )
    }
}
