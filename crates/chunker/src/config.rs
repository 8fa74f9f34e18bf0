use serde::{Deserialize, Serialize};

/// Configuration for code chunking behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Target chunk size in tokens (soft limit governing merges)
    pub target_chunk_tokens: usize,

    /// Maximum chunk size in tokens (hard ceiling forcing descent)
    pub max_chunk_tokens: usize,

    /// Ceiling on visited syntax nodes per file, guarding against
    /// pathological deeply-nested inputs
    pub max_nodes: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            target_chunk_tokens: 512,
            max_chunk_tokens: 1024,
            max_nodes: 200_000,
        }
    }
}

impl ChunkerConfig {
    /// Create config optimized for embeddings (smaller, focused chunks)
    #[must_use]
    pub fn for_embeddings() -> Self {
        Self {
            target_chunk_tokens: 384,
            max_chunk_tokens: 512,
            ..Default::default()
        }
    }

    /// Create config optimized for LLM context (larger, comprehensive chunks)
    #[must_use]
    pub fn for_llm_context() -> Self {
        Self {
            target_chunk_tokens: 1024,
            max_chunk_tokens: 2048,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_tokens == 0 {
            return Err("max_chunk_tokens must be > 0".to_string());
        }

        if self.target_chunk_tokens > self.max_chunk_tokens {
            return Err(format!(
                "target_chunk_tokens ({}) cannot exceed max_chunk_tokens ({})",
                self.target_chunk_tokens, self.max_chunk_tokens
            ));
        }

        if self.max_nodes == 0 {
            return Err("max_nodes must be > 0".to_string());
        }

        Ok(())
    }
}
