use thiserror::Error;

use crate::tokens::TokenCountError;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during code chunking
///
/// All of these are fatal for the file being chunked: either the whole file
/// yields chunks, or it yields none. Callers decide whether to retry, skip,
/// or abort indexing.
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// The grammar could not parse the file content
    #[error("Parse error: {0}")]
    Parse(#[from] carver_syntax::SyntaxError),

    /// No classifier table for the requested language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The token counter failed for a span
    #[error("Token count error: {0}")]
    TokenCount(#[from] TokenCountError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The defensive node ceiling was hit while splitting
    #[error("Node budget exceeded: visited {visited} nodes (limit {limit})")]
    NodeBudgetExceeded { visited: usize, limit: usize },
}

impl ChunkerError {
    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
