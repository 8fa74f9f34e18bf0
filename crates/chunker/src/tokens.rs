use thiserror::Error;

/// Error from a token-counting backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct TokenCountError {
    reason: String,
}

impl TokenCountError {
    /// Create a token count error
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Counts tokens for a span of source text
///
/// Budgets are expressed in whatever unit the counter reports; the chunker
/// only requires that counts are stable for identical text within one call.
/// Implementations backed by a remote tokenizer must tolerate concurrent
/// invocation, since callers chunk whole files in parallel.
pub trait TokenCounter: Send + Sync {
    /// Count tokens in `text`; any failure aborts chunking for the file
    fn count(&self, text: &str) -> std::result::Result<usize, TokenCountError>;
}

/// Character-based token estimate
///
/// Rough estimate: 4 chars per token on average for code. Good enough to
/// drive budgets when no real tokenizer is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCounter;

impl TokenCounter for HeuristicCounter {
    fn count(&self, text: &str) -> std::result::Result<usize, TokenCountError> {
        Ok((text.len() / 4).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_scales_with_length() {
        let counter = HeuristicCounter;
        assert_eq!(counter.count("").unwrap(), 1);
        assert_eq!(counter.count("abcd").unwrap(), 1);
        assert_eq!(counter.count(&"x".repeat(400)).unwrap(), 100);
    }

    #[test]
    fn heuristic_never_reports_zero() {
        let counter = HeuristicCounter;
        assert_eq!(counter.count("ab").unwrap(), 1);
    }
}
