use thiserror::Error;

/// Result type for syntax operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Errors that can occur while loading grammars or parsing source text
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// Grammar could not be installed into the parser
    #[error("Failed to load {language} grammar: {reason}")]
    Grammar { language: String, reason: String },

    /// The grammar could not produce a complete tree for the input
    #[error("Parse error for {language}: {reason}")]
    Parse { language: String, reason: String },
}

impl SyntaxError {
    pub fn grammar(language: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Grammar {
            language: language.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(language: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            language: language.into(),
            reason: reason.into(),
        }
    }
}
