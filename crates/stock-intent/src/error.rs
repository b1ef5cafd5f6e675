//! Error types for the stock-intent crate.

use thiserror::Error;

/// Errors raised while building a parser or resolving an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// The quantity capture is present but does not fit a non-negative
    /// 32-bit integer.
    #[error("invalid quantity: {text}")]
    InvalidQuantity {
        /// Raw captured quantity text.
        text: String,
    },

    /// The synonym table is empty so no keyword alternation can be built.
    #[error("synonym table contains no keywords")]
    EmptyVocabulary,

    /// The generated command pattern failed to compile.
    #[error("command pattern failed to compile: {message}")]
    Pattern {
        /// Compiler diagnostic from the regex engine.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_quantity_formats_correctly() {
        let err = IntentError::InvalidQuantity {
            text: "99999999999".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid quantity: 99999999999");
    }

    #[test]
    fn empty_vocabulary_formats_correctly() {
        assert_eq!(
            IntentError::EmptyVocabulary.to_string(),
            "synonym table contains no keywords"
        );
    }
}
