//! Error types for topic_corpus_vectorizer
//!
//! Degenerate inputs that have a defined numeric meaning (an empty vocabulary,
//! a word pair that never co-occurs) are not errors; everything here is either
//! a configuration problem or a query the model cannot answer.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TopicError>;

/// Main error type for topic_corpus_vectorizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopicError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Topic similarity needs at least two topics to compare against
    #[error("Insufficient topics: similarity needs at least 2 topics, found {found}")]
    InsufficientTopics { found: usize },

    /// Topic coherence needs at least two top words to form a pair
    #[error("Insufficient words: coherence needs at least 2 top words, found {found}")]
    InsufficientWords { found: usize },

    /// A topic, word or document id outside the model
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// No documents to compute statistics over
    #[error("Empty corpus: {message}")]
    EmptyCorpus { message: String },

    /// Matrices with incompatible dimensions
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// JSON / CBOR serialization or deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The topic-naming collaborator failed or returned an unusable answer
    #[error("Topic naming failed: {message}")]
    Naming { message: String },

    /// Internal consistency violation (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TopicError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn index_out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { what, index, len }
    }

    /// Create an empty corpus error
    pub fn empty_corpus(message: impl Into<String>) -> Self {
        Self::EmptyCorpus {
            message: message.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a naming error
    pub fn naming(message: impl Into<String>) -> Self {
        Self::Naming {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Errors raised by the topic-naming collaborator.
    /// These never originate from vectorization or scoring.
    pub fn is_naming_failure(&self) -> bool {
        matches!(self, Self::Naming { .. })
    }
}

impl From<serde_json::Error> for TopicError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<serde_cbor::Error> for TopicError {
    fn from(err: serde_cbor::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TopicError::InsufficientWords { found: 1 };
        assert!(err.to_string().contains("at least 2 top words"));
        assert!(err.to_string().contains("found 1"));

        let err = TopicError::index_out_of_range("topic", 7, 3);
        assert_eq!(err.to_string(), "topic index 7 out of range (len 3)");
    }

    #[test]
    fn test_is_naming_failure() {
        assert!(TopicError::naming("timeout").is_naming_failure());
        assert!(!TopicError::internal("oops").is_naming_failure());
    }

    #[test]
    fn test_from_serde_json() {
        let err: TopicError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, TopicError::Serialization { .. }));
    }
}
