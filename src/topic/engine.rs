use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopicError};
use crate::vectorizer::document::DocTermMatrix;

/// Hyperparameters of an LDA-style fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceParams {
    /// K
    pub n_topics: usize,
    pub n_iters: usize,
    /// document-topic prior
    pub alpha: f64,
    /// topic-word prior
    pub eta: f64,
}

impl InferenceParams {
    /// # Errors
    /// `InsufficientTopics` for `n_topics < 2`, `InvalidConfig` for
    /// non-positive priors or zero iterations.
    pub fn new(n_topics: usize, n_iters: usize, alpha: f64, eta: f64) -> Result<Self> {
        if n_topics < 2 {
            return Err(TopicError::InsufficientTopics { found: n_topics });
        }
        if n_iters == 0 {
            return Err(TopicError::invalid_config("n_iters must be positive"));
        }
        if !(alpha > 0.0 && eta > 0.0) {
            return Err(TopicError::invalid_config(format!(
                "priors must be positive, got alpha={alpha} eta={eta}"
            )));
        }
        Ok(Self {
            n_topics,
            n_iters,
            alpha,
            eta,
        })
    }
}

/// Output of a topic engine
///
/// - `topic_word`: (K × W), row k is topic k's distribution over the vocabulary
/// - `doc_topic`: (D × K), row d is document d's distribution over topics
#[derive(Debug, Clone, PartialEq)]
pub struct FittedTopics {
    topic_word: Array2<f64>,
    doc_topic: Array2<f64>,
}

impl FittedTopics {
    /// Rows are not re-normalized; only the shared K is checked.
    pub fn new(topic_word: Array2<f64>, doc_topic: Array2<f64>) -> Result<Self> {
        if topic_word.nrows() != doc_topic.ncols() {
            return Err(TopicError::shape_mismatch(format!(
                "topic-word has {} topics but document-topic has {}",
                topic_word.nrows(),
                doc_topic.ncols()
            )));
        }
        Ok(Self {
            topic_word,
            doc_topic,
        })
    }

    /// Check the fit against the matrix it was trained on
    pub fn check_against(&self, matrix: &DocTermMatrix) -> Result<()> {
        let (docs, words) = matrix.shape();
        if self.topic_word.ncols() != words || self.doc_topic.nrows() != docs {
            return Err(TopicError::shape_mismatch(format!(
                "fit is {} docs × {} words, matrix is {} × {}",
                self.doc_topic.nrows(),
                self.topic_word.ncols(),
                docs,
                words
            )));
        }
        Ok(())
    }

    pub fn topic_word(&self) -> &Array2<f64> {
        &self.topic_word
    }

    pub fn doc_topic(&self) -> &Array2<f64> {
        &self.doc_topic
    }

    /// K
    pub fn topic_num(&self) -> usize {
        self.topic_word.nrows()
    }

    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>) {
        (self.topic_word, self.doc_topic)
    }
}

/// External topic-inference engine
///
/// Implementations fit `params.n_topics` topics over the document-term
/// matrix. Nothing in this crate depends on how the fit is done.
pub trait TopicEngine {
    fn fit(&self, matrix: &DocTermMatrix, params: &InferenceParams) -> Result<FittedTopics>;
}
