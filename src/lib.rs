/// This crate turns tokenized documents into a document-term matrix for
/// topic modeling and scores the fitted topics.
pub mod config;
pub mod error;
pub mod metrics;
pub mod topic;
pub mod vectorizer;

/// Corpus Processor
/// The top-level pipeline of this crate.
/// It converts a tokenized corpus into a filtered vocabulary and a sparse
/// document-term matrix:
/// - document frequency counting
/// - stopword and frequency filtering
/// - vocabulary id assignment in first-seen order
/// - document refinement and matrix assembly
///
/// `ProcessedCorpus` holds every stage's output.
pub use vectorizer::{CorpusProcessor, ProcessedCorpus};

/// Filtering thresholds and training run parameters
pub use config::{parse_run_configs, CorpusConfig, RunConfig};

/// Error type shared by every fallible operation
pub use error::{Result, TopicError};

/// Token Frequency structure
/// Counts occurrences of each token within one document, keeping
/// first-insertion order.
pub use vectorizer::token::TokenFrequency;

/// Document frequency before and after filtering
pub use vectorizer::corpus::{DocumentFrequency, FilteredFrequency};

/// Word <-> id mapping of the filtered vocabulary
pub use vectorizer::vocab::Vocabulary;

pub use vectorizer::stopwords::StopWords;
pub use vectorizer::tokenizer::TextPreProcessor;

/// Sparse (documents × words) count matrix and the refined documents
pub use vectorizer::document::{DocTermMatrix, VectorizedCorpus};

/// Topic Similarity and Coherence
/// - `Similarity`: cosine similarity of each topic to the others, lower is more distinct
/// - `Coherence`: mean NPMI of a topic's top words, higher is more coherent
pub use metrics::coherence::Coherence;
pub use metrics::similarity::{Aggregation, Similarity};

/// Topic inference seam
/// A `TopicEngine` fits `FittedTopics` over a `DocTermMatrix`. The crate only
/// consumes the fit; `TopicAnalyser` reads top words and documents from it.
pub use topic::analyser::TopicAnalyser;
pub use topic::engine::{FittedTopics, InferenceParams, TopicEngine};

/// Topic naming contract
pub use topic::naming::{
    ChatRequest, ChatResponse, ChatTopicNamer, ChatTransport, NamingClientConfig, NamingRequest, TopicLabel,
};
