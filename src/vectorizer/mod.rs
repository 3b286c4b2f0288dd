pub mod corpus;
pub mod document;
pub mod stopwords;
pub mod token;
pub mod tokenizer;
pub mod vocab;

use tracing::{info, warn};

use crate::config::CorpusConfig;
use crate::error::Result;
use crate::vectorizer::{
    corpus::{DocumentFrequency, FilteredFrequency},
    document::{vectorize, DocTermMatrix, VectorizedCorpus},
    stopwords::StopWords,
    vocab::Vocabulary,
};

/// Corpus to document-term matrix pipeline
///
/// Stages, each a pure function of the previous stage's output:
/// 1. `DocumentFrequency::count` - document frequency per word
/// 2. `DocumentFrequency::filter` - stopwords, too common, too rare
/// 3. `Vocabulary::from_filtered` - ids in first-seen order
/// 4. `document::vectorize` - refined documents and the sparse matrix
///
/// The processor itself holds only configuration and can be reused for any
/// number of corpora.
#[derive(Debug, Clone)]
pub struct CorpusProcessor {
    config: CorpusConfig,
    stop_words: StopWords,
}

impl Default for CorpusProcessor {
    /// Default thresholds with the English stopword list
    fn default() -> Self {
        Self {
            config: CorpusConfig::default(),
            stop_words: StopWords::english(),
        }
    }
}

impl CorpusProcessor {
    pub fn new(config: CorpusConfig, stop_words: StopWords) -> Self {
        Self { config, stop_words }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Run every stage over a tokenized corpus
    ///
    /// An empty vocabulary is not an error: the result then has zero rows
    /// and zero columns, check `ProcessedCorpus::is_empty` before fitting.
    pub fn process<D, T>(&self, corpus: &[D]) -> Result<ProcessedCorpus>
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let frequencies = DocumentFrequency::count(corpus).filter(&self.config, &self.stop_words)?;
        let vocabulary = Vocabulary::from_filtered(&frequencies);
        if vocabulary.is_empty() {
            warn!(
                documents = corpus.len(),
                "vocabulary is empty after filtering, every document will be dropped"
            );
        }
        let vectorized = vectorize(corpus, &frequencies, &vocabulary)?;
        info!(
            original_documents = corpus.len(),
            documents = vectorized.doc_num(),
            vocabulary = vocabulary.len(),
            "processed corpus"
        );
        Ok(ProcessedCorpus {
            frequencies,
            vocabulary,
            vectorized,
        })
    }
}

/// Immutable result of `CorpusProcessor::process`
#[derive(Debug, Clone)]
pub struct ProcessedCorpus {
    frequencies: FilteredFrequency,
    vocabulary: Vocabulary,
    vectorized: VectorizedCorpus,
}

impl ProcessedCorpus {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Kept and excluded document frequency tables
    pub fn frequencies(&self) -> &FilteredFrequency {
        &self.frequencies
    }

    /// Filtered documents, empty ones removed
    pub fn documents(&self) -> &[Vec<String>] {
        self.vectorized.documents()
    }

    pub fn dropped_documents(&self) -> &[usize] {
        self.vectorized.dropped_documents()
    }

    /// `(D_filtered, W)` document-term counts
    pub fn matrix(&self) -> &DocTermMatrix {
        self.vectorized.matrix()
    }

    /// No document survived, nothing to fit
    pub fn is_empty(&self) -> bool {
        self.vectorized.doc_num() == 0
    }

    pub fn into_parts(self) -> (Vocabulary, FilteredFrequency, VectorizedCorpus) {
        (self.vocabulary, self.frequencies, self.vectorized)
    }
}
