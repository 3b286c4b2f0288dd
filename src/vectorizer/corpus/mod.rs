use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CorpusConfig;
use crate::error::Result;
use crate::vectorizer::stopwords::StopWords;

/// Document frequency table of a tokenized corpus
///
/// `counts[word]` is the number of documents containing `word` at least once.
/// Words iterate in first-seen order over the corpus scan. Within one document
/// the distinct words are visited in sorted order, so the table does not depend
/// on token order inside a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    counts: IndexMap<String, u64>,
    /// number of documents scanned (D0)
    doc_num: u64,
}

impl DocumentFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count document frequencies over a whole corpus
    pub fn count<D, T>(corpus: &[D]) -> Self
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut df = Self::new();
        for doc in corpus {
            df.add_document(doc.as_ref());
        }
        debug!(
            documents = df.doc_num,
            unique_words = df.counts.len(),
            "counted document frequencies"
        );
        df
    }

    /// Add one document's tokens
    /// Duplicate tokens in the same document count once.
    pub fn add_document<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        // 文書頻度なので1文書につき1回だけ数える
        let distinct: BTreeSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
        for word in distinct {
            *self.counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    /// Number of documents scanned
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Document frequency of a word, 0 if absent
    #[inline]
    pub fn document_count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Current number of distinct words
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Split the table into kept and excluded words.
    ///
    /// Thresholds are evaluated against the corpus size captured by `count`,
    /// never against a later, smaller document count.
    pub fn filter(self, config: &CorpusConfig, stop_words: &StopWords) -> Result<FilteredFrequency> {
        config.validate()?;
        let doc_num = self.doc_num;
        let (kept, excluded): (IndexMap<String, u64>, IndexMap<String, u64>) = self
            .counts
            .into_iter()
            .partition(|(word, count)| !is_out_of_vocab(word, *count, doc_num, config, stop_words));
        debug!(
            kept = kept.len(),
            excluded = excluded.len(),
            "filtered vocabulary candidates"
        );
        Ok(FilteredFrequency {
            kept,
            excluded,
            original_doc_num: doc_num,
        })
    }
}

/// Too common: relative document frequency at or above the ceiling.
/// Too rare: document frequency at or below the floor.
///
/// A ceiling of exactly 1.0 disables the too-common check, no relative
/// frequency can exceed it.
#[inline]
pub fn is_out_of_frequency(document_count: u64, doc_num: u64, config: &CorpusConfig) -> bool {
    // With an empty corpus no word exists, the ratio is never evaluated.
    let relative = if doc_num == 0 {
        0.0
    } else {
        document_count as f64 / doc_num as f64
    };
    let high_frequency =
        config.max_relative_frequency < 1.0 && relative >= config.max_relative_frequency;
    let low_frequency = document_count <= config.min_absolute_frequency;
    high_frequency || low_frequency
}

#[inline]
fn is_out_of_vocab(
    word: &str,
    document_count: u64,
    doc_num: u64,
    config: &CorpusConfig,
    stop_words: &StopWords,
) -> bool {
    stop_words.contains(word) || is_out_of_frequency(document_count, doc_num, config)
}

/// Document frequency table after stopword and threshold filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredFrequency {
    /// surviving words, original first-seen order
    #[serde(with = "indexmap::map::serde_seq")]
    kept: IndexMap<String, u64>,
    /// excluded words with their document frequency
    #[serde(with = "indexmap::map::serde_seq")]
    excluded: IndexMap<String, u64>,
    original_doc_num: u64,
}

impl FilteredFrequency {
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.kept.contains_key(word)
    }

    #[inline]
    pub fn document_count(&self, word: &str) -> Option<u64> {
        self.kept.get(word).copied()
    }

    #[inline]
    pub fn excluded_count(&self, word: &str) -> Option<u64> {
        self.excluded.get(word).copied()
    }

    /// Kept words in first-seen order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.kept.keys().map(String::as_str)
    }

    pub fn kept(&self) -> &IndexMap<String, u64> {
        &self.kept
    }

    pub fn excluded(&self) -> &IndexMap<String, u64> {
        &self.excluded
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// D0, the corpus size the thresholds were evaluated against
    #[inline]
    pub fn original_doc_num(&self) -> u64 {
        self.original_doc_num
    }
}
