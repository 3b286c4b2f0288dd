use sprs::{CsMat, TriMat};
use tracing::{debug, warn};

use crate::error::{Result, TopicError};
use crate::vectorizer::{corpus::FilteredFrequency, token::TokenFrequency, vocab::Vocabulary};

/// Sparse document-term count matrix, CSR, shape `(D_filtered, W)`
pub type DocTermMatrix = CsMat<u32>;

/// How many dropped document indices are echoed in the warning
const DROPPED_LOG_LIMIT: usize = 10;

/// Output of the document vectorizer
#[derive(Debug, Clone)]
pub struct VectorizedCorpus {
    /// surviving documents, in-vocabulary tokens only, repetitions kept
    documents: Vec<Vec<String>>,
    /// original indices of documents left with no vocabulary word
    dropped: Vec<usize>,
    matrix: DocTermMatrix,
}

impl VectorizedCorpus {
    pub fn documents(&self) -> &[Vec<String>] {
        &self.documents
    }

    /// Diagnostics only, nothing downstream depends on them
    pub fn dropped_documents(&self) -> &[usize] {
        &self.dropped
    }

    pub fn matrix(&self) -> &DocTermMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> DocTermMatrix {
        self.matrix
    }

    /// D_filtered
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.matrix.rows()
    }
}

/// Keep only tokens of the filtered word set, per-token repetition is kept
pub fn refine_document<T>(doc: &[T], filtered: &FilteredFrequency) -> Vec<String>
where
    T: AsRef<str>,
{
    doc.iter()
        .map(|t| t.as_ref())
        .filter(|word| filtered.contains(word))
        .map(str::to_string)
        .collect()
}

/// Build the document-term matrix
///
/// Documents with no surviving token are removed; the rest keep their
/// relative order and are renumbered `0..D_filtered`.
///
/// Counts are aggregated per document before emission, so every `(row, col)`
/// triple is unique and the summation of duplicate triplets done by
/// `TriMat::to_csr` never comes into play.
///
/// # Arguments
/// * `corpus` - the original tokenized corpus
/// * `filtered` - word set that survived filtering
/// * `vocab` - ids for the same word set
///
/// # Errors
/// `TopicError::Internal` if a refined token has no id, meaning `filtered`
/// and `vocab` were not built from the same table.
pub fn vectorize<D, T>(corpus: &[D], filtered: &FilteredFrequency, vocab: &Vocabulary) -> Result<VectorizedCorpus>
where
    D: AsRef<[T]>,
    T: AsRef<str>,
{
    let mut documents = Vec::new();
    let mut dropped = Vec::new();
    for (ix, doc) in corpus.iter().enumerate() {
        let words = refine_document(doc.as_ref(), filtered);
        if words.is_empty() {
            dropped.push(ix);
        } else {
            documents.push(words);
        }
    }
    if !dropped.is_empty() {
        warn!(
            dropped = dropped.len(),
            first = ?&dropped[..dropped.len().min(DROPPED_LOG_LIMIT)],
            "documents with no words in vocabulary were dropped"
        );
    }

    let mut tri = TriMat::new((documents.len(), vocab.len()));
    for (row, doc) in documents.iter().enumerate() {
        let freq = TokenFrequency::from_tokens(doc);
        for (word, count) in freq.iter() {
            let col = vocab.id(word).ok_or_else(|| {
                TopicError::internal(format!("refined word {word:?} is missing from the vocabulary"))
            })?;
            tri.add_triplet(row, col, count);
        }
    }
    let matrix: DocTermMatrix = tri.to_csr();
    debug!(
        rows = matrix.rows(),
        cols = matrix.cols(),
        nnz = matrix.nnz(),
        "assembled document-term matrix"
    );

    Ok(VectorizedCorpus {
        documents,
        dropped,
        matrix,
    })
}

/// Total token count per row
pub fn row_sums(matrix: &DocTermMatrix) -> Vec<u64> {
    matrix
        .outer_iterator()
        .map(|row| row.iter().map(|(_, &v)| v as u64).sum())
        .collect()
}
