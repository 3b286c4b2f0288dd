use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num::Num;
use rayon::prelude::*;
use sprs::CsMat;
use tracing::debug;

use crate::error::{Result, TopicError};

/// NPMI of a word pair that never co-occurs
pub const NO_COOCCURRENCE_NPMI: f64 = -1.0;

/// Topic coherence scorer based on normalized pointwise mutual information
///
/// The marginals are derived once from the document-term matrix:
/// - `pw[w]` - fraction of documents containing word `w`
/// - `pcoo[i, j]` - fraction of documents containing both `i` and `j`
///
/// and reused by every query afterwards.
#[derive(Debug, Clone)]
pub struct Coherence {
    pw: Array1<f64>,
    pcoo: Array2<f64>,
    doc_num: usize,
}

impl Coherence {
    /// Build from a sparse document-term matrix (CSR or CSC)
    ///
    /// # Errors
    /// `EmptyCorpus` when the matrix has no rows.
    pub fn new<N>(matrix: &CsMat<N>) -> Result<Self>
    where
        N: Num + Copy + PartialOrd,
    {
        let (doc_num, word_num) = matrix.shape();
        let mut presence: Vec<Vec<usize>> = vec![Vec::new(); doc_num];
        for (&value, (row, col)) in matrix.iter() {
            // 二値化: count > 0 -> 1
            if value > N::zero() {
                presence[row].push(col);
            }
        }
        Self::from_presence(&presence, doc_num, word_num)
    }

    /// Build from a dense `(D × W)` count matrix
    pub fn from_dense<N>(matrix: ArrayView2<'_, N>) -> Result<Self>
    where
        N: Num + Copy + PartialOrd,
    {
        let (doc_num, word_num) = matrix.dim();
        let presence: Vec<Vec<usize>> = matrix
            .outer_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, v)| **v > N::zero())
                    .map(|(col, _)| col)
                    .collect()
            })
            .collect();
        Self::from_presence(&presence, doc_num, word_num)
    }

    /// `presence[d]` lists each word present in document `d` once
    fn from_presence(presence: &[Vec<usize>], doc_num: usize, word_num: usize) -> Result<Self> {
        if doc_num == 0 {
            return Err(TopicError::empty_corpus(
                "coherence needs at least one document",
            ));
        }
        // coo = Xᵗ·X over the binarized matrix
        let mut coo = Array2::<u64>::zeros((word_num, word_num));
        for words in presence {
            for &i in words {
                for &j in words {
                    coo[[i, j]] += 1;
                }
            }
        }
        let d = doc_num as f64;
        let pw = coo.diag().mapv(|c| c as f64 / d);
        let pcoo = coo.mapv(|c| c as f64 / d);
        debug!(documents = doc_num, words = word_num, "computed coherence marginals");
        Ok(Self { pw, pcoo, doc_num })
    }

    /// D
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.doc_num
    }

    /// W
    #[inline]
    pub fn word_num(&self) -> usize {
        self.pw.len()
    }

    pub fn pw(&self) -> ArrayView1<'_, f64> {
        self.pw.view()
    }

    pub fn pcoo(&self) -> ArrayView2<'_, f64> {
        self.pcoo.view()
    }

    /// NPMI of a word pair
    ///
    /// `ln(pcoo / (pw_i * pw_j)) / -ln(pcoo)`, or `-1` when the pair never
    /// co-occurs. A pair present in every document scores `1`.
    pub fn get_npmi(&self, ix: usize, jx: usize) -> Result<f64> {
        let w = self.word_num();
        for index in [ix, jx] {
            if index >= w {
                return Err(TopicError::index_out_of_range("word", index, w));
            }
        }
        Ok(self.npmi_unchecked(ix, jx))
    }

    #[inline]
    fn npmi_unchecked(&self, ix: usize, jx: usize) -> f64 {
        let coo = self.pcoo[[ix, jx]];
        if coo <= 0.0 {
            return NO_COOCCURRENCE_NPMI;
        }
        if coo >= 1.0 {
            // -ln(1) = 0, the limit of full co-occurrence is 1
            return 1.0;
        }
        let pmi = (coo / (self.pw[ix] * self.pw[jx])).ln();
        pmi / -coo.ln()
    }

    /// Mean NPMI over every unordered pair of a topic's top words
    ///
    /// # Errors
    /// `InsufficientWords` for fewer than two words, `IndexOutOfRange` for a
    /// word id outside the vocabulary.
    pub fn get_topic_coherence(&self, word_indexes: &[usize]) -> Result<f64> {
        let n = word_indexes.len();
        if n < 2 {
            return Err(TopicError::InsufficientWords { found: n });
        }
        let w = self.word_num();
        if let Some(&bad) = word_indexes.iter().find(|&&ix| ix >= w) {
            return Err(TopicError::index_out_of_range("word", bad, w));
        }
        let mut total = 0.0;
        for i in 0..n - 1 {
            for j in i + 1..n {
                total += self.npmi_unchecked(word_indexes[i], word_indexes[j]);
            }
        }
        let pairs = (n * (n - 1) / 2) as f64;
        Ok(total / pairs)
    }

    /// One coherence score per topic, in topic order
    pub fn model_coherence<V>(&self, list_word_indexes: &[V]) -> Result<Vec<f64>>
    where
        V: AsRef<[usize]> + Sync,
    {
        list_word_indexes
            .par_iter()
            .map(|word_indexes| self.get_topic_coherence(word_indexes.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use sprs::TriMat;

    /// cat=0, dog=1, bird=2 over ["cat dog", "dog bird", "cat bird dog"]
    fn example() -> CsMat<u32> {
        let mut tri = TriMat::new((3, 3));
        for &(r, c) in &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            tri.add_triplet(r, c, 1u32);
        }
        tri.to_csr()
    }

    #[test]
    fn marginals() {
        let coh = Coherence::new(&example()).unwrap();
        let pw = coh.pw();
        assert!((pw[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((pw[1] - 1.0).abs() < 1e-12);
        assert!((coh.pcoo()[[0, 1]] - 2.0 / 3.0).abs() < 1e-12);
        assert!((coh.pcoo()[[0, 2]] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(coh.doc_num(), 3);
    }

    #[test]
    fn npmi_values() {
        let coh = Coherence::new(&example()).unwrap();
        // pcoo = 2/3, pw = 2/3 * 1 -> pmi = 0
        assert!(coh.get_npmi(0, 1).unwrap().abs() < 1e-12);
        let expected = (0.75f64).ln() / -(1.0f64 / 3.0).ln();
        assert!((coh.get_npmi(0, 2).unwrap() - expected).abs() < 1e-12);
        assert_eq!(coh.get_npmi(0, 2).unwrap(), coh.get_npmi(2, 0).unwrap());
    }

    #[test]
    fn counts_are_binarized() {
        let dense = array![[3u32, 5, 0], [0, 2, 1], [1, 1, 4]];
        let a = Coherence::from_dense(dense.view()).unwrap();
        let b = Coherence::new(&example()).unwrap();
        assert_eq!(a.pcoo(), b.pcoo());
    }

    #[test]
    fn never_cooccurring_is_minus_one() {
        let coh = Coherence::from_dense(array![[1, 0], [0, 1]].view()).unwrap();
        assert_eq!(coh.get_npmi(0, 1).unwrap(), -1.0);
    }

    #[test]
    fn full_cooccurrence_is_one() {
        let coh = Coherence::from_dense(array![[1, 1], [2, 1]].view()).unwrap();
        assert_eq!(coh.get_npmi(0, 1).unwrap(), 1.0);
    }

    #[test]
    fn topic_coherence_averages_pairs() {
        let coh = Coherence::new(&example()).unwrap();
        let c = coh.get_topic_coherence(&[0, 1, 2]).unwrap();
        let expected = (coh.get_npmi(0, 1).unwrap()
            + coh.get_npmi(0, 2).unwrap()
            + coh.get_npmi(1, 2).unwrap())
            / 3.0;
        assert!((c - expected).abs() < 1e-12);
    }

    #[test]
    fn too_few_words() {
        let coh = Coherence::new(&example()).unwrap();
        assert_eq!(
            coh.get_topic_coherence(&[1]).unwrap_err(),
            TopicError::InsufficientWords { found: 1 }
        );
        assert!(coh.get_topic_coherence(&[]).is_err());
    }

    #[test]
    fn out_of_range_word() {
        let coh = Coherence::new(&example()).unwrap();
        assert!(coh.get_npmi(0, 3).is_err());
        assert!(coh.get_topic_coherence(&[0, 9]).is_err());
    }

    #[test]
    fn model_coherence_keeps_topic_order() {
        let coh = Coherence::new(&example()).unwrap();
        let scores = coh.model_coherence(&[vec![0, 1], vec![0, 2]]).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0], coh.get_topic_coherence(&[0, 1]).unwrap());
        assert_eq!(scores[1], coh.get_topic_coherence(&[0, 2]).unwrap());
        assert!(coh.model_coherence(&[vec![0, 1], vec![2]]).is_err());
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let empty: CsMat<u32> = TriMat::new((0, 3)).to_csr();
        assert!(matches!(Coherence::new(&empty), Err(TopicError::EmptyCorpus { .. })));
    }
}
