use ndarray::Array2;
use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopicError};
use crate::metrics::compare::cosine_similarity;

/// How the `K-1` pairwise similarities of one topic are reduced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Max,
}

/// Topic distinctness scorer
///
/// For every topic the cosine similarity against every other topic is
/// computed; lower scores mean a more distinct topic.
#[derive(Debug, Clone)]
pub struct Similarity<N = f64>
where
    N: Num + Copy + Into<f64>,
{
    /// topic-word matrix, (K × W)
    topic_word: Array2<N>,
}

impl<N> Similarity<N>
where
    N: Num + Copy + Into<f64> + Send + Sync,
{
    /// # Errors
    /// `InsufficientTopics` when the matrix has fewer than two rows.
    pub fn new(topic_word: Array2<N>) -> Result<Self> {
        let k = topic_word.nrows();
        if k < 2 {
            return Err(TopicError::InsufficientTopics { found: k });
        }
        Ok(Self { topic_word })
    }

    /// K
    #[inline]
    pub fn topic_num(&self) -> usize {
        self.topic_word.nrows()
    }

    /// W
    #[inline]
    pub fn word_num(&self) -> usize {
        self.topic_word.ncols()
    }

    /// Cosine similarity of topic `topic_index` to each other topic, in topic
    /// order with `topic_index` itself skipped
    pub fn get_similarity(&self, topic_index: usize) -> Result<Vec<f64>> {
        let k = self.topic_num();
        if topic_index >= k {
            return Err(TopicError::index_out_of_range("topic", topic_index, k));
        }
        Ok(self.similarities(topic_index))
    }

    fn similarities(&self, topic_index: usize) -> Vec<f64> {
        let row = self.topic_word.row(topic_index);
        self.topic_word
            .outer_iter()
            .enumerate()
            .filter(|(other, _)| *other != topic_index)
            .map(|(_, other_row)| cosine_similarity(row.iter().copied(), other_row.iter().copied()))
            .collect()
    }

    /// One aggregated score per topic, in topic order
    pub fn model_similarity(&self, aggregation: Aggregation) -> Vec<f64> {
        (0..self.topic_num())
            .into_par_iter()
            .map(|k| aggregate(&self.similarities(k), aggregation))
            .collect()
    }
}

/// `scores` has K-1 ≥ 1 entries when called from `model_similarity`
fn aggregate(scores: &[f64], aggregation: Aggregation) -> f64 {
    match aggregation {
        Aggregation::Mean => scores.iter().sum::<f64>() / scores.len() as f64,
        Aggregation::Max => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn single_topic_is_rejected() {
        let err = Similarity::new(array![[0.5, 0.5]]).unwrap_err();
        assert_eq!(err, TopicError::InsufficientTopics { found: 1 });
    }

    #[test]
    fn excludes_self_comparison() {
        let sim = Similarity::new(array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        let scores = sim.get_similarity(0).unwrap();
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn mean_and_max() {
        let sim = Similarity::new(array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        let mean = sim.model_similarity(Aggregation::Mean);
        let max = sim.model_similarity(Aggregation::Max);
        assert_eq!(mean.len(), 3);
        assert!((mean[0] - 0.5).abs() < 1e-12);
        assert!((mean[2] - 0.0).abs() < 1e-12);
        assert!((max[0] - 1.0).abs() < 1e-12);
        assert!((max[1] - 1.0).abs() < 1e-12);
        assert_eq!(max[2], 0.0);
    }

    #[test]
    fn identical_topics_of_a_uniform_model() {
        let sim = Similarity::new(Array2::<f64>::from_elem((4, 5), 0.2)).unwrap();
        for score in sim.model_similarity(Aggregation::default()) {
            assert!((score - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn out_of_range_topic() {
        let sim = Similarity::new(array![[1.0f32, 0.0], [0.0, 1.0]]).unwrap();
        assert!(matches!(
            sim.get_similarity(2),
            Err(TopicError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn aggregation_from_json() {
        let agg: Aggregation = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(agg, Aggregation::Max);
    }
}
