use serde::{Deserialize, Serialize};

use crate::error::{Result, TopicError};
use crate::topic::engine::InferenceParams;

/// Frequency thresholds for vocabulary construction
///
/// A word is excluded when
/// - `document_frequency / D0 >= max_relative_frequency` (too common, never
///   at a ceiling of 1.0), or
/// - `document_frequency <= min_absolute_frequency` (too rare)
///
/// where `D0` is the size of the corpus before any document is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Relative document frequency at which a word is considered too common (0.0 ~ 1.0)
    pub max_relative_frequency: f64,
    /// Document count at or below which a word is considered too rare
    pub min_absolute_frequency: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_relative_frequency: 0.9,
            min_absolute_frequency: 5,
        }
    }
}

impl CorpusConfig {
    pub fn new(max_relative_frequency: f64, min_absolute_frequency: u64) -> Self {
        Self {
            max_relative_frequency,
            min_absolute_frequency,
        }
    }

    pub fn with_max_relative_frequency(mut self, max_relative_frequency: f64) -> Self {
        self.max_relative_frequency = max_relative_frequency;
        self
    }

    pub fn with_min_absolute_frequency(mut self, min_absolute_frequency: u64) -> Self {
        self.min_absolute_frequency = min_absolute_frequency;
        self
    }

    /// `max_relative_frequency = 0.0` is accepted: it excludes every word.
    pub fn validate(&self) -> Result<()> {
        // NaN も範囲外として弾く
        if !(0.0..=1.0).contains(&self.max_relative_frequency) {
            return Err(TopicError::invalid_config(format!(
                "max_relative_frequency must be within [0, 1], got {}",
                self.max_relative_frequency
            )));
        }
        Ok(())
    }
}

/// One topic-model training run, as read from a JSON Lines run file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub dataset_name: String,
    /// Document-topic prior concentration
    pub alpha: f64,
    /// Topic-word prior concentration
    pub eta: f64,
    pub n_topics: usize,
    pub n_iters: usize,
    pub run_id: String,
}

impl RunConfig {
    /// Hyperparameters handed to the external topic engine
    pub fn inference_params(&self) -> Result<InferenceParams> {
        InferenceParams::new(self.n_topics, self.n_iters, self.alpha, self.eta)
    }

    /// Identifier used when persisting the fitted model, e.g. `model_3`
    pub fn model_name(&self) -> String {
        format!("model_{}", self.run_id)
    }
}

/// Parse a JSON Lines document into run configurations
///
/// Blank lines are skipped. A malformed line reports its 1-based line number.
pub fn parse_run_configs(input: &str) -> Result<Vec<RunConfig>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| {
            serde_json::from_str::<RunConfig>(line).map_err(|e| {
                TopicError::serialization(format!("run config line {}: {}", ix + 1, e))
            })
        })
        .collect()
}
