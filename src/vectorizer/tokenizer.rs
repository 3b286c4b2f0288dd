use rayon::prelude::*;

/// Text cleaning in front of the vocabulary builder
///
/// 1. lowercase
/// 2. every character outside `a..=z` becomes a space
/// 3. split on whitespace runs
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPreProcessor;

impl TextPreProcessor {
    pub fn new() -> Self {
        TextPreProcessor
    }

    /// Tokenize one document
    ///
    /// # Arguments
    /// * `text` - raw document text
    ///
    /// # Returns
    /// * `Vec<String>` - lowercase alphabetic tokens, empty for empty input
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c.is_ascii_lowercase() { c } else { ' ' })
            .collect();
        cleaned.split_whitespace().map(str::to_string).collect()
    }

    /// Tokenize a whole corpus, document order is kept
    pub fn preprocess_corpus<S>(&self, corpus: &[S]) -> Vec<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        corpus
            .par_iter()
            .map(|doc| self.preprocess(doc.as_ref()))
            .collect()
    }
}
