use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vectorizer::corpus::FilteredFrequency;

/// Bijection between surviving words and ids `0..W-1`
///
/// Ids follow the iteration order of the filtered frequency table, i.e. the
/// first-seen order over the corpus. Both directions are O(1).
///
/// Ids are only meaningful for the corpus and thresholds that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    /// Assign ids to the kept words of a filtered table
    pub fn from_filtered(filtered: &FilteredFrequency) -> Self {
        Self {
            words: filtered.words().map(str::to_string).collect(),
        }
    }

    /// Build from an explicit id order, duplicates keep their first id
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// word -> id
    #[inline]
    pub fn id(&self, word: &str) -> Option<usize> {
        self.words.get_index_of(word)
    }

    /// id -> word
    #[inline]
    pub fn word(&self, id: usize) -> Option<&str> {
        self.words.get_index(id).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// W
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// (id, word) in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.words.iter().enumerate().map(|(id, w)| (id, w.as_str()))
    }

    /// Words in id order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Encode as CBOR
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Decode from CBOR produced by `to_cbor`
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CorpusConfig, vectorizer::{corpus::DocumentFrequency, stopwords::StopWords}};

    fn vocab() -> Vocabulary {
        let corpus = vec![vec!["cat", "dog"], vec!["dog", "bird"], vec!["cat", "bird", "dog"]];
        let filtered = DocumentFrequency::count(&corpus)
            .filter(&CorpusConfig::new(1.0, 0), &StopWords::none())
            .unwrap();
        Vocabulary::from_filtered(&filtered)
    }

    #[test]
    fn ids_follow_first_seen_order() {
        let v = vocab();
        assert_eq!(v.len(), 3);
        assert_eq!(v.id("cat"), Some(0));
        assert_eq!(v.id("dog"), Some(1));
        assert_eq!(v.id("bird"), Some(2));
        assert_eq!(v.word(2), Some("bird"));
        assert_eq!(v.word(3), None);
        assert_eq!(v.id("fish"), None);
    }

    #[test]
    fn bijection() {
        let v = vocab();
        for (id, word) in v.iter() {
            assert_eq!(v.id(word), Some(id));
            assert_eq!(v.word(id), Some(word));
        }
    }

    #[test]
    fn cbor_keeps_ids() {
        let v = vocab();
        let bytes = v.to_cbor().unwrap();
        let back = Vocabulary::from_cbor(&bytes).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.id("bird"), Some(2));
    }

    #[test]
    fn garbage_cbor_is_an_error() {
        assert!(Vocabulary::from_cbor(&[0xff, 0x00, 0x13]).is_err());
    }
}
