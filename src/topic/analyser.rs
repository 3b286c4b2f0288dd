use crate::error::{Result, TopicError};
use crate::topic::engine::FittedTopics;
use crate::vectorizer::vocab::Vocabulary;

/// Top words per topic, used as coherence input
pub const DEFAULT_TOP_WORDS: usize = 10;
/// Representative documents per topic
pub const DEFAULT_TOP_DOCS: usize = 10;

/// Read-only view of a fitted model in vocabulary terms
#[derive(Debug, Clone)]
pub struct TopicAnalyser<'a> {
    topics: &'a FittedTopics,
    vocab: &'a Vocabulary,
    ntop: usize,
    dtop: usize,
    /// (dominant topic, its probability) per document
    dominant: Vec<(usize, f64)>,
}

impl<'a> TopicAnalyser<'a> {
    pub fn new(topics: &'a FittedTopics, vocab: &'a Vocabulary, ntop: usize, dtop: usize) -> Result<Self> {
        let words = topics.topic_word().ncols();
        if words != vocab.len() {
            return Err(TopicError::shape_mismatch(format!(
                "topic-word has {} words, vocabulary has {}",
                words,
                vocab.len()
            )));
        }
        let dominant = topics
            .doc_topic()
            .outer_iter()
            .map(|row| {
                // 同率なら若い topic を採用
                row.iter()
                    .copied()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (k, p)| if p > best.1 { (k, p) } else { best })
            })
            .collect();
        Ok(Self {
            topics,
            vocab,
            ntop,
            dtop,
            dominant,
        })
    }

    /// Analyser with `DEFAULT_TOP_WORDS` / `DEFAULT_TOP_DOCS`
    pub fn with_defaults(topics: &'a FittedTopics, vocab: &'a Vocabulary) -> Result<Self> {
        Self::new(topics, vocab, DEFAULT_TOP_WORDS, DEFAULT_TOP_DOCS)
    }

    fn check_topic(&self, topic_index: usize) -> Result<()> {
        let k = self.topics.topic_num();
        if topic_index >= k {
            return Err(TopicError::index_out_of_range("topic", topic_index, k));
        }
        Ok(())
    }

    /// Word ids sorted by weight, descending, at most `ntop`
    /// Ties keep the lower word id first.
    pub fn top_word_indices(&self, topic_index: usize) -> Result<Vec<usize>> {
        self.check_topic(topic_index)?;
        let row = self.topics.topic_word().row(topic_index);
        let mut ids: Vec<usize> = (0..row.len()).collect();
        ids.sort_by(|&a, &b| row[b].total_cmp(&row[a]).then(a.cmp(&b)));
        ids.truncate(self.ntop);
        Ok(ids)
    }

    /// Weights matching `top_word_indices`
    pub fn top_word_probs(&self, topic_index: usize) -> Result<Vec<f64>> {
        let ids = self.top_word_indices(topic_index)?;
        let row = self.topics.topic_word().row(topic_index);
        Ok(ids
            .into_iter()
            .map(|ix| row[ix])
            .collect())
    }

    pub fn top_words(&self, topic_index: usize) -> Result<Vec<&'a str>> {
        self.top_word_indices(topic_index)?
            .into_iter()
            .map(|ix| {
                self.vocab
                    .word(ix)
                    .ok_or_else(|| TopicError::index_out_of_range("word", ix, self.vocab.len()))
            })
            .collect()
    }

    /// `top_word_indices` of every topic, in topic order
    pub fn all_top_word_indices(&self) -> Vec<Vec<usize>> {
        (0..self.topics.topic_num())
            .filter_map(|k| self.top_word_indices(k).ok())
            .collect()
    }

    /// Documents whose dominant topic is `topic_index`, most confident first
    ///
    /// # Arguments
    /// * `dtop` - limit, `None` uses the analyser default
    pub fn top_document_indices(&self, topic_index: usize, dtop: Option<usize>) -> Result<Vec<usize>> {
        self.check_topic(topic_index)?;
        let mut docs: Vec<(usize, f64)> = self
            .dominant
            .iter()
            .enumerate()
            .filter(|(_, (k, _))| *k == topic_index)
            .map(|(d, &(_, p))| (d, p))
            .collect();
        docs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        docs.truncate(dtop.unwrap_or(self.dtop));
        Ok(docs.into_iter().map(|(d, _)| d).collect())
    }

    /// Dominant topic of a document
    pub fn dominant_topic(&self, doc_index: usize) -> Result<usize> {
        self.dominant
            .get(doc_index)
            .map(|&(k, _)| k)
            .ok_or_else(|| TopicError::index_out_of_range("document", doc_index, self.dominant.len()))
    }
}
