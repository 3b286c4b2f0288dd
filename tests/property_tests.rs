//! Property-based tests for the corpus pipeline and the topic scores

use ndarray::Array2;
use proptest::prelude::*;
use topic_corpus_vectorizer::vectorizer::document::row_sums;
use topic_corpus_vectorizer::{Aggregation, Coherence, CorpusConfig, CorpusProcessor, Similarity, StopWords};

const WORDS: &[&str] = &["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];

fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..10),
        1..25,
    )
}

fn config_strategy() -> impl Strategy<Value = CorpusConfig> {
    (0.05f64..=1.0, 0u64..3).prop_map(|(max, min)| CorpusConfig::new(max, min))
}

fn triplets(matrix: &topic_corpus_vectorizer::DocTermMatrix) -> Vec<(usize, usize, u32)> {
    matrix.iter().map(|(&v, (r, c))| (r, c, v)).collect()
}

proptest! {
    #[test]
    fn processing_is_deterministic(corpus in corpus_strategy(), config in config_strategy()) {
        let processor = CorpusProcessor::new(config, StopWords::none());
        let a = processor.process(&corpus).unwrap();
        let b = processor.process(&corpus).unwrap();
        prop_assert_eq!(a.vocabulary(), b.vocabulary());
        prop_assert_eq!(a.matrix().shape(), b.matrix().shape());
        prop_assert_eq!(triplets(a.matrix()), triplets(b.matrix()));
    }

    #[test]
    fn rows_match_refined_documents(corpus in corpus_strategy(), config in config_strategy()) {
        let out = CorpusProcessor::new(config, StopWords::none()).process(&corpus).unwrap();
        let (rows, cols) = out.matrix().shape();
        prop_assert_eq!(rows, out.documents().len());
        prop_assert_eq!(cols, out.vocabulary().len());
        prop_assert_eq!(rows + out.dropped_documents().len(), corpus.len());

        let sums = row_sums(out.matrix());
        for (doc, sum) in out.documents().iter().zip(sums) {
            prop_assert!(sum > 0);
            prop_assert_eq!(doc.len() as u64, sum);
            prop_assert!(doc.iter().all(|w| out.vocabulary().contains(w)));
        }
    }

    #[test]
    fn kept_words_respect_thresholds(corpus in corpus_strategy(), config in config_strategy()) {
        let out = CorpusProcessor::new(config, StopWords::none()).process(&corpus).unwrap();
        let doc_num = corpus.len() as f64;
        for (word, count) in out.frequencies().kept() {
            prop_assert!(*count > config.min_absolute_frequency, "{} kept with {}", word, count);
            if config.max_relative_frequency < 1.0 {
                prop_assert!((*count as f64 / doc_num) < config.max_relative_frequency);
            }
        }
    }

    #[test]
    fn npmi_is_symmetric_and_bounded(corpus in corpus_strategy()) {
        let out = CorpusProcessor::new(CorpusConfig::new(1.0, 0), StopWords::none())
            .process(&corpus)
            .unwrap();
        prop_assume!(!out.is_empty());
        let coh = Coherence::new(out.matrix()).unwrap();
        let w = coh.word_num();
        for i in 0..w {
            for j in 0..w {
                let a = coh.get_npmi(i, j).unwrap();
                let b = coh.get_npmi(j, i).unwrap();
                prop_assert!((a - b).abs() < 1e-12);
                prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&a), "npmi {} out of range", a);
                if coh.pcoo()[[i, j]] == 0.0 {
                    prop_assert_eq!(a, -1.0);
                }
            }
        }
    }

    #[test]
    fn similarity_compares_against_other_topics(
        k in 2usize..6,
        w in 1usize..6,
        seed in prop::collection::vec(0.0f64..1.0, 36),
    ) {
        let topic_word = Array2::from_shape_fn((k, w), |(r, c)| seed[r * 6 + c]);
        let sim = Similarity::new(topic_word).unwrap();
        for topic in 0..k {
            prop_assert_eq!(sim.get_similarity(topic).unwrap().len(), k - 1);
        }
        let mean = sim.model_similarity(Aggregation::Mean);
        let max = sim.model_similarity(Aggregation::Max);
        prop_assert_eq!(mean.len(), k);
        for (m, x) in mean.iter().zip(&max) {
            prop_assert!(*m <= *x + 1e-12);
            prop_assert!((-1e-12..=1.0 + 1e-9).contains(m));
        }
    }
}
