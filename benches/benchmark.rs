use criterion::{criterion_group, criterion_main, Criterion};
use topic_corpus_vectorizer::{Aggregation, Coherence, CorpusConfig, CorpusProcessor, Similarity, StopWords};
use ndarray::Array2;

/// Deterministic synthetic corpus, `docs` documents over `vocab` words
fn synthetic_corpus(docs: usize, vocab: usize, len: usize) -> Vec<Vec<String>> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        // xorshift
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..docs)
        .map(|_| {
            (0..len)
                .map(|_| format!("w{}", next() % vocab as u64))
                .collect()
        })
        .collect()
}

fn corpus_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000, 1_000, 80);
    let processor = CorpusProcessor::new(CorpusConfig::new(0.9, 2), StopWords::none());

    c.bench_function("process_corpus", |b| {
        b.iter(|| processor.process(&corpus).unwrap());
    });

    let processed = processor.process(&corpus).unwrap();
    c.bench_function("coherence_marginals", |b| {
        b.iter(|| Coherence::new(processed.matrix()).unwrap());
    });

    let coherence = Coherence::new(processed.matrix()).unwrap();
    let topics: Vec<Vec<usize>> = (0..50)
        .map(|k| (0..10).map(|i| (k * 10 + i) % coherence.word_num()).collect())
        .collect();
    c.bench_function("model_coherence", |b| {
        b.iter(|| coherence.model_coherence(&topics).unwrap());
    });
}

fn similarity_benchmark(c: &mut Criterion) {
    let topic_word = Array2::from_shape_fn((50, 1_000), |(k, w)| ((k * 31 + w * 17) % 97) as f64);
    let similarity = Similarity::new(topic_word).unwrap();
    c.bench_function("model_similarity", |b| {
        b.iter(|| similarity.model_similarity(Aggregation::Mean));
    });
}

criterion_group!(benches, corpus_benchmark, similarity_benchmark);
criterion_main!(benches);
