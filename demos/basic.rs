use ndarray::Array2;
use topic_corpus_vectorizer::{
    Aggregation, Coherence, CorpusConfig, CorpusProcessor, DocTermMatrix, FittedTopics, InferenceParams,
    Similarity, StopWords, TextPreProcessor, TopicAnalyser, TopicEngine,
};
use tracing_subscriber::EnvFilter;

/// Stand-in engine: document `d` belongs to topic `d % K`
struct ModuloEngine;

impl TopicEngine for ModuloEngine {
    fn fit(&self, matrix: &DocTermMatrix, params: &InferenceParams) -> topic_corpus_vectorizer::Result<FittedTopics> {
        let (docs, words) = matrix.shape();
        let k = params.n_topics;
        let mut topic_word = Array2::from_elem((k, words), params.eta);
        let mut doc_topic = Array2::from_elem((docs, k), params.alpha);
        for (d, row) in matrix.outer_iterator().enumerate() {
            doc_topic[[d, d % k]] += 1.0;
            for (w, &count) in row.iter() {
                topic_word[[d % k, w]] += count as f64;
            }
        }
        for mut row in topic_word.outer_iter_mut() {
            let total = row.sum();
            row.mapv_inplace(|v| v / total);
        }
        for mut row in doc_topic.outer_iter_mut() {
            let total = row.sum();
            row.mapv_inplace(|v| v / total);
        }
        FittedTopics::new(topic_word, doc_topic)
    }
}

fn main() -> topic_corpus_vectorizer::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let texts = [
        "Rust is a fast systems language with strong safety guarantees.",
        "My cat sleeps on the sofa while the dog barks at the mailman.",
        "The compiler checks ownership and borrowing before the program runs.",
        "Our dog chased the neighbour's cat across the garden.",
        "Cargo builds the crate and the compiler reports every borrowing error.",
        "Cats and dogs are the most common pets in the city.",
    ];
    let corpus = TextPreProcessor::new().preprocess_corpus(&texts);

    let processor = CorpusProcessor::new(CorpusConfig::new(0.9, 0), StopWords::english());
    let processed = processor.process(&corpus)?;
    println!("vocabulary: {:?}", processed.vocabulary().words().collect::<Vec<_>>());
    println!("matrix shape: {:?}", processed.matrix().shape());
    if processed.is_empty() {
        println!("nothing left to fit");
        return Ok(());
    }

    // document d -> topic d % 2 puts the programming texts in topic 0
    let params = InferenceParams::new(2, 100, 0.1, 0.01)?;
    let fit = ModuloEngine.fit(processed.matrix(), &params)?;
    let analyser = TopicAnalyser::new(&fit, processed.vocabulary(), 5, 3)?;

    let coherence = Coherence::new(processed.matrix())?.model_coherence(&analyser.all_top_word_indices())?;
    let similarity = Similarity::new(fit.topic_word().clone())?.model_similarity(Aggregation::Mean);

    for k in 0..fit.topic_num() {
        println!(
            "topic {}: {:?} coherence={:.3} similarity={:.3} docs={:?}",
            k,
            analyser.top_words(k)?,
            coherence[k],
            similarity[k],
            analyser.top_document_indices(k, None)?
        );
    }
    Ok(())
}
