//! Topic quality scores
//!
//! - `similarity` - cosine distinctness between topics
//! - `coherence` - NPMI over document co-occurrence
pub mod coherence;
pub mod compare;
pub mod similarity;
