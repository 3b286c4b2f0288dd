pub mod analyser;
pub mod engine;
pub mod naming;
