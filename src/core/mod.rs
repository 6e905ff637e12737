pub mod candidates;
pub mod column_selector;
pub mod condition_selector;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod normalizer;
pub mod numeric;
pub mod ports;
pub mod scoring;
pub mod similarity;
pub mod synthesizer;
