//! SmartCast Digestor - a Rust CLI assistant for digesting spoken and written media
//!
//! This library turns source material - podcast audio, YouTube links, transcripts,
//! and scientific papers (PDF, plain text, or arXiv identifiers) - into consumable
//! digests: transcripts, summaries, keywords, sentiment, narrated podcast scripts,
//! and exportable JSON/Markdown artifacts. Heavy lifting (transcription,
//! summarization, translation, speech synthesis, question answering) is delegated
//! to hosted inference services behind narrow trait boundaries.

pub mod cli;
pub mod config;
pub mod digest;
pub mod ingest;
pub mod media;
pub mod output;
pub mod paper;
pub mod podcast;
pub mod services;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use digest::{DigestPipeline, DigestReport};
pub use paper::{StructuredPaper, StructuringEngine};
pub use podcast::{PodcastEpisode, PodcastStyle, PodcastSynthesizer};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the digestor
#[derive(thiserror::Error, Debug)]
pub enum DigestorError {
    #[error("Unsupported input source: {0}")]
    UnsupportedSource(String),

    #[error("Document extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Podcast synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Inference service call failed: {0}")]
    ServiceFailed(String),

    #[error("File operation failed: {0}")]
    FileError(String),
}
