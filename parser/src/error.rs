//! Error types for fixture generation.
//!
//! Covers the fatal failure modes of a run: configuration problems caught
//! before parsing, source retrieval, and serialization. Per-section problems
//! are not errors; they are recorded as
//! [`SkipReason`](testable_statements_core::SkipReason)s in the run report.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading sources or generating fixtures.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Wiki API request failed.
    #[error("wiki request failed: {0}")]
    HttpError(String),

    /// Wiki API answered, but without content for the page.
    #[error("wiki page not found or empty: {0}")]
    WikiPageMissing(String),

    /// Output directory does not exist or is not a directory.
    #[error("output directory does not exist: {}", .0.display())]
    MissingOutputDir(PathBuf),

    /// Neither a known spec, a source file, nor a wiki page title was given.
    #[error("no input source specified")]
    NoInputSource,

    /// Spec name is not in the registry.
    #[error("unknown spec '{name}' (known: {known})")]
    UnknownSpec { name: String, known: String },
}

impl From<ureq::Error> for GenerationError {
    fn from(err: ureq::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

/// Convenience alias for results with [`GenerationError`].
pub type Result<T> = std::result::Result<T, GenerationError>;
