//! Error types for inbox-triage.
//!
//! Only the I/O boundaries can fail: ingesting a CSV file and loading the
//! knowledge-base corpus. The core operations (classify, filter, rank,
//! retrieve, compose) are total over their inputs and return plain values.

use std::path::PathBuf;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

/// Errors while reading inbound records from a source.
///
/// These are file-level failures. A malformed *row* is not an error: missing
/// fields default to empty strings, an unparseable date becomes an absent
/// timestamp, and the record still flows through the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while loading the knowledge-base corpus.
///
/// An empty directory is a valid (empty) corpus, not an error.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Failed to read corpus directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
