use crate::contact::{Origin, SourceRecord};
use std::path::PathBuf;

/// Anything that can produce a list of contacts for one side of a run.
///
/// Ingestion adapters implement this so the CLI can be handed whichever
/// producer fits each input instead of reaching for a shared client.
pub trait ContactSource {
    /// Load every valid record. Rows without a usable name are dropped.
    fn load(&self) -> Result<Vec<SourceRecord>, IngestionError>;

    /// Which side of the run this source feeds.
    fn origin(&self) -> Origin;

    /// Human readable description for logs.
    fn describe(&self) -> String;
}

/// Ingestion error types
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Missing header row in {0}")]
    MissingHeader(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
