// Pipeline errors
// Every variant is fatal: the run aborts and must be restarted with fixed input.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source CSV does not exist
    #[error("input file not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// Source exists but cannot be parsed or lacks expected columns
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Database file cannot be created or written
    #[error("failed to write database: {0}")]
    StorageWrite(#[source] rusqlite::Error),

    /// Aggregate query failed
    #[error("query '{query}' failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// plotters could not draw a chart
    #[error("failed to render chart '{chart}': {message}")]
    Render { chart: &'static str, message: String },
}

impl PipelineError {
    pub fn malformed(message: impl Into<String>) -> Self {
        PipelineError::MalformedInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
