//! Error types for the block model and project store

use thiserror::Error;

/// Result type alias for blockforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the block model and project store
#[derive(Error, Debug)]
pub enum Error {
    /// The factory was asked to instantiate a type outside the registry.
    ///
    /// This guards authoring only; the render engine never fails on an
    /// unknown type it reads back from persisted data.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// A project id did not resolve to a stored record
    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    /// A project payload failed caller-side validation
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize a persisted record
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
