//! Error types for pairs-plot artifacts

use thiserror::Error;

/// pairs-viz error type
#[derive(Error, Debug)]
pub enum Error {
    /// Input violates a precondition of the pairs plot (nothing is drawn).
    #[error("Precondition error: {0}")]
    Precondition(String),

    /// Numerical failure while building plot content
    #[error("Computation error: {0}")]
    Computation(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
