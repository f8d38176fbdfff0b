// Parse failures. Their Display text is the diagnostic an
// `ErroneousCommand` carries to the rejection sink.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid text {origin}")]
    Text { origin: String },

    #[error("Invalid JSON {0}")]
    Json(#[from] serde_json::Error),

    #[error("Illegal command type {0}")]
    CommandType(String),
}
