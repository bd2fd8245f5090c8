//! Error types for the recognition pipeline.

use thiserror::Error;

/// Errors produced while recognizing speech.
///
/// `Transport` and `Decode` are always scoped to a single language attempt
/// and never abort the overall call; `NoResult` is the only error `listen`
/// itself returns.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange with the recognition service failed.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service returned a body that is not valid JSON.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// No language attempt produced a usable transcription before the deadline.
    #[error("no usable transcription from any language")]
    NoResult,
}
