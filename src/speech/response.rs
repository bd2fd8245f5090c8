//! Serde mirror of the recognition service's JSON response schema.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One transcription candidate with its reported confidence.
///
/// Confidence is trusted as reported by the service (nominally `[0.0, 1.0]`);
/// no local clamping is applied. Missing wire fields default to the zero
/// value, matching the service's habit of omitting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: f64,
}

/// One result group: alternatives ordered by descending confidence.
#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(rename = "alternative", default)]
    alternatives: Vec<Alternative>,
    #[allow(dead_code)]
    #[serde(rename = "final", default)]
    is_final: bool,
}

/// Top-level response body.
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(rename = "result", default)]
    results: Vec<RecognitionResult>,
    #[allow(dead_code)]
    #[serde(default)]
    result_index: i64,
}

/// Decode a response body and extract the top transcription alternative.
///
/// Returns `Ok(None)` when the service understood the request but found no
/// speech: an empty result list, or a first result group with no
/// alternatives. Later alternatives and result groups are intentionally
/// ignored; the service already orders alternatives by descending confidence.
///
/// # Errors
/// Returns [`Error::Decode`] if the body is not valid JSON.
pub fn parse(body: &str) -> Result<Option<Alternative>, Error> {
    let response: ServiceResponse = serde_json::from_str(body)?;

    let Some(first) = response.results.into_iter().next() else {
        return Ok(None);
    };

    Ok(first.alternatives.into_iter().next())
}
