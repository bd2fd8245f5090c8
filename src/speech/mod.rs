//! Remote speech recognition: HTTP client and response parsing.
//!
//! One request/response exchange per language attempt, plus the serde mirror
//! of the service's JSON response schema.

mod client;
mod response;

pub use client::{DEFAULT_ENDPOINT, SpeechClient};
pub use response::{Alternative, parse};
