//! Multi-language speech recognition against a remote recognition service.
//!
//! Submits one audio sample to the service once per candidate language,
//! collects the per-language hypotheses concurrently, and returns the most
//! confident transcription within a bounded time budget. Per-language
//! failures are excluded from selection and never abort the overall call.

pub mod dispatch;
pub mod error;
pub mod lang;
pub mod speech;

pub use dispatch::{DEFAULT_DEADLINE, Hypothesis, Recognizer};
pub use error::Error;
pub use lang::Language;
pub use speech::Alternative;
