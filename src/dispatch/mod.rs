//! Concurrent dispatch and confidence-based aggregation.
//!
//! Fans one recognition attempt per candidate language out to the service,
//! fans the results back in through a single channel, and selects the most
//! confident hypothesis within a fixed time budget.

mod aggregator;

pub use aggregator::{DEFAULT_DEADLINE, Hypothesis, Recognizer};
