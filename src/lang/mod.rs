//! Candidate language registry.
//!
//! Fixed enumeration of the languages the dispatcher races, with their
//! wire-format locale codes and display names.

mod registry;

pub use registry::Language;
