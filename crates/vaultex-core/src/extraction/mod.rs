//! Extraction orchestration.
//!
//! A run moves through `decoding → iterating → completed`, or stops at
//! decoding when the archive or target is unusable. Per-entry failures are
//! recorded as warnings and never end a run.

pub mod engine;

pub use engine::ExtractionEngine;
