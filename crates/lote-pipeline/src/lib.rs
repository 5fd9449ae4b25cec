//! Import pipeline orchestration.
//!
//! Composes the stage crates into one engine: header mapping, value
//! normalization, validation, foreign-key resolution, deduplication,
//! committing, and result aggregation. Each row is processed to
//! completion before the next row begins; per-row failures are collected
//! and the batch always runs to the end.

mod aggregate;
mod committer;
mod dedupe;
mod engine;

pub use aggregate::aggregate;
pub use committer::{BatchCommitter, CommitOutcome};
pub use dedupe::{Deduplicator, dedupe};
pub use engine::{ImportEngine, ImportOptions};
