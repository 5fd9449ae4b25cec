//! Core data model for the lote import pipeline.
//!
//! This crate defines the vocabulary shared by every pipeline stage:
//! raw and canonical records, per-entity schemas, entity references,
//! row issues, and the final import result.

mod error;
mod issue;
mod lookup;
mod record;
mod reference;
mod result;
mod schema;
mod text;

pub use error::{ImportError, Result};
pub use issue::{ErrorCategory, RowIssue, Severity};
pub use lookup::FoldedSet;
pub use record::{CanonicalRecord, RawRecord, Value};
pub use reference::EntityRef;
pub use result::ImportResult;
pub use schema::{EntitySchema, FieldKind, FieldSpec, ForeignKeySpec, KeyStrategy};
pub use text::{fold, slug};

/// Fixed UTC-3 offset every canonical instant is anchored to.
///
/// Import timestamps must not drift with the ambient timezone of the
/// machine running the import.
pub fn default_offset() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(3 * 3600).expect("UTC-3 is a valid fixed offset")
}
