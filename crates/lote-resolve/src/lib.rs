//! Tiered foreign-key resolution.
//!
//! Spreadsheets reference related entities by name ("Restaurante do Zé"),
//! by loose id strings, or by anything in between. Resolution walks a
//! fixed cascade of tiers and logs which one decided, because the final
//! tier (defaulting to the first active candidate) is a deliberate but
//! risky business policy that operators must be able to audit.

mod resolver;

pub use resolver::{
    FallbackPolicy, ReferenceSearch, Resolved, ResolutionTier, SearchError, resolve_reference,
};
