//! Declarative field validation.
//!
//! Rules are generated from an [`lote_model::EntitySchema`] as small data
//! objects and executed with full accumulation: every rule runs for every
//! row, so the operator sees the complete picture instead of the first
//! problem. Presence and enum-membership violations exclude the row from
//! commit; format problems only warn, since an import is never blocked
//! over phone formatting.

mod rules;
mod validator;

pub use rules::{Rule, RuleKind, build_rules};
pub use validator::{RuleSet, validate};
