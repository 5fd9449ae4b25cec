//! Type coercion of raw spreadsheet values into canonical records.
//!
//! Every coercion is total: input that cannot be interpreted becomes
//! [`lote_model::Value::Undefined`] and the validator decides whether that
//! matters. Nothing in this crate errors or panics on operator data.

mod boolean;
mod categorical;
mod datetime;
mod numeric;
mod phone;
mod record;

pub use boolean::normalize_bool;
pub use categorical::normalize_enum;
pub use datetime::normalize_datetime;
pub use numeric::{expand_scientific, normalize_currency};
pub use phone::{DEFAULT_DDI, normalize_phone};
pub use record::{normalize_field, normalize_record};
