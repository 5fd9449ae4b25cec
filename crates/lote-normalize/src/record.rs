//! Whole-record normalization driven by an entity schema.

use tracing::debug;

use lote_model::{CanonicalRecord, EntitySchema, FieldKind, RawRecord, Value};

use crate::boolean::normalize_bool;
use crate::categorical::normalize_enum;
use crate::datetime::normalize_datetime;
use crate::numeric::{digits_of, expand_scientific, normalize_currency};
use crate::phone::{DEFAULT_DDI, normalize_phone};

/// Normalizes a header-mapped raw record into a canonical record.
///
/// Schema fields are coerced per their [`FieldKind`]; keys the schema does
/// not know are carried through as trimmed text so no operator data is
/// dropped, and the validator simply ignores them.
pub fn normalize_record(raw: &RawRecord, schema: &EntitySchema) -> CanonicalRecord {
    let mut record = CanonicalRecord::new();
    for (key, raw_value) in raw {
        match schema.field(key) {
            Some(spec) => {
                let value = normalize_field(raw_value, &spec.kind);
                if value.is_undefined() && !raw_value.trim().is_empty() {
                    debug!(
                        field = spec.key,
                        entity = schema.name,
                        "value did not normalize, left undefined"
                    );
                }
                record.insert(key.clone(), value);
            }
            None => {
                let trimmed = raw_value.trim();
                if !trimmed.is_empty() {
                    record.insert(key.clone(), Value::Text(trimmed.to_string()));
                }
            }
        }
    }
    record
}

/// Coerces a single raw value according to its field kind.
pub fn normalize_field(raw: &str, kind: &FieldKind) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Undefined;
    }
    match kind {
        FieldKind::Text => Value::Text(trimmed.to_string()),
        FieldKind::Email => Value::Text(trimmed.to_string()),
        FieldKind::Currency => match normalize_currency(trimmed) {
            Some(minor) => Value::Int(minor),
            None => Value::Undefined,
        },
        FieldKind::Boolean { default } => match normalize_bool(trimmed).or(*default) {
            Some(flag) => Value::Bool(flag),
            None => Value::Undefined,
        },
        FieldKind::Phone => match normalize_phone(trimmed, DEFAULT_DDI) {
            Some(digits) => Value::Text(digits),
            None => Value::Undefined,
        },
        FieldKind::DateTime => match normalize_datetime(trimmed) {
            Some(instant) => Value::DateTime(instant),
            None => Value::Undefined,
        },
        FieldKind::StateCode => {
            Value::Text(trimmed.to_uppercase().chars().take(2).collect())
        }
        FieldKind::PostalCode | FieldKind::TaxId => {
            let digits = expand_scientific(trimmed).unwrap_or_else(|| digits_of(trimmed));
            if digits.is_empty() {
                // Non-numeric input is kept so the validator can flag it.
                Value::Text(trimmed.to_string())
            } else {
                Value::Text(digits)
            }
        }
        FieldKind::Enum { variants } => match normalize_enum(trimmed, variants) {
            Some(canonical) => Value::Text(canonical),
            // Kept raw; membership validation rejects it with context.
            None => Value::Text(trimmed.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lote_model::{FieldSpec, KeyStrategy};

    fn schema() -> EntitySchema {
        EntitySchema {
            name: "item",
            endpoint: "itens",
            aliases: &[],
            fields: vec![
                FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
                FieldSpec::new("preco", "Preço", FieldKind::Currency).required(),
                FieldSpec::new(
                    "disponivel",
                    "Disponível",
                    FieldKind::Boolean {
                        default: Some(true),
                    },
                ),
                FieldSpec::new(
                    "status",
                    "Status",
                    FieldKind::Enum {
                        variants: &["Pendente", "Aprovado"],
                    },
                ),
                FieldSpec::new("uf", "UF", FieldKind::StateCode),
            ],
            key: KeyStrategy::Fields(&["nome"]),
            foreign_keys: vec![],
        }
    }

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn coerces_per_field_kind() {
        let record = normalize_record(
            &raw(&[
                ("nome", "  X-Salada  "),
                ("preco", "1.234,56"),
                ("disponivel", "Sim"),
                ("status", "pend"),
                ("uf", "sp "),
            ]),
            &schema(),
        );
        assert_eq!(record.text("nome"), Some("X-Salada"));
        assert_eq!(record.int("preco"), Some(123456));
        assert_eq!(record.boolean("disponivel"), Some(true));
        assert_eq!(record.text("status"), Some("Pendente"));
        assert_eq!(record.text("uf"), Some("SP"));
    }

    #[test]
    fn boolean_default_applies_to_unrecognized_input() {
        let record = normalize_record(&raw(&[("disponivel", "talvez")]), &schema());
        assert_eq!(record.boolean("disponivel"), Some(true));
    }

    #[test]
    fn unknown_keys_are_carried_as_text() {
        let record = normalize_record(&raw(&[("observacao", " sem cebola ")]), &schema());
        assert_eq!(record.text("observacao"), Some("sem cebola"));
    }

    #[test]
    fn unparseable_currency_is_undefined() {
        let record = normalize_record(&raw(&[("preco", "caro")]), &schema());
        assert!(record.is_missing("preco"));
    }
}
