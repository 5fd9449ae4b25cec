//! Declarative per-entity import schemas.
//!
//! Each back-office entity type describes its import contract as data:
//! header aliases, field specs with coercion kinds, the composite-key
//! strategy used for deduplication, and foreign-key fields. The pipeline
//! consumes any schema; no entity has its own pipeline code.

use crate::record::CanonicalRecord;
use crate::text::fold;

/// Import contract for one target entity type.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    /// Internal entity name, e.g. `"client"`.
    pub name: &'static str,
    /// API path segment, e.g. `"clientes"` for `POST /api/clientes`.
    pub endpoint: &'static str,
    /// Known external header variants mapped to canonical field keys.
    pub aliases: &'static [(&'static str, &'static str)],
    pub fields: Vec<FieldSpec>,
    pub key: KeyStrategy,
    pub foreign_keys: Vec<ForeignKeySpec>,
}

impl EntitySchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.required)
    }
}

/// One canonical field of an entity.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    /// Human label used in operator-facing messages.
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            required: false,
            kind,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Coercion applied to a field by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Monetary amount stored as integer minor units (centavos).
    Currency,
    /// Locale-tolerant flag; `default` applies when the input token is
    /// unrecognized (never a silent false).
    Boolean { default: Option<bool> },
    Phone,
    DateTime,
    /// Two-letter state code (UF).
    StateCode,
    Email,
    /// CEP, kept as an 8-digit string.
    PostalCode,
    /// National tax id (CPF/CNPJ), kept as a digit string.
    TaxId,
    /// Closed set of categorical values; the normalizer maps loose input
    /// onto a canonical variant before the validator checks membership.
    Enum { variants: &'static [&'static str] },
}

/// Composite-key extraction for duplicate detection.
///
/// Key semantics differ per entity (tax-id-else-name for people and
/// establishments, field tuples elsewhere) and must stay per-entity
/// configurable; unifying them would silently change dedupe behavior.
#[derive(Debug, Clone)]
pub enum KeyStrategy {
    /// Normalized tax id when present, otherwise the folded name.
    TaxIdElseName {
        tax_id: &'static str,
        name: &'static str,
    },
    /// Folded tuple of canonical field values joined in order.
    Fields(&'static [&'static str]),
}

impl KeyStrategy {
    /// Computes the case-insensitive composite key from canonical values.
    ///
    /// Returns `None` when every contributing field is missing; a record
    /// without a key is not subject to deduplication.
    pub fn composite_key(&self, record: &CanonicalRecord) -> Option<String> {
        match self {
            KeyStrategy::TaxIdElseName { tax_id, name } => {
                if let Some(doc) = record.text(tax_id)
                    && !doc.trim().is_empty()
                {
                    return Some(digits_of(doc));
                }
                let name = record.text(name)?;
                if name.trim().is_empty() {
                    None
                } else {
                    Some(fold(name))
                }
            }
            KeyStrategy::Fields(keys) => {
                let mut parts = Vec::with_capacity(keys.len());
                let mut any = false;
                for key in *keys {
                    let part = record
                        .get(key)
                        .map(|value| fold(&value.display()))
                        .unwrap_or_default();
                    any |= !part.is_empty();
                    parts.push(part);
                }
                if any { Some(parts.join("|")) } else { None }
            }
        }
    }
}

/// A field holding a human-readable reference to another entity.
#[derive(Debug, Clone)]
pub struct ForeignKeySpec {
    /// Canonical field carrying the reference, e.g. `"estabelecimento"`.
    pub field: &'static str,
    /// Referenced entity type, e.g. `"establishment"`.
    pub entity: &'static str,
    /// Human label for messages.
    pub label: &'static str,
}

impl ForeignKeySpec {
    /// Canonical key the resolved id is written to.
    pub fn id_field(&self) -> String {
        format!("{}_id", self.field)
    }
}

fn digits_of(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    #[test]
    fn tax_id_wins_over_name() {
        let key = KeyStrategy::TaxIdElseName {
            tax_id: "cnpj",
            name: "nome",
        };
        let mut record = CanonicalRecord::new();
        record.insert("nome", Value::Text("Padaria Central".into()));
        assert_eq!(key.composite_key(&record), Some("padaria central".into()));

        record.insert("cnpj", Value::Text("12.345.678/0001-90".into()));
        assert_eq!(key.composite_key(&record), Some("12345678000190".into()));
    }

    #[test]
    fn field_tuple_key_is_fold_insensitive() {
        let key = KeyStrategy::Fields(&["nome", "cardapio_id"]);
        let mut record = CanonicalRecord::new();
        record.insert("nome", Value::Text("X-Salada".into()));
        record.insert("cardapio_id", Value::Int(7));
        assert_eq!(key.composite_key(&record), Some("x salada|7".into()));
    }

    #[test]
    fn empty_record_has_no_key() {
        let key = KeyStrategy::Fields(&["nome"]);
        let record = CanonicalRecord::new();
        assert_eq!(key.composite_key(&record), None);
    }
}
