//! Rule execution with full accumulation.

use tracing::warn;

use lote_model::{CanonicalRecord, EntitySchema, RowIssue};

use crate::rules::{Rule, build_rules};

/// The compiled rule list for one entity, reusable across a whole batch.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn for_schema(schema: &EntitySchema) -> Self {
        Self {
            rules: build_rules(schema),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule against a record, never stopping at the first
    /// violation. Warnings are logged here; the caller decides what to do
    /// with errors.
    pub fn check_record(&self, record: &CanonicalRecord, row_index: usize) -> Vec<RowIssue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            if let Some(issue) = rule.check(record, row_index) {
                if !issue.is_error() {
                    warn!(
                        row_index,
                        field = rule.field,
                        message = %issue.message,
                        "format warning"
                    );
                }
                issues.push(issue);
            }
        }
        issues
    }
}

/// Validates one canonical record against a schema.
pub fn validate(
    record: &CanonicalRecord,
    schema: &EntitySchema,
    row_index: usize,
) -> Vec<RowIssue> {
    RuleSet::for_schema(schema).check_record(record, row_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lote_model::{FieldKind, FieldSpec, KeyStrategy, Severity, Value};

    fn schema() -> EntitySchema {
        EntitySchema {
            name: "client",
            endpoint: "clientes",
            aliases: &[],
            fields: vec![
                FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
                FieldSpec::new("email", "E-mail", FieldKind::Email),
                FieldSpec::new("cep", "CEP", FieldKind::PostalCode),
                FieldSpec::new("telefone", "Telefone", FieldKind::Phone),
                FieldSpec::new(
                    "status",
                    "Status",
                    FieldKind::Enum {
                        variants: &["Pendente", "Aprovado"],
                    },
                )
                .required(),
            ],
            key: KeyStrategy::Fields(&["nome"]),
            foreign_keys: vec![],
        }
    }

    fn record(pairs: &[(&str, Value)]) -> CanonicalRecord {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn missing_required_fields_use_human_labels() {
        let issues = validate(&record(&[]), &schema(), 4);
        let errors: Vec<_> = issues.iter().filter(|issue| issue.is_error()).collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("\"Nome\""));
        assert_eq!(errors[0].user_message(), "row 5: required field \"Nome\" is missing");
    }

    #[test]
    fn format_violations_warn_but_do_not_fail() {
        let issues = validate(
            &record(&[
                ("nome", Value::Text("Ana".into())),
                ("status", Value::Text("Pendente".into())),
                ("email", Value::Text("not-an-email".into())),
                ("cep", Value::Text("1234".into())),
                ("telefone", Value::Text("99".into())),
            ]),
            &schema(),
            0,
        );
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| issue.severity == Severity::Warning));
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        let issues = validate(
            &record(&[
                ("nome", Value::Text("Ana".into())),
                ("status", Value::Text("Despachado".into())),
            ]),
            &schema(),
            0,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("Pendente, Aprovado"));
    }

    #[test]
    fn all_violations_are_collected() {
        let issues = validate(
            &record(&[
                ("email", Value::Text("broken".into())),
                ("status", Value::Text("???".into())),
            ]),
            &schema(),
            0,
        );
        // Missing nome (error), bad enum (error), bad email (warning).
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|issue| issue.is_error()).count(), 2);
    }

    #[test]
    fn valid_record_passes_clean() {
        let issues = validate(
            &record(&[
                ("nome", Value::Text("Ana".into())),
                ("email", Value::Text("ana@example.com".into())),
                ("cep", Value::Text("01310100".into())),
                ("telefone", Value::Text("5511987654321".into())),
                ("status", Value::Text("Aprovado".into())),
            ]),
            &schema(),
            0,
        );
        assert!(issues.is_empty());
    }
}
