//! Validation rules generated from entity schemas.

use std::sync::LazyLock;

use regex::Regex;

use lote_model::{CanonicalRecord, EntitySchema, ErrorCategory, FieldKind, RowIssue, fold};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// What a rule checks.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// The field must be present and defined. Violation is an error.
    Required,
    /// The field, when present, must look like an e-mail. Warning only.
    EmailFormat,
    /// CEP must have exactly 8 digits. Warning only.
    PostalCodeFormat,
    /// Phone must have 8 to 15 digits. Warning only.
    PhoneFormat,
    /// The value must be one of the declared variants. Violation is an
    /// error (the normalizer already tried to repair loose input).
    EnumMembership { variants: &'static [&'static str] },
}

/// One field-level check, testable without the pipeline around it.
#[derive(Debug, Clone)]
pub struct Rule {
    pub field: &'static str,
    /// Human label used in messages instead of the internal key.
    pub label: &'static str,
    pub kind: RuleKind,
}

impl Rule {
    /// Runs the check against a canonical record.
    pub fn check(&self, record: &CanonicalRecord, row_index: usize) -> Option<RowIssue> {
        match &self.kind {
            RuleKind::Required => {
                if record.is_missing(self.field) {
                    Some(RowIssue::error(
                        row_index,
                        Some(self.field),
                        ErrorCategory::Validation,
                        format!("required field \"{}\" is missing", self.label),
                    ))
                } else {
                    None
                }
            }
            RuleKind::EmailFormat => {
                let value = record.text(self.field)?;
                if EMAIL_REGEX.is_match(value) {
                    None
                } else {
                    Some(RowIssue::warning(
                        row_index,
                        Some(self.field),
                        format!("\"{value}\" does not look like a valid {}", self.label),
                    ))
                }
            }
            RuleKind::PostalCodeFormat => {
                let value = record.text(self.field)?;
                let digits = value.chars().filter(char::is_ascii_digit).count();
                if digits == 8 && value.len() == digits {
                    None
                } else {
                    Some(RowIssue::warning(
                        row_index,
                        Some(self.field),
                        format!("{} must have exactly 8 digits, got \"{value}\"", self.label),
                    ))
                }
            }
            RuleKind::PhoneFormat => {
                let value = record.text(self.field)?;
                let digits = value.chars().filter(char::is_ascii_digit).count();
                if (8..=15).contains(&digits) && value.len() == digits {
                    None
                } else {
                    Some(RowIssue::warning(
                        row_index,
                        Some(self.field),
                        format!("{} must have 8 to 15 digits, got \"{value}\"", self.label),
                    ))
                }
            }
            RuleKind::EnumMembership { variants } => {
                let value = record.text(self.field)?;
                let folded = fold(value);
                if variants.iter().any(|variant| fold(variant) == folded) {
                    None
                } else {
                    Some(RowIssue::error(
                        row_index,
                        Some(self.field),
                        ErrorCategory::Validation,
                        format!(
                            "\"{value}\" is not a valid {} (expected one of: {})",
                            self.label,
                            variants.join(", ")
                        ),
                    ))
                }
            }
        }
    }
}

/// Generates the rule list for a schema.
pub fn build_rules(schema: &EntitySchema) -> Vec<Rule> {
    let mut rules = Vec::new();
    for spec in &schema.fields {
        if spec.required {
            rules.push(Rule {
                field: spec.key,
                label: spec.label,
                kind: RuleKind::Required,
            });
        }
        let format_rule = match &spec.kind {
            FieldKind::Email => Some(RuleKind::EmailFormat),
            FieldKind::PostalCode => Some(RuleKind::PostalCodeFormat),
            FieldKind::Phone => Some(RuleKind::PhoneFormat),
            FieldKind::Enum { variants } => Some(RuleKind::EnumMembership {
                variants: *variants,
            }),
            _ => None,
        };
        if let Some(kind) = format_rule {
            rules.push(Rule {
                field: spec.key,
                label: spec.label,
                kind,
            });
        }
    }
    rules
}
