//! Header mapping engine.

use std::collections::BTreeMap;

use tracing::debug;

use lote_model::{EntitySchema, RawRecord, fold, slug};

/// Maps external column labels to canonical field keys for one entity.
///
/// Lookup is exact against the schema's alias table after folding (case
/// and diacritics ignored); a miss falls back to a deterministic slug of
/// the external header. Mapping never fails: an unexpected spreadsheet
/// column becomes an unused canonical key that downstream stages ignore.
pub struct HeaderMapper {
    aliases: BTreeMap<String, &'static str>,
}

impl HeaderMapper {
    /// Builds a mapper from a schema's alias table.
    ///
    /// Canonical field keys map to themselves, so a spreadsheet that
    /// already uses canonical headers needs no alias entries.
    pub fn for_schema(schema: &EntitySchema) -> Self {
        let mut aliases = BTreeMap::new();
        for spec in &schema.fields {
            aliases.insert(fold(spec.key), spec.key);
        }
        for (variant, canonical) in schema.aliases {
            aliases.insert(fold(variant), *canonical);
        }
        Self { aliases }
    }

    /// Maps one external header to its canonical key.
    pub fn map(&self, external: &str) -> String {
        if let Some(canonical) = self.aliases.get(&fold(external)) {
            debug!(header = external, canonical, "header alias matched");
            return (*canonical).to_string();
        }
        let fallback = slug(external);
        debug!(header = external, slug = %fallback, "unknown header, slug fallback");
        fallback
    }

    /// Remaps a raw record's keys. When two external headers collapse to
    /// the same canonical key, the first occurrence wins.
    pub fn map_record(&self, raw: &RawRecord) -> RawRecord {
        let mut mapped = RawRecord::new();
        for (header, value) in raw {
            let key = self.map(header);
            mapped.entry(key).or_insert_with(|| value.clone());
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lote_model::{FieldKind, FieldSpec, KeyStrategy};

    fn schema() -> EntitySchema {
        EntitySchema {
            name: "client",
            endpoint: "clientes",
            aliases: &[
                ("Nome Completo", "nome"),
                ("E-mail", "email"),
                ("Situação", "ativo"),
            ],
            fields: vec![
                FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
                FieldSpec::new("email", "E-mail", FieldKind::Email),
                FieldSpec::new("ativo", "Ativo", FieldKind::Boolean { default: None }),
            ],
            key: KeyStrategy::Fields(&["nome"]),
            foreign_keys: vec![],
        }
    }

    #[test]
    fn alias_lookup_ignores_case_and_diacritics() {
        let mapper = HeaderMapper::for_schema(&schema());
        assert_eq!(mapper.map("NOME COMPLETO"), "nome");
        assert_eq!(mapper.map("situacao"), "ativo");
        assert_eq!(mapper.map("e-mail"), "email");
    }

    #[test]
    fn canonical_keys_map_to_themselves() {
        let mapper = HeaderMapper::for_schema(&schema());
        assert_eq!(mapper.map("nome"), "nome");
        assert_eq!(mapper.map("Ativo"), "ativo");
    }

    #[test]
    fn unknown_headers_become_slugs() {
        let mapper = HeaderMapper::for_schema(&schema());
        assert_eq!(mapper.map("Observações do Pedido"), "observacoes_do_pedido");
    }

    #[test]
    fn first_occurrence_wins_on_collision() {
        let mapper = HeaderMapper::for_schema(&schema());
        let mut raw = RawRecord::new();
        raw.insert("Nome Completo".into(), "Ana".into());
        raw.insert("nome".into(), "Outra".into());
        let mapped = mapper.map_record(&raw);
        // BTreeMap iteration order: "Nome Completo" before "nome".
        assert_eq!(mapped.get("nome").map(String::as_str), Some("Ana"));
        assert_eq!(mapped.len(), 1);
    }
}
