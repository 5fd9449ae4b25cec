//! The schema catalog.
//!
//! Alias tables list the header spellings that actually occur in the
//! spreadsheets operators upload; lookup is case- and
//! diacritic-insensitive, so one spelling per shape is enough.

use lote_model::{EntitySchema, FieldKind, FieldSpec, ForeignKeySpec, KeyStrategy, fold};

const DELIVERY_STATUS: &[&str] = &["Pendente", "Em rota", "Entregue", "Cancelada"];
const ESTABLISHMENT_TYPES: &[&str] =
    &["Restaurante", "Lanchonete", "Pizzaria", "Mercado", "Outro"];
const CHANNELS: &[&str] = &["Email", "SMS", "Push"];
const ENTRY_TYPES: &[&str] = &["Receita", "Despesa"];
const ENTRY_STATUS: &[&str] = &["Pendente", "Pago", "Cancelado"];

pub fn establishment() -> EntitySchema {
    EntitySchema {
        name: "establishment",
        endpoint: "estabelecimentos",
        aliases: &[
            ("Estabelecimento", "nome"),
            ("Razão Social", "nome"),
            ("Nome Fantasia", "nome"),
            ("Fone", "telefone"),
            ("Celular", "telefone"),
            ("WhatsApp", "telefone"),
            ("E-mail", "email"),
            ("Código Postal", "cep"),
            ("Estado", "uf"),
            ("Município", "cidade"),
            ("Logradouro", "endereco"),
            ("Categoria", "tipo"),
            ("Situação", "ativo"),
            ("Status", "ativo"),
        ],
        fields: vec![
            FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
            FieldSpec::new("cnpj", "CNPJ", FieldKind::TaxId),
            FieldSpec::new("email", "E-mail", FieldKind::Email),
            FieldSpec::new("telefone", "Telefone", FieldKind::Phone),
            FieldSpec::new("cep", "CEP", FieldKind::PostalCode),
            FieldSpec::new("uf", "UF", FieldKind::StateCode),
            FieldSpec::new("cidade", "Cidade", FieldKind::Text),
            FieldSpec::new("endereco", "Endereço", FieldKind::Text),
            FieldSpec::new(
                "tipo",
                "Tipo",
                FieldKind::Enum {
                    variants: ESTABLISHMENT_TYPES,
                },
            ),
            FieldSpec::new(
                "ativo",
                "Ativo",
                FieldKind::Boolean {
                    default: Some(true),
                },
            ),
        ],
        key: KeyStrategy::TaxIdElseName {
            tax_id: "cnpj",
            name: "nome",
        },
        foreign_keys: vec![],
    }
}

pub fn client() -> EntitySchema {
    EntitySchema {
        name: "client",
        endpoint: "clientes",
        aliases: &[
            ("Cliente", "nome"),
            ("Nome Completo", "nome"),
            ("Documento", "cpf"),
            ("E-mail", "email"),
            ("Fone", "telefone"),
            ("Celular", "telefone"),
            ("Data de Nascimento", "data_nascimento"),
            ("Nascimento", "data_nascimento"),
            ("Estado", "uf"),
            ("Situação", "ativo"),
            ("Loja", "estabelecimento"),
            ("Unidade", "estabelecimento"),
        ],
        fields: vec![
            FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
            FieldSpec::new("cpf", "CPF", FieldKind::TaxId),
            FieldSpec::new("email", "E-mail", FieldKind::Email),
            FieldSpec::new("telefone", "Telefone", FieldKind::Phone),
            FieldSpec::new("data_nascimento", "Data de Nascimento", FieldKind::DateTime),
            FieldSpec::new("cep", "CEP", FieldKind::PostalCode),
            FieldSpec::new("uf", "UF", FieldKind::StateCode),
            FieldSpec::new(
                "ativo",
                "Ativo",
                FieldKind::Boolean {
                    default: Some(true),
                },
            ),
            FieldSpec::new("estabelecimento", "Estabelecimento", FieldKind::Text),
        ],
        key: KeyStrategy::TaxIdElseName {
            tax_id: "cpf",
            name: "nome",
        },
        foreign_keys: vec![ForeignKeySpec {
            field: "estabelecimento",
            entity: "establishment",
            label: "Estabelecimento",
        }],
    }
}

pub fn menu() -> EntitySchema {
    EntitySchema {
        name: "menu",
        endpoint: "cardapios",
        aliases: &[
            ("Cardápio", "nome"),
            ("Título", "nome"),
            ("Descrição", "descricao"),
            ("Situação", "ativo"),
            ("Loja", "estabelecimento"),
        ],
        fields: vec![
            FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
            FieldSpec::new("descricao", "Descrição", FieldKind::Text),
            FieldSpec::new(
                "ativo",
                "Ativo",
                FieldKind::Boolean {
                    default: Some(true),
                },
            ),
            FieldSpec::new("estabelecimento", "Estabelecimento", FieldKind::Text).required(),
        ],
        key: KeyStrategy::Fields(&["nome", "estabelecimento_id"]),
        foreign_keys: vec![ForeignKeySpec {
            field: "estabelecimento",
            entity: "establishment",
            label: "Estabelecimento",
        }],
    }
}

pub fn item() -> EntitySchema {
    EntitySchema {
        name: "item",
        endpoint: "itens",
        aliases: &[
            ("Item", "nome"),
            ("Produto", "nome"),
            ("Descrição", "descricao"),
            ("Preço", "preco"),
            ("Valor", "preco"),
            ("Preço Unitário", "preco"),
            ("Disponível", "disponivel"),
            ("Ativo", "disponivel"),
            ("Cardápio", "cardapio"),
            ("Menu", "cardapio"),
        ],
        fields: vec![
            FieldSpec::new("nome", "Nome", FieldKind::Text).required(),
            FieldSpec::new("descricao", "Descrição", FieldKind::Text),
            FieldSpec::new("preco", "Preço", FieldKind::Currency).required(),
            FieldSpec::new("categoria", "Categoria", FieldKind::Text),
            FieldSpec::new(
                "disponivel",
                "Disponível",
                FieldKind::Boolean {
                    default: Some(true),
                },
            ),
            FieldSpec::new("cardapio", "Cardápio", FieldKind::Text).required(),
        ],
        key: KeyStrategy::Fields(&["nome", "cardapio_id"]),
        foreign_keys: vec![ForeignKeySpec {
            field: "cardapio",
            entity: "menu",
            label: "Cardápio",
        }],
    }
}

pub fn delivery() -> EntitySchema {
    EntitySchema {
        name: "delivery",
        endpoint: "entregas",
        aliases: &[
            ("Cliente", "cliente"),
            ("Loja", "estabelecimento"),
            ("Endereço", "endereco"),
            ("Endereço de Entrega", "endereco"),
            ("Data Prevista", "data_prevista"),
            ("Data de Entrega", "data_prevista"),
            ("Previsão", "data_prevista"),
            ("Taxa de Entrega", "taxa"),
            ("Frete", "taxa"),
            ("Situação", "status"),
        ],
        fields: vec![
            FieldSpec::new("cliente", "Cliente", FieldKind::Text).required(),
            FieldSpec::new("estabelecimento", "Estabelecimento", FieldKind::Text).required(),
            FieldSpec::new("endereco", "Endereço", FieldKind::Text).required(),
            FieldSpec::new("data_prevista", "Data Prevista", FieldKind::DateTime),
            FieldSpec::new("taxa", "Taxa", FieldKind::Currency),
            FieldSpec::new(
                "status",
                "Status",
                FieldKind::Enum {
                    variants: DELIVERY_STATUS,
                },
            ),
        ],
        key: KeyStrategy::Fields(&["cliente_id", "data_prevista"]),
        foreign_keys: vec![
            ForeignKeySpec {
                field: "cliente",
                entity: "client",
                label: "Cliente",
            },
            ForeignKeySpec {
                field: "estabelecimento",
                entity: "establishment",
                label: "Estabelecimento",
            },
        ],
    }
}

pub fn communication() -> EntitySchema {
    EntitySchema {
        name: "communication",
        endpoint: "comunicados",
        aliases: &[
            ("Título", "titulo"),
            ("Assunto", "titulo"),
            ("Mensagem", "mensagem"),
            ("Conteúdo", "mensagem"),
            ("Texto", "mensagem"),
            ("Meio", "canal"),
            ("Data de Envio", "data_envio"),
            ("Envio", "data_envio"),
            ("Agendamento", "data_envio"),
            ("Loja", "estabelecimento"),
        ],
        fields: vec![
            FieldSpec::new("titulo", "Título", FieldKind::Text).required(),
            FieldSpec::new("mensagem", "Mensagem", FieldKind::Text).required(),
            FieldSpec::new(
                "canal",
                "Canal",
                FieldKind::Enum { variants: CHANNELS },
            ),
            FieldSpec::new("data_envio", "Data de Envio", FieldKind::DateTime),
            FieldSpec::new("estabelecimento", "Estabelecimento", FieldKind::Text),
        ],
        key: KeyStrategy::Fields(&["titulo", "data_envio"]),
        foreign_keys: vec![ForeignKeySpec {
            field: "estabelecimento",
            entity: "establishment",
            label: "Estabelecimento",
        }],
    }
}

pub fn finance() -> EntitySchema {
    EntitySchema {
        name: "finance",
        endpoint: "lancamentos",
        aliases: &[
            ("Descrição", "descricao"),
            ("Histórico", "descricao"),
            ("Valor", "valor"),
            ("Montante", "valor"),
            ("Tipo", "tipo"),
            ("Data do Lançamento", "data"),
            ("Vencimento", "data"),
            ("Situação", "status"),
            ("Loja", "estabelecimento"),
        ],
        fields: vec![
            FieldSpec::new("descricao", "Descrição", FieldKind::Text).required(),
            FieldSpec::new("valor", "Valor", FieldKind::Currency).required(),
            FieldSpec::new(
                "tipo",
                "Tipo",
                FieldKind::Enum {
                    variants: ENTRY_TYPES,
                },
            ),
            FieldSpec::new("data", "Data", FieldKind::DateTime),
            FieldSpec::new(
                "status",
                "Status",
                FieldKind::Enum {
                    variants: ENTRY_STATUS,
                },
            ),
            FieldSpec::new("estabelecimento", "Estabelecimento", FieldKind::Text),
        ],
        key: KeyStrategy::Fields(&["descricao", "data", "valor"]),
        foreign_keys: vec![ForeignKeySpec {
            field: "estabelecimento",
            entity: "establishment",
            label: "Estabelecimento",
        }],
    }
}

/// All built-in schemas.
pub fn schemas() -> Vec<EntitySchema> {
    vec![
        establishment(),
        client(),
        menu(),
        item(),
        delivery(),
        communication(),
        finance(),
    ]
}

/// Looks a schema up by its internal name, endpoint, or Portuguese
/// synonym, fold-insensitively.
pub fn schema_for(name: &str) -> Option<EntitySchema> {
    let folded = fold(name);
    schemas().into_iter().find(|schema| {
        fold(schema.name) == folded
            || fold(schema.endpoint) == folded
            || synonyms(schema.name).iter().any(|syn| fold(syn) == folded)
    })
}

fn synonyms(name: &str) -> &'static [&'static str] {
    match name {
        "establishment" => &["estabelecimento", "loja"],
        "client" => &["cliente"],
        "menu" => &["cardapio", "cardápio"],
        "item" => &["item", "produto"],
        "delivery" => &["entrega"],
        "communication" => &["comunicado", "comunicacao"],
        "finance" => &["lancamento", "financeiro"],
        _ => &[],
    }
}
