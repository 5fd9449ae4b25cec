//! Built-in import schemas for the back-office entity types.
//!
//! Each back-office module (establishments, clients, menus, items,
//! deliveries, communications, finance) is described declaratively: the
//! spreadsheet header variants its exports use, field coercions, the
//! composite dedupe key, and foreign-key fields. The import pipeline is
//! generic over these schemas; adding an entity type means adding a
//! schema here, not pipeline code.

mod catalog;

pub use catalog::{
    client, communication, delivery, establishment, finance, item, menu, schema_for, schemas,
};
