//! Database schema model for the dbtools generators.
//!
//! Reads `dbSchema` XML documents into a typed model, validates them and
//! renders the SQLite DDL that generated sources embed as constants.

pub mod error;
pub mod model;
pub mod naming;
pub mod parser;
pub mod sqlite;
pub mod types;

pub use error::{Result, SchemaError};
pub use model::{
    DatabaseSchema, EntityType, ForeignKeyType, SchemaDatabase, SchemaEntity, SchemaField,
    TableEnum,
};
pub use parser::{parse_file, parse_str};
pub use types::{FieldType, SqliteAffinity};
