use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected root element <dbSchema>, found <{0}>")]
    UnexpectedRoot(String),

    #[error("element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("unknown jdbcDataType '{0}'")]
    UnknownFieldType(String),

    #[error("invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute { attribute: &'static str, value: String },

    #[error("duplicate {kind} name '{name}' in database '{database}'")]
    DuplicateEntity {
        database: String,
        kind: &'static str,
        name: String,
    },

    #[error("duplicate field name [{entity}.{field}]")]
    DuplicateField { entity: String, field: String },

    #[error("field [{entity}.{field}] maps to column constant C_{constant}, which is already taken")]
    DuplicateColumnConstant {
        entity: String,
        field: String,
        constant: String,
    },

    #[error("cannot have more than 1 primary key [{entity}.{field}]")]
    DuplicatePrimaryKey { entity: String, field: String },

    #[error("enumerations are only allowed on number or VARCHAR fields [{entity}.{field}]")]
    InvalidEnumerationField { entity: String, field: String },

    #[error("unknown database '{0}'")]
    UnknownDatabase(String),
}
