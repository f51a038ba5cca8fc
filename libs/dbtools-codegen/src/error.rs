use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("cannot have more than 1 primary key [{entity}.{field}]")]
    DuplicatePrimaryKey { entity: String, field: String },

    #[error("unknown date type '{0}'")]
    UnknownDateType(String),

    #[error("unknown output language '{0}'")]
    UnknownLanguage(String),

    #[error(transparent)]
    Schema(#[from] dbtools_schema::SchemaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
