//! Source generators
//!
//! Each target implements the [`Generator`] trait over a parsed schema.

pub mod android;
pub mod date_type;
pub mod language;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dbtools_schema::DatabaseSchema;
use serde::{Deserialize, Serialize};

pub use date_type::DateType;
pub use language::Language;

/// Trait that all generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate sources from the schema
    fn generate(&self, schema: &DatabaseSchema) -> Result<Self::Output>;
}

/// Options that change the shape of the generated sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Add the database name as a package segment
    pub include_database_name_in_package: bool,
    /// Extend the RxJava flavoured base managers
    pub rx_java_support: bool,
    /// Annotate non-null getters with `@Nonnull`
    pub jsr305_support: bool,
    /// Generate `@Inject`/`@Singleton` managers instead of a holder object
    pub injection_support: bool,
    /// Build view and query SQL with `SQLQueryBuilder`
    pub sql_query_builder_support: bool,
    pub date_type: DateType,
    /// Source language of the generated files
    pub language: Language,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_database_name_in_package: false,
            rx_java_support: false,
            jsr305_support: false,
            injection_support: false,
            sql_query_builder_support: false,
            date_type: DateType::JavaDate,
            language: Language::Kotlin,
        }
    }
}

impl GeneratorConfig {
    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading generator config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing generator config {}", path.display()))
    }
}
