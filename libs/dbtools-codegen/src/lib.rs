//! dbtools Code Generator
//!
//! Generates Kotlin or Java data-access sources for the
//! `org.dbtools.android.domain` runtime from a `dbSchema` database description.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Schema**: `dbtools-schema` parses and validates the XML description
//! 2. **Source model**: mappers turn each entity into [`kotlin::KotlinClass`]
//!    or [`java::JavaClass`] models (records, constants, managers, database
//!    lifecycle classes)
//! 3. **Rendering**: each model renders deterministically to one `.kt` or
//!    `.java` file, written by [`utils::write_sources`]
//!
//! Base files are regenerated on every run. Editable subclasses are only
//! created when missing, so hand edits survive regeneration.

pub mod error;
pub mod generators;
pub mod java;
pub mod kotlin;
pub mod utils;

use std::path::Path;

use anyhow::{Context, Result};
use dbtools_schema::DatabaseSchema;
use generators::android::AndroidGenerator;
use generators::GeneratorConfig;
use utils::WriteReport;

pub use error::CodegenError;

/// Main entry point for code generation
pub struct CodeGenerator {
    schema: DatabaseSchema,
}

impl CodeGenerator {
    /// Create a new code generator from a schema file
    pub fn from_schema_file(path: &Path) -> Result<Self> {
        let schema = dbtools_schema::parse_file(path)
            .with_context(|| format!("reading schema {}", path.display()))?;
        Ok(Self { schema })
    }

    /// Create a new code generator from an already loaded schema
    pub fn from_schema(schema: DatabaseSchema) -> Result<Self> {
        schema.validate().context("validating schema")?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &DatabaseSchema {
        &self.schema
    }

    /// Generate code with a specific generator
    pub fn generate<G: generators::Generator>(&self, generator: G) -> Result<G::Output> {
        generator.generate(&self.schema)
    }
}

/// Convenience helper to run the Android generator on a schema file, in the
/// language selected by `config`.
pub fn generate_android(
    schema_path: &Path,
    output_dir: &Path,
    package_base: &str,
    config: GeneratorConfig,
) -> Result<WriteReport> {
    let codegen = CodeGenerator::from_schema_file(schema_path)?;

    let generator = AndroidGenerator::new(package_base, config);
    let output = codegen
        .generate(generator)
        .context("running Android generator")?;

    utils::write_sources(output_dir, &output.files)
}
