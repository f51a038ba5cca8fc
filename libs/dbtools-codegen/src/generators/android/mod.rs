//! Kotlin or Java sources for the `org.dbtools.android.domain` runtime
//!
//! For every entity of every database this produces:
//!
//! - `<Entity>Const`: column names, SQL statements and cursor getters
//! - `<Entity>BaseRecord`: column properties and their conversions, or an
//!   enum class for enumeration tables
//! - `<Entity>`: editable record subclass, written once
//! - `<Entity>BaseManager` and the editable `<Entity>Manager`
//!
//! plus the database lifecycle classes in the base package. Base files are
//! regenerated on every run; editable files are only created when missing.
//! [`GeneratorConfig::language`] picks the output language.

mod accessors;
mod base_manager;
mod base_record;
mod database;
mod java;
mod manager;
mod record;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use dbtools_schema::{DatabaseSchema, SchemaDatabase, SchemaEntity};
use tracing::{debug, info};

use crate::error::Result;
use crate::generators::{Generator, GeneratorConfig, Language};
use crate::java::JavaClass;
use crate::kotlin::{KotlinClass, SourceStyle};

pub use accessors::{bind_method, unhandled};

pub(crate) use accessors::FieldModel;

/// Whether an existing file may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Generated base file, replaced on every run.
    Overwrite,
    /// Editable file, only written when missing.
    CreateOnly,
}

/// One rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path below the output directory, mirroring the package.
    pub relative_path: PathBuf,
    pub contents: String,
    pub policy: WritePolicy,
}

impl GeneratedFile {
    fn from_class(dir: &Path, class: &KotlinClass, style: &SourceStyle, policy: WritePolicy) -> Self {
        Self {
            relative_path: dir.join(class.file_name()),
            contents: class.render(style),
            policy,
        }
    }

    fn from_java(dir: &Path, class: &JavaClass, style: &SourceStyle, policy: WritePolicy) -> Self {
        Self {
            relative_path: dir.join(class.file_name()),
            contents: class.render(style),
            policy,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.relative_path.file_name().and_then(|n| n.to_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidOutput {
    pub files: Vec<GeneratedFile>,
}

impl AndroidOutput {
    /// First file of the class `class_name`, whatever its extension.
    pub fn file(&self, class_name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| {
            f.relative_path.file_stem().and_then(|s| s.to_str()) == Some(class_name)
        })
    }
}

/// Generator for Android Kotlin or Java sources.
#[derive(Debug, Clone)]
pub struct AndroidGenerator {
    config: GeneratorConfig,
    package_base: String,
    style: SourceStyle,
    generated_at: Option<DateTime<Local>>,
}

impl AndroidGenerator {
    pub fn new(package_base: impl Into<String>, config: GeneratorConfig) -> Self {
        Self {
            config,
            package_base: package_base.into(),
            style: SourceStyle::default(),
            generated_at: None,
        }
    }

    pub fn with_style(mut self, style: SourceStyle) -> Self {
        self.style = style;
        self
    }

    /// Fix the "Created:" timestamp of editable files.
    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn package_base(&self) -> &str {
        &self.package_base
    }

    /// Package of a database's entities: the base package, plus the lowercase
    /// database name when configured.
    pub fn namespace(&self, database: &SchemaDatabase) -> String {
        if self.config.include_database_name_in_package {
            format!("{}.{}", self.package_base, database.name.to_lowercase())
        } else {
            self.package_base.clone()
        }
    }

    fn created(&self) -> String {
        self.generated_at
            .unwrap_or_else(Local::now)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// Every source of one entity.
    fn generate_entity(&self, ctx: &EntityContext<'_>, out: &mut AndroidOutput) -> Result<()> {
        let dir = ctx.output_dir();
        let style = &self.style;

        if self.config.language == Language::Java {
            for (class, policy) in java::entity_classes(ctx)? {
                out.files.push(GeneratedFile::from_java(&dir, &class, style, policy));
            }
            debug!(entity = %ctx.entity.name, kind = ctx.entity.kind.as_str(), "generated java entity");
            return Ok(());
        }

        let constants = base_record::constants_class(ctx)?;
        out.files.push(GeneratedFile::from_class(&dir, &constants, style, WritePolicy::Overwrite));

        if ctx.entity.is_enumeration_table() {
            let enum_class = base_record::enum_class(ctx)?;
            out.files.push(GeneratedFile::from_class(&dir, &enum_class, style, WritePolicy::Overwrite));
            debug!(entity = %ctx.entity.name, "generated enumeration");
            return Ok(());
        }

        let base = base_record::base_record_class(ctx)?;
        out.files.push(GeneratedFile::from_class(&dir, &base, style, WritePolicy::Overwrite));

        let record = record::record_class(ctx)?;
        out.files.push(GeneratedFile::from_class(&dir, &record, style, WritePolicy::CreateOnly));

        let base_manager = base_manager::base_manager_class(ctx)?;
        out.files.push(GeneratedFile::from_class(&dir, &base_manager, style, WritePolicy::Overwrite));

        let manager = manager::manager_class(ctx)?;
        out.files.push(GeneratedFile::from_class(&dir, &manager, style, WritePolicy::CreateOnly));

        debug!(entity = %ctx.entity.name, kind = ctx.entity.kind.as_str(), "generated entity");
        Ok(())
    }
}

impl Generator for AndroidGenerator {
    type Output = AndroidOutput;

    fn generate(&self, schema: &DatabaseSchema) -> anyhow::Result<Self::Output> {
        let mut out = AndroidOutput::default();
        let created = self.created();

        for database in &schema.databases {
            let namespace = self.namespace(database);
            for entity in database.entities() {
                let ctx = EntityContext {
                    config: self.config.clone(),
                    database,
                    entity,
                    namespace: namespace.clone(),
                    package_base: self.package_base.clone(),
                    database_subdir: self.config.include_database_name_in_package,
                    created: created.clone(),
                };
                self.generate_entity(&ctx, &mut out).with_context(|| {
                    format!("generating {} {}", entity.kind.as_str(), entity.name)
                })?;
            }
            info!(database = %database.name, package = %namespace, "generated database sources");
        }

        match self.config.language {
            Language::Kotlin => {
                for (dir, class, policy) in database::lifecycle_classes(self, schema, &created)? {
                    out.files.push(GeneratedFile::from_class(&dir, &class, &self.style, policy));
                }
            }
            Language::Java => {
                for (dir, class, policy) in java::lifecycle_classes(self, schema, &created)? {
                    out.files.push(GeneratedFile::from_java(&dir, &class, &self.style, policy));
                }
            }
        }

        info!(files = out.files.len(), language = %self.config.language, "rendered sources");
        Ok(out)
    }
}

/// What the per-entity mappers need to know about their surroundings.
#[derive(Debug, Clone)]
pub(crate) struct EntityContext<'a> {
    pub config: GeneratorConfig,
    pub database: &'a SchemaDatabase,
    pub entity: &'a SchemaEntity,
    /// Base package, plus the database segment when configured.
    pub namespace: String,
    pub package_base: String,
    database_subdir: bool,
    /// "Created:" timestamp of editable files.
    pub created: String,
}

impl<'a> EntityContext<'a> {
    pub fn class_name(&self) -> String {
        self.entity.class_name()
    }

    pub fn package(&self) -> String {
        self.sibling_package(&self.class_name())
    }

    /// Package of another entity class of the same database.
    pub fn sibling_package(&self, class_name: &str) -> String {
        format!("{}.{}", self.namespace, class_name.to_lowercase())
    }

    pub fn const_name(&self) -> String {
        format!("{}Const", self.class_name())
    }

    pub fn base_record_name(&self) -> String {
        format!("{}BaseRecord", self.class_name())
    }

    pub fn base_manager_name(&self) -> String {
        format!("{}BaseManager", self.class_name())
    }

    pub fn manager_name(&self) -> String {
        format!("{}Manager", self.class_name())
    }

    /// Directory below the output root, mirroring the package.
    pub fn output_dir(&self) -> PathBuf {
        let mut dir = PathBuf::new();
        if self.database_subdir {
            dir.push(self.database.name.to_lowercase());
        }
        dir.push(self.class_name().to_lowercase());
        dir
    }

    /// Resolved fields in declaration order.
    pub fn fields(&self) -> Result<Vec<FieldModel<'a>>> {
        self.entity
            .fields
            .iter()
            .map(|field| FieldModel::resolve(self, field))
            .collect()
    }
}

/// `/* Name.kt ... */` banner of generated base files.
pub(crate) fn generated_header(file_name: &str) -> String {
    format!("/*\n * {file_name}\n *\n * GENERATED FILE - DO NOT EDIT\n * CHECKSTYLE:OFF\n * \n */\n")
}

/// Banner of editable files.
pub(crate) fn editable_header(file_name: &str, created: &str) -> String {
    format!("/*\n * {file_name}\n *\n * Created: {created}\n */\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use dbtools_schema::{EntityType, FieldType, SchemaField};

    pub(crate) fn context_for(database: &SchemaDatabase, table: usize) -> EntityContext<'_> {
        EntityContext {
            config: GeneratorConfig::default(),
            database,
            entity: &database.tables[table],
            namespace: "org.sample".to_string(),
            package_base: "org.sample".to_string(),
            database_subdir: false,
            created: "2024-01-01 00:00:00".to_string(),
        }
    }

    fn schema() -> DatabaseSchema {
        let mut id = SchemaField::new("_id", FieldType::Bigint);
        id.primary_key = true;
        id.increment = true;
        let mut person = SchemaEntity::new(EntityType::Table, "PERSON");
        person.fields = vec![id, SchemaField::new("NAME", FieldType::Varchar)];
        DatabaseSchema {
            databases: vec![SchemaDatabase {
                name: "Main".to_string(),
                tables: vec![person],
                ..Default::default()
            }],
        }
    }

    fn generator(config: GeneratorConfig) -> AndroidGenerator {
        let at = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        AndroidGenerator::new("org.sample", config).with_timestamp(at)
    }

    #[test]
    fn paths_mirror_packages() {
        let config = GeneratorConfig {
            include_database_name_in_package: true,
            ..Default::default()
        };
        let out = generator(config).generate(&schema()).unwrap();

        let record = out.file("PersonBaseRecord").unwrap();
        assert_eq!(
            record.relative_path,
            PathBuf::from("main/person/PersonBaseRecord.kt")
        );
        assert!(record.contents.contains("package org.sample.main.person\n"));
        assert_eq!(
            out.file("DatabaseManager").unwrap().relative_path,
            PathBuf::from("DatabaseManager.kt")
        );
    }

    #[test]
    fn editable_files_are_create_only() {
        let out = generator(GeneratorConfig::default()).generate(&schema()).unwrap();
        let policy = |name: &str| out.file(name).unwrap().policy;

        assert_eq!(policy("PersonConst"), WritePolicy::Overwrite);
        assert_eq!(policy("PersonBaseRecord"), WritePolicy::Overwrite);
        assert_eq!(policy("PersonBaseManager"), WritePolicy::Overwrite);
        assert_eq!(policy("Person"), WritePolicy::CreateOnly);
        assert_eq!(policy("PersonManager"), WritePolicy::CreateOnly);
        assert_eq!(policy("DatabaseBaseManager"), WritePolicy::Overwrite);
        assert_eq!(policy("DatabaseManager"), WritePolicy::CreateOnly);
        assert_eq!(policy("AppDatabaseConfig"), WritePolicy::CreateOnly);
        assert_eq!(policy("MainDatabaseManagers"), WritePolicy::Overwrite);
    }

    #[test]
    fn java_output_uses_java_files() {
        let config = GeneratorConfig {
            language: Language::Java,
            ..Default::default()
        };
        let out = generator(config).generate(&schema()).unwrap();

        let record = out.file("PersonBaseRecord").unwrap();
        assert_eq!(record.relative_path, PathBuf::from("person/PersonBaseRecord.java"));
        assert!(record.contents.contains("package org.sample.person;\n"));
        assert_eq!(out.file("Person").unwrap().policy, WritePolicy::CreateOnly);
        assert_eq!(
            out.file("MainDatabaseManagers").unwrap().relative_path,
            PathBuf::from("MainDatabaseManagers.java")
        );
        assert!(out.files.iter().all(|f| f.relative_path.extension() == Some(Language::Java.extension().as_ref())));
    }

    #[test]
    fn editable_files_carry_timestamp() {
        let out = generator(GeneratorConfig::default()).generate(&schema()).unwrap();
        assert!(out
            .file("Person")
            .unwrap()
            .contents
            .contains("Created: 2024-01-01 00:00:00"));
    }
}
