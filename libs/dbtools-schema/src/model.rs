//! In-memory schema model.
//!
//! A schema holds one or more databases, each with tables, views and queries.
//! Views and queries share the table representation, tagged by [`EntityType`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::naming;
use crate::types::FieldType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    pub databases: Vec<SchemaDatabase>,
}

impl DatabaseSchema {
    pub fn database(&self, name: &str) -> Option<&SchemaDatabase> {
        self.databases
            .iter()
            .find(|db| db.name.eq_ignore_ascii_case(name))
    }

    /// Check every database, stopping at the first violation.
    pub fn validate(&self) -> Result<()> {
        for database in &self.databases {
            database.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDatabase {
    pub name: String,
    pub fields_default_not_null: Option<bool>,
    pub tables: Vec<SchemaEntity>,
    pub views: Vec<SchemaEntity>,
    pub queries: Vec<SchemaEntity>,
}

impl SchemaDatabase {
    /// All entities in generation order: tables, then views, then queries.
    pub fn entities(&self) -> impl Iterator<Item = &SchemaEntity> {
        self.tables
            .iter()
            .chain(self.views.iter())
            .chain(self.queries.iter())
    }

    pub fn table(&self, name: &str) -> Option<&SchemaEntity> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn enumeration_tables(&self) -> impl Iterator<Item = &SchemaEntity> {
        self.tables.iter().filter(|t| t.is_enumeration_table())
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entity in self.tables.iter().chain(self.views.iter()) {
            if !seen.insert(entity.name.to_ascii_lowercase()) {
                return Err(SchemaError::DuplicateEntity {
                    database: self.name.clone(),
                    kind: entity.kind.as_str(),
                    name: entity.name.clone(),
                });
            }
        }

        let mut queries = HashSet::new();
        for query in &self.queries {
            if !queries.insert(query.name.to_ascii_lowercase()) {
                return Err(SchemaError::DuplicateEntity {
                    database: self.name.clone(),
                    kind: query.kind.as_str(),
                    name: query.name.clone(),
                });
            }
        }

        for entity in self.entities() {
            entity.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Table,
    View,
    Query,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Table => "table",
            EntityType::View => "view",
            EntityType::Query => "query",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEntity {
    pub kind: EntityType,
    pub name: String,
    pub class_name: Option<String>,
    /// Raw `enumerations` attribute: `A,B` or `A=First,B=Second`.
    pub enumerations: String,
    pub read_only: bool,
    pub fields_default_not_null: Option<bool>,
    pub unique_declarations: Vec<Vec<String>>,
    pub fields: Vec<SchemaField>,
}

impl SchemaEntity {
    pub fn new(kind: EntityType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            class_name: None,
            enumerations: String::new(),
            read_only: false,
            fields_default_not_null: None,
            unique_declarations: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Explicit `className`, or the entity name in UpperCamelCase.
    pub fn class_name(&self) -> String {
        match &self.class_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => naming::class_name(&self.name),
        }
    }

    pub fn is_table(&self) -> bool {
        self.kind == EntityType::Table
    }

    pub fn is_enumeration_table(&self) -> bool {
        self.is_table() && !self.enumerations.trim().is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only || !self.is_table()
    }

    pub fn primary_key(&self) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.primary_key)
    }

    pub fn foreign_key_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.is_foreign_key())
    }

    /// Parsed enumeration literals of an enumeration table, in declaration order.
    pub fn table_enums(&self) -> Vec<TableEnum> {
        self.enumerations
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| match item.split_once('=') {
                Some((name, value)) if !value.trim().is_empty() => TableEnum {
                    name: name.trim().replace(' ', ""),
                    value: value.trim().to_string(),
                },
                Some((name, _)) => TableEnum::from_name(name),
                None => TableEnum::from_name(item),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let mut primary_key: Option<&SchemaField> = None;
        let mut names = HashSet::new();
        let mut constants = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.to_ascii_lowercase()) {
                return Err(SchemaError::DuplicateField {
                    entity: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            let constant = naming::constant_name(&field.variable_name());
            if !constants.insert(constant.clone()) {
                return Err(SchemaError::DuplicateColumnConstant {
                    entity: self.name.clone(),
                    field: field.name.clone(),
                    constant,
                });
            }

            if field.primary_key {
                if primary_key.is_some() {
                    return Err(SchemaError::DuplicatePrimaryKey {
                        entity: self.name.clone(),
                        field: field.name.clone(),
                    });
                }
                primary_key = Some(field);
            }

            if !field.enumerations.trim().is_empty()
                && !field.jdbc_data_type.is_number()
                && field.jdbc_data_type != FieldType::Varchar
            {
                return Err(SchemaError::InvalidEnumerationField {
                    entity: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One literal of an enumeration table and its display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEnum {
    pub name: String,
    pub value: String,
}

impl TableEnum {
    fn from_name(name: &str) -> Self {
        let name = name.trim().replace(' ', "");
        Self {
            value: naming::display_value(&name),
            name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignKeyType {
    #[default]
    Ignore,
    OneToOne,
    ManyToOne,
    OneToMany,
    Enum,
}

impl ForeignKeyType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IGNORE" => Some(ForeignKeyType::Ignore),
            "ONETOONE" => Some(ForeignKeyType::OneToOne),
            "MANYTOONE" => Some(ForeignKeyType::ManyToOne),
            "ONETOMANY" => Some(ForeignKeyType::OneToMany),
            "ENUM" => Some(ForeignKeyType::Enum),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub name: String,
    pub jdbc_data_type: FieldType,
    pub var_name: Option<String>,
    pub size: Option<u32>,
    pub decimals: Option<u32>,
    /// Effective nullability after database and entity defaults were applied.
    pub not_null: bool,
    pub default_value: String,
    pub primary_key: bool,
    pub increment: bool,
    pub unique: bool,
    pub index: bool,
    pub foreign_key_table: Option<String>,
    pub foreign_key_field: Option<String>,
    pub foreign_key_type: ForeignKeyType,
    pub enumeration_class: Option<String>,
    pub enumeration_default: Option<String>,
    /// Inline enumeration literals: `A,B,C`.
    pub enumerations: String,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, jdbc_data_type: FieldType) -> Self {
        Self {
            name: name.into(),
            jdbc_data_type,
            var_name: None,
            size: None,
            decimals: None,
            not_null: false,
            default_value: String::new(),
            primary_key: false,
            increment: false,
            unique: false,
            index: false,
            foreign_key_table: None,
            foreign_key_field: None,
            foreign_key_type: ForeignKeyType::Ignore,
            enumeration_class: None,
            enumeration_default: None,
            enumerations: String::new(),
        }
    }

    /// Explicit `varName`, or the column name in lowerCamelCase.
    pub fn variable_name(&self) -> String {
        match &self.var_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => naming::variable_name(&self.name),
        }
    }

    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key_table
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn is_foreign_key_enumeration(&self) -> bool {
        self.foreign_key_type == ForeignKeyType::Enum
    }

    /// A numeric column whose value is the ordinal of an enumeration.
    pub fn is_enumeration(&self) -> bool {
        let declares_enum = !self.enumerations.trim().is_empty()
            || self.is_foreign_key_enumeration()
            || self
                .enumeration_class
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty());
        declares_enum && self.jdbc_data_type.is_number()
    }

    pub fn enum_values(&self) -> Vec<String> {
        self.enumerations
            .split(',')
            .map(|v| v.trim().replace(' ', ""))
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn has_default_value(&self) -> bool {
        let value = self.default_value.trim();
        !value.is_empty() && !value.eq_ignore_ascii_case("null")
    }
}
