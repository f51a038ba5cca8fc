//! Schema XML reader.
//!
//! ```xml
//! <dbSchema>
//!   <database name="main" fieldsDefaultNotNull="true">
//!     <table name="INDIVIDUAL">
//!       <field name="_id" jdbcDataType="BIGINT" primaryKey="true" increment="true"/>
//!       <field name="NAME" jdbcDataType="VARCHAR" size="255"/>
//!       <unique><uniqueField name="NAME"/></unique>
//!     </table>
//!     <view name="INDIVIDUAL_VIEW">...</view>
//!     <query name="INDIVIDUAL_QUERY">...</query>
//!   </database>
//! </dbSchema>
//! ```
//!
//! Nullability is resolved while reading: an explicit `notNull` wins, then the
//! entity's `fieldsDefaultNotNull`, then the database's. Foreign keys of type
//! `ENUM` are always not-null.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::model::{
    DatabaseSchema, EntityType, ForeignKeyType, SchemaDatabase, SchemaEntity, SchemaField,
};
use crate::types::FieldType;

/// Read and validate a schema file.
pub fn parse_file(path: &Path) -> Result<DatabaseSchema> {
    let text = fs::read_to_string(path)?;
    let schema = parse_str(&text)?;
    debug!(
        path = %path.display(),
        databases = schema.databases.len(),
        "parsed schema file"
    );
    Ok(schema)
}

/// Parse and validate a schema document.
pub fn parse_str(xml: &str) -> Result<DatabaseSchema> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "dbSchema" {
        return Err(SchemaError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    let databases = children(root, "database")
        .map(parse_database)
        .collect::<Result<Vec<_>>>()?;

    let schema = DatabaseSchema { databases };
    schema.validate()?;
    Ok(schema)
}

fn parse_database(node: Node) -> Result<SchemaDatabase> {
    let name = required(node, "database", "name")?;
    let fields_default_not_null = optional_bool(node, "fieldsDefaultNotNull")?;

    let mut database = SchemaDatabase {
        name,
        fields_default_not_null,
        ..Default::default()
    };

    for child in node.children().filter(Node::is_element) {
        let kind = match child.tag_name().name() {
            "table" => EntityType::Table,
            "view" => EntityType::View,
            "query" => EntityType::Query,
            _ => continue,
        };
        let entity = parse_entity(child, kind, fields_default_not_null)?;
        match kind {
            EntityType::Table => database.tables.push(entity),
            EntityType::View => database.views.push(entity),
            EntityType::Query => database.queries.push(entity),
        }
    }

    Ok(database)
}

fn parse_entity(
    node: Node,
    kind: EntityType,
    database_default_not_null: Option<bool>,
) -> Result<SchemaEntity> {
    let element = match kind {
        EntityType::Table => "table",
        EntityType::View => "view",
        EntityType::Query => "query",
    };
    let mut entity = SchemaEntity::new(kind, required(node, element, "name")?);
    entity.class_name = attribute(node, "className");
    entity.enumerations = attribute(node, "enumerations").unwrap_or_default();
    entity.read_only = optional_bool(node, "readOnly")?.unwrap_or(false);
    entity.fields_default_not_null = optional_bool(node, "fieldsDefaultNotNull")?;

    let default_not_null = entity
        .fields_default_not_null
        .or(database_default_not_null)
        .unwrap_or(false);

    for field in children(node, "field") {
        entity.fields.push(parse_field(field, default_not_null)?);
    }

    for unique in children(node, "unique") {
        let columns = children(unique, "uniqueField")
            .map(|f| required(f, "uniqueField", "name"))
            .collect::<Result<Vec<_>>>()?;
        if !columns.is_empty() {
            entity.unique_declarations.push(columns);
        }
    }

    Ok(entity)
}

fn parse_field(node: Node, default_not_null: bool) -> Result<SchemaField> {
    let name = required(node, "field", "name")?;
    let data_type: FieldType = required(node, "field", "jdbcDataType")?.parse()?;

    let mut field = SchemaField::new(name, data_type);
    field.var_name = attribute(node, "varName");
    field.size = optional_u32(node, "size")?;
    field.decimals = optional_u32(node, "decimals")?;
    field.default_value = attribute(node, "defaultValue").unwrap_or_default();
    field.primary_key = optional_bool(node, "primaryKey")?.unwrap_or(false);
    field.increment = optional_bool(node, "increment")?.unwrap_or(false);
    field.unique = optional_bool(node, "unique")?.unwrap_or(false);
    field.index = optional_bool(node, "index")?.unwrap_or(false);
    field.foreign_key_table = attribute(node, "foreignKeyTable");
    field.foreign_key_field = attribute(node, "foreignKeyField");
    field.enumeration_class = attribute(node, "enumerationClass");
    field.enumeration_default = attribute(node, "enumerationDefault");
    field.enumerations = attribute(node, "enumerations").unwrap_or_default();

    if let Some(value) = attribute(node, "foreignKeyType") {
        field.foreign_key_type =
            ForeignKeyType::parse(&value).ok_or(SchemaError::InvalidAttribute {
                attribute: "foreignKeyType",
                value,
            })?;
    }

    field.not_null = optional_bool(node, "notNull")?.unwrap_or(default_not_null);
    if field.is_foreign_key_enumeration() {
        field.not_null = true;
    }

    Ok(field)
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn attribute(node: Node, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(node: Node, element: &'static str, name: &'static str) -> Result<String> {
    attribute(node, name).ok_or(SchemaError::MissingAttribute {
        element,
        attribute: name,
    })
}

fn optional_bool(node: Node, name: &'static str) -> Result<Option<bool>> {
    match attribute(node, name) {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(value) if value.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(value) => Err(SchemaError::InvalidAttribute {
            attribute: name,
            value,
        }),
    }
}

fn optional_u32(node: Node, name: &'static str) -> Result<Option<u32>> {
    attribute(node, name)
        .map(|value| {
            value.parse::<u32>().map_err(|_| SchemaError::InvalidAttribute {
                attribute: name,
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unexpected_root() {
        let err = parse_str("<schema/>").unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedRoot(ref name) if name == "schema"));
    }

    #[test]
    fn entity_default_overrides_database_default() {
        let schema = parse_str(
            r#"<dbSchema>
                <database name="main" fieldsDefaultNotNull="true">
                    <table name="A" fieldsDefaultNotNull="false">
                        <field name="X" jdbcDataType="INTEGER"/>
                        <field name="Y" jdbcDataType="INTEGER" notNull="true"/>
                    </table>
                    <table name="B">
                        <field name="X" jdbcDataType="INTEGER"/>
                    </table>
                </database>
            </dbSchema>"#,
        )
        .unwrap();

        let db = &schema.databases[0];
        assert!(!db.tables[0].fields[0].not_null);
        assert!(db.tables[0].fields[1].not_null);
        assert!(db.tables[1].fields[0].not_null);
    }

    #[test]
    fn enum_foreign_keys_are_forced_not_null() {
        let schema = parse_str(
            r#"<dbSchema><database name="main">
                <table name="PERSON">
                    <field name="TYPE_ID" jdbcDataType="INTEGER" notNull="false"
                           foreignKeyTable="PERSON_TYPE" foreignKeyField="_id" foreignKeyType="ENUM"/>
                </table>
            </database></dbSchema>"#,
        )
        .unwrap();
        assert!(schema.databases[0].tables[0].fields[0].not_null);
    }

    #[test]
    fn invalid_boolean_attribute_is_reported() {
        let err = parse_str(
            r#"<dbSchema><database name="main">
                <table name="T"><field name="X" jdbcDataType="INTEGER" notNull="yes"/></table>
            </database></dbSchema>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidAttribute { attribute: "notNull", .. }
        ));
    }
}
