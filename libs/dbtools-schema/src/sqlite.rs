//! SQLite DDL rendering.

use crate::model::{SchemaDatabase, SchemaEntity, SchemaField};
use crate::types::FieldType;

/// `CREATE TABLE IF NOT EXISTS` statement, followed by index statements and,
/// for enumeration tables, the rows of the enumeration.
pub fn create_table(table: &SchemaEntity) -> String {
    let mut sql = String::new();
    sql.push_str("CREATE TABLE IF NOT EXISTS ");
    sql.push_str(&table.name);
    sql.push_str(" (\n");

    let columns: Vec<String> = table.fields.iter().map(column_definition).collect();
    sql.push_str(&columns.join(",\n"));

    let unique: Vec<&str> = table
        .fields
        .iter()
        .filter(|f| f.unique)
        .map(|f| f.name.as_str())
        .collect();
    if !unique.is_empty() {
        sql.push_str(&format!(",\n\tUNIQUE({})", unique.join(", ")));
    }

    for field in table.foreign_key_fields() {
        sql.push_str(&format!(
            ",\n\tFOREIGN KEY ({}) REFERENCES {} ({})",
            field.name,
            field.foreign_key_table.as_deref().unwrap_or_default(),
            field.foreign_key_field.as_deref().unwrap_or_default()
        ));
    }

    for declaration in &table.unique_declarations {
        sql.push_str(&format!(",\n\tUNIQUE({})", declaration.join(", ")));
    }

    sql.push_str("\n);\n\n");

    for field in table.fields.iter().filter(|f| f.index) {
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS {table}{column}_IDX ON {table} ({column});\n\n",
            table = table.name,
            column = field.name
        ));
    }

    sql.push_str(&enumeration_inserts(table));
    sql
}

pub fn drop_table(table: &SchemaEntity) -> String {
    format!("DROP TABLE IF EXISTS {};", table.name)
}

pub fn drop_view(view: &SchemaEntity) -> String {
    format!("DROP VIEW IF EXISTS {};", view.name)
}

/// DDL for a whole database: drops (views first, reverse order) when
/// requested, then every table.
pub fn database_schema(database: &SchemaDatabase, include_drops: bool) -> String {
    let mut sql = String::new();
    if include_drops {
        for view in database.views.iter().rev() {
            sql.push_str(&drop_view(view));
            sql.push('\n');
        }
        for table in database.tables.iter().rev() {
            sql.push_str(&drop_table(table));
            sql.push('\n');
        }
        sql.push('\n');
    }

    for table in &database.tables {
        sql.push_str(&create_table(table));
    }
    sql
}

fn column_definition(field: &SchemaField) -> String {
    let mut column = format!(
        "\t{} {}",
        field.name,
        field.jdbc_data_type.sqlite_affinity().as_str()
    );
    if !field.default_value.trim().is_empty() {
        column.push_str(" DEFAULT ");
        column.push_str(&default_value(field));
    }
    if field.not_null && !field.increment {
        column.push_str(" NOT NULL");
    }
    if field.primary_key {
        column.push_str(" PRIMARY KEY");
    }
    if field.increment {
        column.push_str(" AUTOINCREMENT");
    }
    column
}

/// SQL literal for a column default.
pub fn default_value(field: &SchemaField) -> String {
    let value = field.default_value.trim();
    if value.eq_ignore_ascii_case("null") {
        return value.to_string();
    }

    match field.jdbc_data_type {
        t if t.is_boolean() => {
            if value.eq_ignore_ascii_case("true") || value == "1" {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        t if t.is_date() => {
            if value.eq_ignore_ascii_case("now") {
                "CURRENT_TIMESTAMP".to_string()
            } else {
                format!("'{value}'")
            }
        }
        FieldType::Char | FieldType::Varchar | FieldType::Longvarchar | FieldType::Clob => {
            format!("'{}'", value.replace('\'', "''"))
        }
        _ => value.to_string(),
    }
}

fn enumeration_inserts(table: &SchemaEntity) -> String {
    if !table.is_enumeration_table() {
        return String::new();
    }
    let key = table.primary_key();
    let value = table
        .fields
        .iter()
        .find(|f| f.jdbc_data_type == FieldType::Varchar);
    let (Some(key), Some(value)) = (key, value) else {
        return String::new();
    };

    let mut sql = String::from("\n");
    for (ordinal, item) in table.table_enums().iter().enumerate() {
        sql.push_str(&format!(
            "INSERT INTO {} ({}, {}) VALUES ({}, '{}');\n",
            table.name,
            key.name,
            value.name,
            ordinal,
            item.value.replace('\'', "''")
        ));
    }
    sql.push('\n');
    sql
}
