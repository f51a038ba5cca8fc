use std::fs;

use dbtools_schema::{EntityType, FieldType, ForeignKeyType, SchemaError};

const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dbSchema>
    <database name="main" fieldsDefaultNotNull="true">
        <table name="INDIVIDUAL_TYPE" className="IndividualType" enumerations="HEAD,SPOUSE,CHILD">
            <field name="_id" jdbcDataType="BIGINT" primaryKey="true" increment="true"/>
            <field name="NAME" jdbcDataType="VARCHAR" size="255" unique="true"/>
        </table>
        <table name="INDIVIDUAL">
            <field name="_id" jdbcDataType="BIGINT" primaryKey="true" increment="true"/>
            <field name="INDIVIDUAL_TYPE_ID" jdbcDataType="INTEGER" foreignKeyTable="INDIVIDUAL_TYPE"
                   foreignKeyField="_id" foreignKeyType="ENUM" enumerationDefault="HEAD"/>
            <field name="FIRST_NAME" jdbcDataType="VARCHAR" size="255" varName="givenName"/>
            <field name="BIRTH_DATE" jdbcDataType="DATE" notNull="false"/>
            <unique>
                <uniqueField name="FIRST_NAME"/>
                <uniqueField name="BIRTH_DATE"/>
            </unique>
        </table>
        <view name="INDIVIDUAL_VIEW">
            <field name="_id" jdbcDataType="BIGINT" primaryKey="true"/>
            <field name="NAME" jdbcDataType="VARCHAR"/>
        </view>
        <query name="INDIVIDUAL_QUERY">
            <field name="NAME" jdbcDataType="VARCHAR"/>
        </query>
    </database>
</dbSchema>
"#;

#[test]
fn parses_all_entity_kinds() {
    let schema = dbtools_schema::parse_str(SCHEMA).unwrap();
    let db = schema.database("MAIN").unwrap();

    assert_eq!(db.tables.len(), 2);
    assert_eq!(db.views[0].kind, EntityType::View);
    assert_eq!(db.queries[0].kind, EntityType::Query);

    let kinds: Vec<_> = db.entities().map(|e| e.name.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["INDIVIDUAL_TYPE", "INDIVIDUAL", "INDIVIDUAL_VIEW", "INDIVIDUAL_QUERY"]
    );
}

#[test]
fn reads_field_attributes() {
    let schema = dbtools_schema::parse_str(SCHEMA).unwrap();
    let individual = schema.databases[0].table("individual").unwrap();

    let type_id = &individual.fields[1];
    assert_eq!(type_id.jdbc_data_type, FieldType::Integer);
    assert_eq!(type_id.foreign_key_type, ForeignKeyType::Enum);
    assert_eq!(type_id.enumeration_default.as_deref(), Some("HEAD"));
    assert!(type_id.is_enumeration());

    assert_eq!(individual.fields[2].variable_name(), "givenName");
    assert!(!individual.fields[3].not_null);
    assert_eq!(
        individual.unique_declarations,
        vec![vec!["FIRST_NAME".to_string(), "BIRTH_DATE".to_string()]]
    );
    assert_eq!(individual.class_name(), "Individual");
}

#[test]
fn unknown_data_type_is_an_error() {
    let err = dbtools_schema::parse_str(
        r#"<dbSchema><database name="main">
            <table name="T"><field name="X" jdbcDataType="VARCHAR2"/></table>
        </database></dbSchema>"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownFieldType(ref t) if t == "VARCHAR2"));
}

#[test]
fn duplicate_field_names_are_rejected() {
    let err = dbtools_schema::parse_str(
        r#"<dbSchema><database name="main">
            <table name="T">
                <field name="NAME" jdbcDataType="VARCHAR"/>
                <field name="name" jdbcDataType="VARCHAR"/>
            </table>
        </database></dbSchema>"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref field, .. } if field == "name"));
}

#[test]
fn fields_sharing_a_column_constant_are_rejected() {
    let err = dbtools_schema::parse_str(
        r#"<dbSchema><database name="main">
            <table name="T">
                <field name="_id" jdbcDataType="BIGINT" primaryKey="true"/>
                <field name="ID" jdbcDataType="INTEGER"/>
            </table>
        </database></dbSchema>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::DuplicateColumnConstant { ref field, ref constant, .. }
            if field == "ID" && constant == "ID"
    ));
}

#[test]
fn missing_name_is_an_error() {
    let err = dbtools_schema::parse_str(
        r#"<dbSchema><database><table name="T"/></database></dbSchema>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::MissingAttribute {
            element: "database",
            attribute: "name"
        }
    ));
}

#[test]
fn reads_schema_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.xml");
    fs::write(&path, SCHEMA).unwrap();

    let schema = dbtools_schema::parse_file(&path).unwrap();
    assert_eq!(schema.databases[0].name, "main");
}

#[test]
fn database_ddl_drops_in_reverse_order() {
    let schema = dbtools_schema::parse_str(SCHEMA).unwrap();
    let sql = dbtools_schema::sqlite::database_schema(&schema.databases[0], true);

    let view = sql.find("DROP VIEW IF EXISTS INDIVIDUAL_VIEW;").unwrap();
    let individual = sql.find("DROP TABLE IF EXISTS INDIVIDUAL;").unwrap();
    let individual_type = sql.find("DROP TABLE IF EXISTS INDIVIDUAL_TYPE;").unwrap();
    assert!(view < individual && individual < individual_type);
    assert!(sql.contains("FOREIGN KEY (INDIVIDUAL_TYPE_ID) REFERENCES INDIVIDUAL_TYPE (_id)"));
    assert!(sql.contains("UNIQUE(FIRST_NAME, BIRTH_DATE)"));
}
