use std::fs;

use chrono::{Local, TimeZone};
use dbtools_codegen::generators::android::{AndroidGenerator, AndroidOutput, WritePolicy};
use dbtools_codegen::generators::{DateType, Generator, GeneratorConfig, Language};
use dbtools_codegen::{CodeGenerator, CodegenError};
use dbtools_schema::{DatabaseSchema, EntityType, FieldType, SchemaDatabase, SchemaEntity, SchemaField};

const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dbSchema>
    <database name="main">
        <table name="INDIVIDUAL_TYPE" className="IndividualType" enumerations="HEAD,SPOUSE,CHILD">
            <field name="_id" jdbcDataType="BIGINT" primaryKey="true" increment="true"/>
            <field name="NAME" jdbcDataType="VARCHAR" size="255" notNull="true"/>
        </table>
        <table name="INDIVIDUAL">
            <field name="_id" jdbcDataType="BIGINT" primaryKey="true" increment="true"/>
            <field name="INDIVIDUAL_TYPE_ID" jdbcDataType="INTEGER" foreignKeyTable="INDIVIDUAL_TYPE"
                   foreignKeyField="_id" foreignKeyType="ENUM" enumerationDefault="SPOUSE"/>
            <field name="FIRST_NAME" jdbcDataType="VARCHAR" size="255" notNull="true" defaultValue="Bob"/>
            <field name="NICKNAME" jdbcDataType="VARCHAR" size="255"/>
            <field name="ACTIVE" jdbcDataType="BOOLEAN" notNull="true" defaultValue="1"/>
            <field name="BIRTH_DATE" jdbcDataType="DATE"/>
            <field name="LAST_MODIFIED" jdbcDataType="TIMESTAMP" notNull="true"/>
            <field name="PHOTO" jdbcDataType="BLOB"/>
        </table>
        <table name="AUDIT_LOG">
            <field name="MESSAGE" jdbcDataType="VARCHAR"/>
        </table>
        <view name="INDIVIDUAL_VIEW">
            <field name="_id" jdbcDataType="BIGINT"/>
            <field name="NAME" jdbcDataType="VARCHAR"/>
        </view>
        <query name="INDIVIDUAL_QUERY">
            <field name="NAME" jdbcDataType="VARCHAR"/>
        </query>
    </database>
</dbSchema>
"#;

fn generate(config: GeneratorConfig) -> AndroidOutput {
    let schema = dbtools_schema::parse_str(SCHEMA).unwrap();
    let codegen = CodeGenerator::from_schema(schema).unwrap();
    let at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    codegen
        .generate(AndroidGenerator::new("org.sample.db", config).with_timestamp(at))
        .unwrap()
}

fn contents<'a>(output: &'a AndroidOutput, class_name: &str) -> &'a str {
    &output
        .file(class_name)
        .unwrap_or_else(|| panic!("{class_name} was not generated"))
        .contents
}

#[test]
fn generates_every_artifact() {
    let output = generate(GeneratorConfig::default());
    let mut names: Vec<&str> = output.files.iter().filter_map(|f| f.file_name()).collect();
    names.sort_unstable();

    assert_eq!(
        names,
        [
            "AppDatabaseConfig.kt",
            "AuditLog.kt",
            "AuditLogBaseManager.kt",
            "AuditLogBaseRecord.kt",
            "AuditLogConst.kt",
            "AuditLogManager.kt",
            "DatabaseBaseManager.kt",
            "DatabaseManager.kt",
            "DatabaseManagerConst.kt",
            "Individual.kt",
            "IndividualBaseManager.kt",
            "IndividualBaseRecord.kt",
            "IndividualConst.kt",
            "IndividualManager.kt",
            "IndividualQuery.kt",
            "IndividualQueryBaseManager.kt",
            "IndividualQueryBaseRecord.kt",
            "IndividualQueryConst.kt",
            "IndividualQueryManager.kt",
            "IndividualType.kt",
            "IndividualTypeConst.kt",
            "IndividualView.kt",
            "IndividualViewBaseManager.kt",
            "IndividualViewBaseRecord.kt",
            "IndividualViewConst.kt",
            "IndividualViewManager.kt",
            "MainDatabaseManagers.kt",
        ]
    );
}

#[test]
fn column_constants_match_fields() {
    let output = generate(GeneratorConfig::default());
    let text = contents(&output, "IndividualConst");

    for (column, name) in [
        ("ID", "_id"),
        ("INDIVIDUAL_TYPE_ID", "INDIVIDUAL_TYPE_ID"),
        ("FIRST_NAME", "FIRST_NAME"),
        ("NICKNAME", "NICKNAME"),
        ("ACTIVE", "ACTIVE"),
        ("BIRTH_DATE", "BIRTH_DATE"),
        ("LAST_MODIFIED", "LAST_MODIFIED"),
        ("PHOTO", "PHOTO"),
    ] {
        assert!(text.contains(&format!("    const val C_{column} = \"{name}\"\n")));
        assert!(text.contains(&format!(
            "    const val FULL_C_{column} = \"INDIVIDUAL.{name}\"\n"
        )));
    }
    assert_eq!(text.matches("const val FULL_C_").count(), 8);
    assert!(text.contains("import org.sample.db.individualtype.IndividualType\n"));
}

#[test]
fn record_defaults_follow_field_types() {
    let output = generate(GeneratorConfig::default());
    let text = contents(&output, "IndividualBaseRecord");

    assert!(text.contains("    var id: Long = 0\n"));
    assert!(text.contains("    var individualTypeId: IndividualType = IndividualType.SPOUSE\n"));
    assert!(text.contains("    var firstName: String = \"Bob\"\n"));
    assert!(text.contains("    var nickname: String? = \"\"\n"));
    assert!(text.contains("    var active: Boolean = true\n"));
    assert!(text.contains("    var birthDate: java.util.Date? = null\n"));
    assert!(text.contains("    var lastModified: java.util.Date = java.util.Date()\n"));
    assert!(text.contains("    var photo: ByteArray? = ByteArray(0)\n"));
}

#[test]
fn one_primary_key_accessor_set_per_record() {
    let output = generate(GeneratorConfig::default());
    for record in [
        "IndividualBaseRecord",
        "AuditLogBaseRecord",
        "IndividualViewBaseRecord",
        "IndividualQueryBaseRecord",
    ] {
        let text = contents(&output, record);
        assert_eq!(text.matches("override fun getIdColumnName(): String").count(), 1);
        assert_eq!(text.matches("override fun setPrimaryKeyId(").count(), 1);
    }

    let unkeyed = contents(&output, "AuditLogBaseRecord");
    assert!(unkeyed.contains("        return \"NO_PRIMARY_KEY\"\n"));
    assert!(unkeyed.contains("    override fun setPrimaryKeyId(id: Long) {\n        // NO_PRIMARY_KEY\n    }\n"));
    assert!(contents(&output, "AuditLogBaseManager")
        .contains("override val primaryKey: String = \"NO_PRIMARY_KEY\"\n"));
}

#[test]
fn nullable_fields_bind_null() {
    let output = generate(GeneratorConfig::default());
    let text = contents(&output, "IndividualBaseRecord");

    assert!(text.contains(
        "        if (nickname != null) {\n            statement.bindString(3, nickname!!)\n        } else {\n            statement.bindNull(3)\n        }\n"
    ));
    assert!(text.contains("        statement.bindLong(4, if (active) 1L else 0L)\n"));
    assert!(text.contains("        statement.bindLong(8, id)\n"));
}

#[test]
fn date_type_changes_property_types() {
    let config = GeneratorConfig {
        date_type: DateType::Jsr310,
        ..Default::default()
    };
    let output = generate(config);
    let text = contents(&output, "IndividualBaseRecord");

    assert!(text.contains("    var birthDate: org.threeten.bp.LocalDate? = null\n"));
    assert!(text.contains(
        "    var lastModified: org.threeten.bp.LocalDateTime = org.threeten.bp.LocalDateTime.now()\n"
    ));
    assert!(text.contains("        copy.lastModified = lastModified\n"));
}

#[test]
fn duplicate_primary_key_is_rejected() {
    let mut first = SchemaField::new("A_ID", FieldType::Integer);
    first.primary_key = true;
    let mut second = SchemaField::new("B_ID", FieldType::Integer);
    second.primary_key = true;
    let mut table = SchemaEntity::new(EntityType::Table, "PAIR");
    table.fields = vec![first, second];
    let schema = DatabaseSchema {
        databases: vec![SchemaDatabase {
            name: "main".to_string(),
            tables: vec![table],
            ..Default::default()
        }],
    };

    let err = AndroidGenerator::new("org.sample", GeneratorConfig::default())
        .generate(&schema)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodegenError>(),
        Some(CodegenError::DuplicatePrimaryKey { .. })
    ));
}

#[test]
fn regeneration_keeps_editable_files() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.xml");
    fs::write(&schema_path, SCHEMA).unwrap();
    let out = dir.path().join("src");

    let first = dbtools_codegen::generate_android(
        &schema_path,
        &out,
        "org.sample.db",
        GeneratorConfig::default(),
    )
    .unwrap();
    assert!(first.is_success());
    assert!(first.skipped.is_empty());

    let record = out.join("individual/Individual.kt");
    fs::write(&record, "// edited").unwrap();

    let second = dbtools_codegen::generate_android(
        &schema_path,
        &out,
        "org.sample.db",
        GeneratorConfig::default(),
    )
    .unwrap();
    assert!(second.skipped.contains(&record));
    assert_eq!(fs::read_to_string(&record).unwrap(), "// edited");
    assert!(out.join("individual/IndividualBaseRecord.kt").exists());
    assert_eq!(
        second.written.len() + second.skipped.len(),
        first.written.len()
    );
}

#[test]
fn editable_policies() {
    let output = generate(GeneratorConfig::default());
    let create_only: Vec<&str> = output
        .files
        .iter()
        .filter(|f| f.policy == WritePolicy::CreateOnly)
        .filter_map(|f| f.file_name())
        .collect();
    assert!(create_only.contains(&"Individual.kt"));
    assert!(create_only.contains(&"IndividualManager.kt"));
    assert!(!create_only.contains(&"IndividualBaseRecord.kt"));
}

fn java() -> GeneratorConfig {
    GeneratorConfig {
        language: Language::Java,
        ..Default::default()
    }
}

#[test]
fn java_generates_every_artifact() {
    let kotlin = generate(GeneratorConfig::default());
    let output = generate(java());

    let stems = |output: &AndroidOutput| -> Vec<String> {
        let mut stems: Vec<String> = output
            .files
            .iter()
            .filter_map(|f| f.relative_path.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        stems.sort();
        stems
    };
    assert_eq!(stems(&output), stems(&kotlin));
    assert!(output
        .files
        .iter()
        .all(|f| f.file_name().is_some_and(|n| n.ends_with(".java"))));
    assert!(contents(&output, "IndividualConst").starts_with("/*\n * IndividualConst.java\n"));
}

#[test]
fn java_records_use_fields_and_accessors() {
    let output = generate(java());
    let text = contents(&output, "IndividualBaseRecord");

    assert!(text.contains("package org.sample.db.individual;\n"));
    assert!(text.contains("public abstract class IndividualBaseRecord extends AndroidBaseRecord {\n"));
    assert!(text.contains("    private long id = 0L;\n"));
    assert!(text.contains("    private String firstName = \"Bob\";\n"));
    assert!(text.contains("    private boolean active = true;\n"));
    assert!(text.contains("    public boolean isActive() {\n        return active;\n    }\n"));
    assert!(text.contains(
        "        if (nickname != null) {\n            statement.bindString(3, nickname);\n        } else {\n            statement.bindNull(3);\n        }\n"
    ));
    assert!(text.contains("        statement.bindLong(4, active ? 1 : 0);\n"));
    assert!(text.contains("        statement.bindLong(8, id);\n"));
}

#[test]
fn java_managers_follow_entity_kind() {
    let output = generate(java());

    assert!(contents(&output, "IndividualBaseManager").contains(
        "public abstract class IndividualBaseManager extends AndroidBaseManagerWritable<Individual> {\n"
    ));
    assert!(contents(&output, "IndividualViewBaseManager")
        .contains("extends AndroidBaseManagerReadOnly<IndividualView> {\n"));
    assert!(contents(&output, "IndividualType").contains("public enum IndividualType {\n"));
    assert!(contents(&output, "DatabaseManager")
        .contains("public class DatabaseManager extends DatabaseBaseManager {\n"));
    assert!(contents(&output, "MainDatabaseManagers")
        .contains("    public static IndividualManager getIndividualManager() {\n"));
}

#[test]
fn java_regeneration_keeps_editable_files() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.xml");
    fs::write(&schema_path, SCHEMA).unwrap();
    let out = dir.path().join("src");

    dbtools_codegen::generate_android(&schema_path, &out, "org.sample.db", java()).unwrap();
    let manager = out.join("individual/IndividualManager.java");
    fs::write(&manager, "// edited").unwrap();

    let second =
        dbtools_codegen::generate_android(&schema_path, &out, "org.sample.db", java()).unwrap();
    assert!(second.skipped.contains(&manager));
    assert_eq!(fs::read_to_string(&manager).unwrap(), "// edited");
    assert!(out.join("individual/IndividualBaseManager.java").exists());
    assert!(!out.join("individual/IndividualBaseManager.kt").exists());
}
