//! Java `<Entity>BaseManager` and the editable `<Entity>Manager`.

use dbtools_schema::EntityType;

use crate::error::Result;
use crate::generators::android::base_record::{primary_key, NO_PRIMARY_KEY};
use crate::generators::android::{editable_header, generated_header, EntityContext};
use crate::java::{JavaClass, JavaClassKind, JavaMethod, JavaVariable, Nullability};

const DOMAIN_PACKAGE: &str = "org.dbtools.android.domain";

/// Runtime superclass. Views and queries are always read only.
fn superclass(ctx: &EntityContext<'_>) -> String {
    let prefix = if ctx.config.rx_java_support { "Rx" } else { "" };
    let access = if ctx.entity.is_read_only() || ctx.entity.kind != EntityType::Table {
        "ReadOnly"
    } else {
        "Writable"
    };
    format!("{prefix}AndroidBaseManager{access}")
}

pub(crate) fn base_manager_class(ctx: &EntityContext<'_>) -> Result<JavaClass> {
    let record = ctx.class_name();
    let constants = ctx.const_name();
    let keyed = primary_key(ctx, &ctx.fields()?)?.is_some();
    let jsr305 = ctx.config.jsr305_support;

    let mut class = JavaClass::new(ctx.base_manager_name(), ctx.package(), JavaClassKind::Class);
    class.is_abstract = true;
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;

    let superclass = superclass(ctx);
    class.add_import(&format!("{}.DatabaseManager", ctx.package_base));
    class.add_import("org.dbtools.android.domain.database.DatabaseWrapper");
    class.add_import(&format!("{DOMAIN_PACKAGE}.{superclass}"));
    class.extends = format!("{superclass}<{record}>");
    if jsr305 {
        class.add_import("javax.annotation.Nonnull");
    }

    class.add_variable(JavaVariable::new("databaseManager", "DatabaseManager"));
    class.add_constructor(
        JavaMethod::constructor(ctx.base_manager_name())
            .with_parameter("databaseManager", "DatabaseManager")
            .with_content("this.databaseManager = databaseManager;"),
    )?;

    let getter = |name: &str, return_type: &str, content: String| {
        let mut method = JavaMethod::new(name, return_type).with_content(content);
        if jsr305 {
            method.nullability = Some(Nullability::Nonnull);
        }
        method
    };
    let database_name = || {
        let parameter = JavaVariable::new("databaseName", "String");
        if jsr305 {
            parameter.with_nullability(Nullability::Nonnull)
        } else {
            parameter
        }
    };

    class.add_method(getter("getDatabaseName", "String", format!("return {constants}.DATABASE;")));
    class.add_method(getter("newRecord", &record, format!("return new {record}();")));
    if ctx.entity.kind != EntityType::Query {
        class.add_method(getter("getTableName", "String", format!("return {constants}.TABLE;")));
    }
    class.add_method(getter("getAllColumns", "String[]", format!("return {constants}.ALL_COLUMNS;")));

    for access in ["Readable", "Writable"] {
        let name = format!("get{access}Database");
        let mut named = getter(
            &name,
            "DatabaseWrapper",
            format!("return databaseManager.{name}(databaseName);"),
        );
        named.add_parameter(database_name());
        class.add_method(named);
        class.add_method(getter(
            &name,
            "DatabaseWrapper",
            format!("return databaseManager.{name}(getDatabaseName());"),
        ));
    }
    let mut android_database = getter(
        "getAndroidDatabase",
        "org.dbtools.android.domain.AndroidDatabase",
        "return databaseManager.getDatabase(databaseName);".to_string(),
    );
    android_database.add_parameter(database_name());
    class.add_method(android_database);
    class.add_method(
        JavaMethod::new("getDatabaseConfig", "org.dbtools.android.domain.config.DatabaseConfig")
            .with_content("return databaseManager.getDatabaseConfig();"),
    );

    let empty = || "return \"\";".to_string();
    let (primary_key, drop_sql, create_sql, insert_sql, update_sql) = match ctx.entity.kind {
        EntityType::Table => (
            if keyed {
                format!("return {constants}.PRIMARY_KEY_COLUMN;")
            } else {
                format!("return \"{NO_PRIMARY_KEY}\";")
            },
            format!("return {constants}.DROP_TABLE;"),
            format!("return {constants}.CREATE_TABLE;"),
            format!("return {constants}.INSERT_STATEMENT;"),
            format!("return {constants}.UPDATE_STATEMENT;"),
        ),
        EntityType::View => (
            "return null;".to_string(),
            format!("return {record}.DROP_VIEW;"),
            format!("return {record}.CREATE_VIEW;"),
            empty(),
            empty(),
        ),
        EntityType::Query => {
            class.add_method(JavaMethod::new("getQuery", "String").abstract_method());
            class.add_method(getter("getTableName", "String", "return getQuery();".to_string()));
            ("return null;".to_string(), empty(), empty(), empty(), empty())
        }
    };
    for (name, content) in [
        ("getPrimaryKey", primary_key),
        ("getDropSql", drop_sql),
        ("getCreateSql", create_sql),
        ("getInsertSql", insert_sql),
        ("getUpdateSql", update_sql),
    ] {
        class.add_method(getter(name, "String", content));
    }

    Ok(class)
}

/// Editable `<Entity>Manager`, created once and then owned by the app.
pub(crate) fn manager_class(ctx: &EntityContext<'_>) -> Result<JavaClass> {
    let mut class = JavaClass::new(ctx.manager_name(), ctx.package(), JavaClassKind::Class);
    class.extends = ctx.base_manager_name();
    class.file_header_comment = editable_header(&class.file_name(), &ctx.created);
    class.add_import(&format!("{}.DatabaseManager", ctx.package_base));

    let mut constructor = JavaMethod::constructor(ctx.manager_name())
        .with_parameter("databaseManager", "DatabaseManager")
        .with_content("super(databaseManager);");
    if ctx.config.injection_support {
        class.add_annotation("javax.inject.Singleton")?;
        constructor.add_annotation("javax.inject.Inject")?;
    }
    class.add_constructor(constructor)?;

    if ctx.entity.kind == EntityType::Query {
        class.add_method(
            JavaMethod::new("getQuery", "String")
                .overriding()
                .with_content(format!("return {}.QUERY;", ctx.class_name())),
        );
    }
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::android::tests::context_for;
    use crate::java::SourceStyle;
    use dbtools_schema::{FieldType, SchemaDatabase, SchemaEntity, SchemaField};

    fn database(kind: EntityType, read_only: bool) -> SchemaDatabase {
        let mut id = SchemaField::new("_id", FieldType::Bigint);
        id.primary_key = true;
        let mut entity = SchemaEntity::new(kind, "PERSON");
        entity.read_only = read_only;
        entity.fields = vec![id];
        SchemaDatabase {
            name: "main".to_string(),
            tables: vec![entity],
            ..Default::default()
        }
    }

    #[test]
    fn writable_table_manager() {
        let db = database(EntityType::Table, false);
        let text = base_manager_class(&context_for(&db, 0))
            .unwrap()
            .render(&SourceStyle::default());

        assert!(text.contains("import org.sample.DatabaseManager;\n"));
        assert!(text.contains("import org.dbtools.android.domain.AndroidBaseManagerWritable;\n"));
        assert!(text.contains(
            "public abstract class PersonBaseManager extends AndroidBaseManagerWritable<Person> {\n"
        ));
        assert!(text.contains("    private DatabaseManager databaseManager;\n"));
        assert!(text.contains(
            "    public PersonBaseManager(DatabaseManager databaseManager) {\n        this.databaseManager = databaseManager;\n    }\n"
        ));
        assert!(text.contains("    public Person newRecord() {\n        return new Person();\n    }\n"));
        assert!(text.contains("        return PersonConst.PRIMARY_KEY_COLUMN;\n"));
        assert!(text.contains(
            "    public DatabaseWrapper getWritableDatabase(String databaseName) {\n"
        ));
    }

    #[test]
    fn views_are_read_only() {
        let db = database(EntityType::View, false);
        let mut ctx = context_for(&db, 0);
        ctx.config.rx_java_support = true;
        let class = base_manager_class(&ctx).unwrap();

        assert_eq!(class.extends, "RxAndroidBaseManagerReadOnly<Person>");
        assert_eq!(
            class.methods().iter().find(|m| m.name == "getDropSql").unwrap().content,
            "return Person.DROP_VIEW;"
        );
    }

    #[test]
    fn queries_declare_abstract_query() {
        let db = database(EntityType::Query, false);
        let class = base_manager_class(&context_for(&db, 0)).unwrap();
        let text = class.render(&SourceStyle::default());

        assert!(text.contains("    public abstract String getQuery();\n"));
        assert_eq!(
            class.method("getTableName").unwrap().content,
            "return getQuery();"
        );
        assert_eq!(class.methods().iter().filter(|m| m.name == "getTableName").count(), 1);
    }

    #[test]
    fn jsr305_annotates_getters_and_parameters() {
        let db = database(EntityType::Table, true);
        let mut ctx = context_for(&db, 0);
        ctx.config.jsr305_support = true;
        let text = base_manager_class(&ctx).unwrap().render(&SourceStyle::default());

        assert!(text.contains("import javax.annotation.Nonnull;\n"));
        assert!(text.contains("extends AndroidBaseManagerReadOnly<Person>"));
        assert!(text.contains("    @Nonnull\n    public String getDatabaseName() {\n"));
        assert!(text.contains("getReadableDatabase(@Nonnull String databaseName)"));
    }

    #[test]
    fn managers_delegate_to_base() {
        let db = database(EntityType::Query, false);
        let mut ctx = context_for(&db, 0);
        ctx.config.injection_support = true;
        let text = manager_class(&ctx).unwrap().render(&SourceStyle::default());

        assert!(text.contains("@javax.inject.Singleton\npublic class PersonManager extends PersonBaseManager {\n"));
        assert!(text.contains(
            "    @javax.inject.Inject\n    public PersonManager(DatabaseManager databaseManager) {\n        super(databaseManager);\n    }\n"
        ));
        assert!(text.contains("    @Override\n    public String getQuery() {\n        return Person.QUERY;\n    }\n"));
    }
}
