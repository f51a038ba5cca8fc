//! Java database lifecycle classes.

use std::path::PathBuf;

use dbtools_schema::{naming, DatabaseSchema, SchemaDatabase, SchemaEntity};

use crate::error::Result;
use crate::generators::android::database::{
    database_const_name, database_method_suffix, database_version_names, managed_entities,
    CONST_CLASS,
};
use crate::generators::android::{editable_header, generated_header, AndroidGenerator, WritePolicy};
use crate::java::format::quote;
use crate::java::{JavaClass, JavaClassKind, JavaMethod, JavaVariable};
use crate::kotlin::format::format_constant;

/// Java counterpart of the Kotlin lifecycle classes, with their directory
/// below the output root.
pub(crate) fn lifecycle_classes(
    generator: &AndroidGenerator,
    schema: &DatabaseSchema,
    created: &str,
) -> Result<Vec<(PathBuf, JavaClass, WritePolicy)>> {
    let package = generator.package_base();
    let mut classes = vec![
        (PathBuf::new(), database_base_manager(generator, schema)?, WritePolicy::Overwrite),
        (PathBuf::new(), database_manager_const(package, schema)?, WritePolicy::Overwrite),
        (PathBuf::new(), database_manager(generator, schema, created)?, WritePolicy::CreateOnly),
        (PathBuf::new(), app_database_config(package, schema, created)?, WritePolicy::CreateOnly),
    ];

    if !generator.config().injection_support {
        for database in &schema.databases {
            let mut dir = PathBuf::new();
            if generator.config().include_database_name_in_package {
                dir.push(database.name.to_lowercase());
            }
            classes.push((dir, managers_holder(generator, database)?, WritePolicy::Overwrite));
        }
    }
    Ok(classes)
}

/// `MAIN_TABLES_VERSION`, `MAIN_VIEWS_VERSION`
fn version_constants(database: &SchemaDatabase) -> (String, String) {
    let (tables, views) = database_version_names(database);
    (format_constant(&tables), format_constant(&views))
}

fn transaction(body: &str) -> String {
    format!(
        "DatabaseWrapper database = androidDatabase.getDatabaseWrapper();\n\
         database.beginTransaction();\n\
         {body}\n\
         database.setTransactionSuccessful();\n\
         database.endTransaction();\n"
    )
}

fn dispatch(database: &SchemaDatabase, method: &str) -> String {
    format!(
        "if (androidDatabase.getName().equals({CONST_CLASS}.{})) {{\n\t{method}(androidDatabase);\n}}\n",
        database_const_name(database)
    )
}

fn database_method(name: &str, content: String) -> JavaMethod {
    JavaMethod::new(name, "void")
        .with_parameter("androidDatabase", "AndroidDatabase")
        .with_content(content)
}

fn database_base_manager(generator: &AndroidGenerator, schema: &DatabaseSchema) -> Result<JavaClass> {
    let mut class = JavaClass::new("DatabaseBaseManager", generator.package_base(), JavaClassKind::Class);
    class.is_abstract = true;
    class.extends = "AndroidDatabaseManager".to_string();
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;
    for import in [
        "org.dbtools.android.domain.AndroidDatabase",
        "org.dbtools.android.domain.AndroidBaseManager",
        "org.dbtools.android.domain.AndroidDatabaseManager",
        "org.dbtools.android.domain.config.DatabaseConfig",
        "org.dbtools.android.domain.database.DatabaseWrapper",
    ] {
        class.add_import(import);
    }

    class.add_constructor(
        JavaMethod::constructor("DatabaseBaseManager")
            .with_parameter("databaseConfig", "DatabaseConfig")
            .with_content("super(databaseConfig);"),
    )?;

    let log = |action: &str| {
        format!("getLogger().i(TAG, \"{action}: \" + androidDatabase.getName());\n")
    };
    let mut on_create = log("Creating database");
    let mut on_create_views = log("Creating database views");
    let mut on_drop_views = log("Dropping database views");
    let mut database_methods = Vec::new();

    for database in &schema.databases {
        let namespace = generator.namespace(database);
        let suffix = database_method_suffix(database);
        let qualified = |entity: &SchemaEntity| {
            let class_name = entity.class_name();
            format!("{namespace}.{}.{class_name}", class_name.to_lowercase())
        };

        let create_tables = format!("create{suffix}Tables");
        on_create.push_str(&dispatch(database, &create_tables));
        let (enum_tables, tables): (Vec<&SchemaEntity>, Vec<&SchemaEntity>) =
            database.tables.iter().partition(|t| t.is_enumeration_table());
        let mut body = String::from("\n// Enum Tables\n");
        for table in enum_tables {
            body.push_str(&format!(
                "AndroidBaseManager.createTable(database, {}Const.CREATE_TABLE);\n",
                qualified(table)
            ));
        }
        body.push_str("\n// Tables\n");
        for table in tables {
            body.push_str(&format!(
                "AndroidBaseManager.createTable(database, {}Const.CREATE_TABLE);\n",
                qualified(table)
            ));
        }
        database_methods.push(database_method(&create_tables, transaction(&body)));

        if database.views.is_empty() {
            continue;
        }
        let create_views = format!("create{suffix}Views");
        let drop_views = format!("drop{suffix}Views");
        on_create_views.push_str(&dispatch(database, &create_views));
        on_drop_views.push_str(&dispatch(database, &drop_views));

        let mut create_body = String::from("\n// Views\n");
        let mut drop_body = String::from("\n// Views\n");
        for view in &database.views {
            create_body.push_str(&format!(
                "AndroidBaseManager.createTable(database, {}.CREATE_VIEW);\n",
                qualified(view)
            ));
            drop_body.push_str(&format!(
                "AndroidBaseManager.dropTable(database, {}.DROP_VIEW);\n",
                qualified(view)
            ));
        }
        database_methods.push(database_method(&create_views, transaction(&create_body)));
        database_methods.push(database_method(&drop_views, transaction(&drop_body)));
    }

    for (name, content) in [
        ("onCreate", on_create),
        ("onCreateViews", on_create_views),
        ("onDropViews", on_drop_views),
    ] {
        class.add_method(database_method(name, content).overriding());
    }
    for method in database_methods {
        class.add_method(method);
    }
    Ok(class)
}

fn database_manager_const(package: &str, schema: &DatabaseSchema) -> Result<JavaClass> {
    let mut class = JavaClass::new(CONST_CLASS, package, JavaClassKind::Class);
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;
    for database in &schema.databases {
        class.add_string_constant(&database_const_name(database), quote(&database.name));
    }
    Ok(class)
}

fn upgrade_method(name: &str, content: &str) -> JavaMethod {
    JavaMethod::new(name, "void")
        .overriding()
        .with_parameter("androidDatabase", "AndroidDatabase")
        .with_parameter("oldVersion", "int")
        .with_parameter("newVersion", "int")
        .with_content(content)
}

fn database_manager(
    generator: &AndroidGenerator,
    schema: &DatabaseSchema,
    created: &str,
) -> Result<JavaClass> {
    let mut class = JavaClass::new("DatabaseManager", generator.package_base(), JavaClassKind::Class);
    class.extends = "DatabaseBaseManager".to_string();
    class.file_header_comment = editable_header(&class.file_name(), created);
    class.add_import("org.dbtools.android.domain.AndroidDatabase");
    class.add_import("org.dbtools.android.domain.config.DatabaseConfig");

    let mut constructor = JavaMethod::constructor("DatabaseManager")
        .with_parameter("databaseConfig", "DatabaseConfig")
        .with_content("super(databaseConfig);");
    if generator.config().injection_support {
        class.add_import("javax.inject.Inject");
        class.add_import("javax.inject.Singleton");
        class.add_annotation("Singleton")?;
        constructor.add_annotation("Inject")?;
    }
    class.add_constructor(constructor)?;

    for database in &schema.databases {
        let (tables, views) = version_constants(database);
        class.add_constant(JavaVariable::constant(&tables, "int", "1"));
        class.add_constant(JavaVariable::constant(&views, "int", "1"));
    }

    class.add_method(upgrade_method(
        "onUpgrade",
        "String databaseName = androidDatabase.getName();\n\
         getLogger().i(TAG, \"Upgrading database [\" + databaseName + \"] from version \" + oldVersion + \" to \" + newVersion);",
    ));
    class.add_method(upgrade_method(
        "onUpgradeViews",
        "String databaseName = androidDatabase.getName();\n\
         getLogger().i(TAG, \"Upgrading database [\" + databaseName + \"] VIEWS from version \" + oldVersion + \" to \" + newVersion);\n\
         // automatically drop/create views\n\
         super.onUpgradeViews(androidDatabase, oldVersion, newVersion);",
    ));
    Ok(class)
}

fn app_database_config(package: &str, schema: &DatabaseSchema, created: &str) -> Result<JavaClass> {
    let mut class = JavaClass::new("AppDatabaseConfig", package, JavaClassKind::Class);
    class.file_header_comment = editable_header(&class.file_name(), created);
    class.add_implements("DatabaseConfig")?;
    for import in [
        "android.app.Application",
        "org.dbtools.android.domain.config.DatabaseConfig",
        "org.dbtools.android.domain.AndroidDatabase",
        "org.dbtools.android.domain.AndroidDatabaseBaseManager",
        "org.dbtools.android.domain.database.DatabaseWrapper",
        "org.dbtools.android.domain.database.AndroidDatabaseWrapper",
        "org.dbtools.android.domain.database.contentvalues.AndroidDBToolsContentValues",
        "org.dbtools.android.domain.database.contentvalues.DBToolsContentValues",
        "org.dbtools.android.domain.log.DBToolsAndroidLogger",
        "org.dbtools.android.domain.log.DBToolsLogger",
    ] {
        class.add_import(import);
    }

    class.add_variable(JavaVariable::new("application", "Application"));
    class.add_constructor(
        JavaMethod::constructor("AppDatabaseConfig")
            .with_parameter("application", "Application")
            .with_content("this.application = application;"),
    )?;

    let identify: String = schema
        .databases
        .iter()
        .map(|database| {
            let (tables, views) = version_constants(database);
            format!(
                "databaseManager.addDatabase(application, {CONST_CLASS}.{}, DatabaseManager.{tables}, DatabaseManager.{views});\n",
                database_const_name(database)
            )
        })
        .collect();
    class.add_method(
        JavaMethod::new("identifyDatabases", "void")
            .overriding()
            .with_parameter("databaseManager", "AndroidDatabaseBaseManager")
            .with_content(identify),
    );
    class.add_method(
        JavaMethod::new("createNewDatabaseWrapper", "DatabaseWrapper")
            .overriding()
            .with_parameter("androidDatabase", "AndroidDatabase")
            .with_content("return new AndroidDatabaseWrapper(androidDatabase.getPath());"),
    );
    class.add_method(
        JavaMethod::new("createNewDBToolsContentValues", "DBToolsContentValues")
            .overriding()
            .with_content("return new AndroidDBToolsContentValues();"),
    );
    class.add_method(
        JavaMethod::new("createNewDBToolsLogger", "DBToolsLogger")
            .overriding()
            .with_content("return new DBToolsAndroidLogger();"),
    );
    Ok(class)
}

/// `<Db>DatabaseManagers`: static manager fields filled by `init`.
fn managers_holder(generator: &AndroidGenerator, database: &SchemaDatabase) -> Result<JavaClass> {
    let namespace = generator.namespace(database);
    let name = format!("{}DatabaseManagers", database_method_suffix(database));
    let mut class = JavaClass::new(name, namespace.as_str(), JavaClassKind::Class);
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;
    class.add_import(&format!("{}.DatabaseManager", generator.package_base()));

    let mut init = String::new();
    for entity in managed_entities(database) {
        let class_name = entity.class_name();
        let manager = format!("{class_name}Manager");
        let variable = naming::variable_name(&manager);
        class.add_import(&format!("{namespace}.{}.{manager}", class_name.to_lowercase()));

        let field = class.add_variable(JavaVariable::new(variable.as_str(), manager.as_str()));
        field.is_static = true;
        field.generate_getter = true;
        init.push_str(&format!("{variable} = new {manager}(databaseManager);\n"));
    }

    class.add_method(
        JavaMethod::new("init", "void")
            .static_method()
            .with_parameter("databaseManager", "DatabaseManager")
            .with_content(init),
    );
    Ok(class)
}
