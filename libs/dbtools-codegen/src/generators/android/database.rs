//! Database lifecycle classes shared by every entity: `DatabaseBaseManager`,
//! `DatabaseManagerConst`, `DatabaseManager`, `AppDatabaseConfig` and the
//! per-database manager holders.

use std::path::PathBuf;

use dbtools_schema::{naming, DatabaseSchema, SchemaDatabase, SchemaEntity};

use crate::error::Result;
use crate::generators::android::{editable_header, generated_header, AndroidGenerator, WritePolicy};
use crate::kotlin::format::{format_constant, quote};
use crate::kotlin::{ClassKind, KotlinClass, KotlinFun, KotlinVal};

pub(crate) const CONST_CLASS: &str = "DatabaseManagerConst";

/// Classes placed outside the entity packages, with their directory below
/// the output root.
pub(crate) fn lifecycle_classes(
    generator: &AndroidGenerator,
    schema: &DatabaseSchema,
    created: &str,
) -> Result<Vec<(PathBuf, KotlinClass, WritePolicy)>> {
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

/// `MAIN_DATABASE_NAME`
pub(crate) fn database_const_name(database: &SchemaDatabase) -> String {
    format!("{}_DATABASE_NAME", format_constant(&database.name.replace('.', "")))
}

/// `Main` for `main.sqlite`
pub(crate) fn database_method_suffix(database: &SchemaDatabase) -> String {
    naming::class_name(&database.name.replace('.', ""))
}

pub(crate) fn database_version_names(database: &SchemaDatabase) -> (String, String) {
    let name = naming::variable_name(&database.name.replace('.', ""));
    (format!("{name}TablesVersion"), format!("{name}ViewsVersion"))
}

/// Entities that get a manager: everything but enumeration tables.
pub(crate) fn managed_entities(database: &SchemaDatabase) -> impl Iterator<Item = &SchemaEntity> {
    database.entities().filter(|e| !e.is_enumeration_table())
}

fn transaction(body: &str) -> String {
    format!(
        "val database = androidDatabase.databaseWrapper\n\
         database.beginTransaction()\n\
         {body}\n\
         database.setTransactionSuccessful()\n\
         database.endTransaction()\n"
    )
}

fn dispatch(database: &SchemaDatabase, method: &str) -> String {
    format!(
        "if (androidDatabase.name == {CONST_CLASS}.{}) {{\n\t{method}(androidDatabase)\n}}\n",
        database_const_name(database)
    )
}

fn database_base_manager(generator: &AndroidGenerator, schema: &DatabaseSchema) -> Result<KotlinClass> {
    let mut class = KotlinClass::new("DatabaseBaseManager", generator.package_base(), ClassKind::Class);
    class.is_abstract = true;
    class.extends = "AndroidDatabaseManager".to_string();
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;
    for import in [
        "org.dbtools.android.domain.AndroidDatabase",
        "org.dbtools.android.domain.AndroidBaseManager",
        "org.dbtools.android.domain.AndroidDatabaseManager",
        "org.dbtools.android.domain.config.DatabaseConfig",
    ] {
        class.add_import(import);
    }

    class.add_constructor(
        KotlinFun::constructor()
            .with_parameter("databaseConfig", "DatabaseConfig")
            .with_delegate("super(databaseConfig)"),
    )?;

    let mut on_create = String::from("getLogger().i(TAG, \"Creating database: ${androidDatabase.name}\")\n");
    let mut on_create_views =
        String::from("getLogger().i(TAG, \"Creating database views: ${androidDatabase.name}\")\n");
    let mut on_drop_views =
        String::from("getLogger().i(TAG, \"Dropping database views: ${androidDatabase.name}\")\n");
    let mut database_functions = Vec::new();

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
                "AndroidBaseManager.createTable(database, {}Const.CREATE_TABLE)\n",
                qualified(table)
            ));
        }
        body.push_str("\n// Tables\n");
        for table in tables {
            body.push_str(&format!(
                "AndroidBaseManager.createTable(database, {}Const.CREATE_TABLE)\n",
                qualified(table)
            ));
        }
        database_functions.push(
            KotlinFun::new(create_tables, "")
                .with_parameter("androidDatabase", "AndroidDatabase")
                .with_content(transaction(&body)),
        );

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
                "AndroidBaseManager.createTable(database, {}.CREATE_VIEW)\n",
                qualified(view)
            ));
            drop_body.push_str(&format!(
                "AndroidBaseManager.dropTable(database, {}.DROP_VIEW)\n",
                qualified(view)
            ));
        }
        database_functions.push(
            KotlinFun::new(create_views, "")
                .with_parameter("androidDatabase", "AndroidDatabase")
                .with_content(transaction(&create_body)),
        );
        database_functions.push(
            KotlinFun::new(drop_views, "")
                .with_parameter("androidDatabase", "AndroidDatabase")
                .with_content(transaction(&drop_body)),
        );
    }

    for (name, content) in [
        ("onCreate", on_create),
        ("onCreateViews", on_create_views),
        ("onDropViews", on_drop_views),
    ] {
        class.add_fun(
            KotlinFun::new(name, "")
                .overriding()
                .with_parameter("androidDatabase", "AndroidDatabase")
                .with_content(content),
        );
    }
    for function in database_functions {
        class.add_fun(function);
    }
    Ok(class)
}

fn database_manager_const(package: &str, schema: &DatabaseSchema) -> Result<KotlinClass> {
    let mut class = KotlinClass::new(CONST_CLASS, package, ClassKind::Object);
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;
    for database in &schema.databases {
        class.add_const(&database_const_name(database), quote(&database.name));
    }
    Ok(class)
}

fn version_params(function: KotlinFun) -> KotlinFun {
    function
        .with_parameter("androidDatabase", "AndroidDatabase")
        .with_parameter("oldVersion", "Int")
        .with_parameter("newVersion", "Int")
}

fn database_manager(
    generator: &AndroidGenerator,
    schema: &DatabaseSchema,
    created: &str,
) -> Result<KotlinClass> {
    let mut class = KotlinClass::new("DatabaseManager", generator.package_base(), ClassKind::Class);
    class.extends = "DatabaseBaseManager".to_string();
    class.file_header_comment = editable_header(&class.file_name(), created);
    class.add_import("org.dbtools.android.domain.config.DatabaseConfig");
    class.add_import("org.dbtools.android.domain.AndroidDatabase");

    let mut constructor = KotlinFun::constructor()
        .with_parameter("databaseConfig", "DatabaseConfig")
        .with_delegate("super(databaseConfig)");
    if generator.config().injection_support {
        class.add_import("javax.inject.Inject");
        class.add_import("javax.inject.Singleton");
        class.add_annotation("Singleton")?;
        constructor.add_annotation("Inject")?;
    }
    class.add_constructor(constructor)?;

    for database in &schema.databases {
        let (tables, views) = database_version_names(database);
        class.add_const(&tables, "1");
        class.add_const(&views, "1");
    }

    class.add_fun(version_params(KotlinFun::new("onUpgrade", "").overriding()).with_content(
        "getLogger().i(TAG, \"Upgrading database [${androidDatabase.name}] from version $oldVersion to $newVersion\")",
    ));
    class.add_fun(
        version_params(KotlinFun::new("onUpgradeViews", "").overriding()).with_content(
            "getLogger().i(TAG, \"Upgrading database [${androidDatabase.name}] VIEWS from version $oldVersion to $newVersion\")\n\
             // automatically drop/create views\n\
             super.onUpgradeViews(androidDatabase, oldVersion, newVersion)",
        ),
    );
    Ok(class)
}

fn app_database_config(package: &str, schema: &DatabaseSchema, created: &str) -> Result<KotlinClass> {
    let mut class = KotlinClass::new("AppDatabaseConfig", package, ClassKind::Class);
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
    class.primary_constructor = "(val application: Application)".to_string();

    let identify: String = schema
        .databases
        .iter()
        .map(|database| {
            let (tables, views) = database_version_names(database);
            format!(
                "databaseManager.addDatabase(application, {CONST_CLASS}.{}, DatabaseManager.{tables}, DatabaseManager.{views})\n",
                database_const_name(database)
            )
        })
        .collect();
    class.add_fun(
        KotlinFun::new("identifyDatabases", "")
            .overriding()
            .with_parameter("databaseManager", "AndroidDatabaseBaseManager")
            .with_content(identify),
    );
    class.add_fun(
        KotlinFun::new("createNewDatabaseWrapper", "DatabaseWrapper<*, *>")
            .overriding()
            .with_parameter("androidDatabase", "AndroidDatabase")
            .with_content("return AndroidDatabaseWrapper(androidDatabase.path)"),
    );
    class.add_fun(
        KotlinFun::new("createNewDBToolsContentValues", "DBToolsContentValues<*>")
            .overriding()
            .with_content("return AndroidDBToolsContentValues()"),
    );
    class.add_fun(
        KotlinFun::new("createNewDBToolsLogger", "DBToolsLogger")
            .overriding()
            .with_content("return DBToolsAndroidLogger()"),
    );
    Ok(class)
}

/// `<Db>DatabaseManagers`: one lazily assigned manager per entity.
fn managers_holder(generator: &AndroidGenerator, database: &SchemaDatabase) -> Result<KotlinClass> {
    let namespace = generator.namespace(database);
    let name = format!("{}DatabaseManagers", database_method_suffix(database));
    let mut class = KotlinClass::new(name, namespace.as_str(), ClassKind::Object);
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")?;
    class.add_import(&format!("{}.DatabaseManager", generator.package_base()));

    let mut init = String::new();
    for entity in managed_entities(database) {
        let class_name = entity.class_name();
        let manager = format!("{class_name}Manager");
        let variable = naming::variable_name(&manager);
        class.add_import(&format!("{namespace}.{}.{manager}", class_name.to_lowercase()));

        let member = class.add_member(KotlinVal::var(&variable, &manager));
        member.is_lateinit = true;
        member.private_setter = true;
        init.push_str(&format!("{variable} = {manager}(databaseManager)\n"));
    }

    class.add_fun(
        KotlinFun::new("init", "")
            .with_parameter("databaseManager", "DatabaseManager")
            .with_content(init),
    );
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::GeneratorConfig;
    use crate::kotlin::SourceStyle;
    use dbtools_schema::{EntityType, FieldType, SchemaField};

    fn schema() -> DatabaseSchema {
        let mut person_type = SchemaEntity::new(EntityType::Table, "PERSON_TYPE");
        person_type.enumerations = "HEAD,SPOUSE".to_string();
        let mut person = SchemaEntity::new(EntityType::Table, "PERSON");
        person.fields = vec![SchemaField::new("NAME", FieldType::Varchar)];
        let view = SchemaEntity::new(EntityType::View, "PERSON_VIEW");
        DatabaseSchema {
            databases: vec![SchemaDatabase {
                name: "main".to_string(),
                tables: vec![person, person_type],
                views: vec![view],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn base_manager_creates_enum_tables_first() {
        let generator = AndroidGenerator::new("org.sample", GeneratorConfig::default());
        let class = database_base_manager(&generator, &schema()).unwrap();

        let create = &class.function("createMainTables").unwrap().content;
        let enum_at = create.find("persontype.PersonTypeConst.CREATE_TABLE").unwrap();
        let table_at = create.find("person.PersonConst.CREATE_TABLE").unwrap();
        assert!(enum_at < table_at);
        assert!(class
            .function("onCreate")
            .unwrap()
            .content
            .contains("if (androidDatabase.name == DatabaseManagerConst.MAIN_DATABASE_NAME) {\n\tcreateMainTables(androidDatabase)\n}\n"));
        assert!(class
            .function("dropMainViews")
            .unwrap()
            .content
            .contains("AndroidBaseManager.dropTable(database, org.sample.personview.PersonView.DROP_VIEW)\n"));
    }

    #[test]
    fn holder_skips_enumeration_tables() {
        let generator = AndroidGenerator::new("org.sample", GeneratorConfig::default());
        let text = managers_holder(&generator, &schema().databases[0])
            .unwrap()
            .render(&SourceStyle::default());

        assert!(text.contains("object MainDatabaseManagers {\n"));
        assert!(text.contains("    lateinit var personManager: PersonManager\n        private set\n"));
        assert!(text.contains("import org.sample.personview.PersonViewManager\n"));
        assert!(!text.contains("PersonTypeManager"));
    }

    #[test]
    fn injection_replaces_holder() {
        let config = GeneratorConfig {
            injection_support: true,
            ..Default::default()
        };
        let generator = AndroidGenerator::new("org.sample", config);
        let classes = lifecycle_classes(&generator, &schema(), "now").unwrap();
        let names: Vec<&str> = classes.iter().map(|(_, c, _)| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["DatabaseBaseManager", "DatabaseManagerConst", "DatabaseManager", "AppDatabaseConfig"]
        );
        assert!(classes[2].1.render(&SourceStyle::default()).contains("@Singleton\nclass DatabaseManager"));
    }

    #[test]
    fn config_identifies_each_database() {
        let text = app_database_config("org.sample", &schema(), "now")
            .unwrap()
            .render(&SourceStyle::default());
        assert!(text.contains(
            "databaseManager.addDatabase(application, DatabaseManagerConst.MAIN_DATABASE_NAME, \
             DatabaseManager.mainTablesVersion, DatabaseManager.mainViewsVersion)"
        ));
        assert!(text.contains("class AppDatabaseConfig(val application: Application) : DatabaseConfig {\n"));
    }
}
