//! `<Entity>BaseManager`: regenerated manager superclass.

use dbtools_schema::EntityType;

use crate::error::Result;
use crate::generators::android::base_record::{primary_key, NO_PRIMARY_KEY};
use crate::generators::android::{generated_header, EntityContext};
use crate::kotlin::{ClassKind, KotlinClass, KotlinFun, KotlinVal};

const DOMAIN_PACKAGE: &str = "org.dbtools.android.domain";
const NONNULL: &str = "javax.annotation.Nonnull";

/// Name of the runtime superclass of a manager.
fn superclass(ctx: &EntityContext<'_>) -> String {
    let prefix = if ctx.config.rx_java_support { "Rx" } else { "" };
    let access = if ctx.entity.is_read_only() {
        "ReadOnly"
    } else {
        "Writable"
    };
    format!("{prefix}KotlinAndroidBaseManager{access}")
}

pub(crate) fn base_manager_class(ctx: &EntityContext<'_>) -> Result<KotlinClass> {
    let record = ctx.class_name();
    let constants = ctx.const_name();
    let fields = ctx.fields()?;
    let keyed = primary_key(ctx, &fields)?.is_some();

    let mut class = KotlinClass::new(ctx.base_manager_name(), ctx.package(), ClassKind::Class);
    class.is_abstract = true;
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@Suppress(\"unused\")")?;
    class.add_annotation("@SuppressWarnings(\"all\")")?;

    let superclass = superclass(ctx);
    class.add_import(&format!("{}.DatabaseManager", ctx.package_base));
    class.add_import(&format!("{DOMAIN_PACKAGE}.{superclass}"));
    class.primary_constructor = "(databaseManager: DatabaseManager)".to_string();
    class.extends = format!("{superclass}<{record}>(databaseManager)");

    let jsr305 = ctx.config.jsr305_support;
    if jsr305 {
        class.add_import(NONNULL);
    }
    let string_getter = |class: &mut KotlinClass, name: &str, content: String| -> Result<()> {
        let function = class.add_fun(KotlinFun::new(name, "String").overriding().with_content(content));
        if jsr305 {
            function.add_annotation("Nonnull")?;
        }
        Ok(())
    };

    string_getter(&mut class, "getDatabaseName", format!("return {constants}.DATABASE"))?;
    class.add_fun(
        KotlinFun::new("newRecord", record.as_str())
            .overriding()
            .with_content(format!("return {record}()")),
    );
    match ctx.entity.kind {
        EntityType::Query => {
            class.add_fun(KotlinFun::new("getQuery", "String").abstract_fun());
            string_getter(&mut class, "getTableName", "return getQuery()".to_string())?;
        }
        _ => string_getter(&mut class, "getTableName", format!("return {constants}.TABLE"))?,
    }

    let override_val = |name: &str, data_type: &str, value: String| {
        KotlinVal::new(name, data_type).with_default(value).overriding()
    };
    let empty = || "\"\"".to_string();
    class.add_member(override_val(
        "allColumns",
        "Array<String>",
        format!("{constants}.ALL_COLUMNS"),
    ));

    let (primary_key, drop_sql, create_sql, insert_sql, update_sql) = match ctx.entity.kind {
        EntityType::Table => (
            if keyed {
                format!("{constants}.PRIMARY_KEY_COLUMN")
            } else {
                format!("\"{NO_PRIMARY_KEY}\"")
            },
            format!("{constants}.DROP_TABLE"),
            format!("{constants}.CREATE_TABLE"),
            format!("{constants}.INSERT_STATEMENT"),
            format!("{constants}.UPDATE_STATEMENT"),
        ),
        EntityType::View => (
            "\"<NO_PRIMARY_KEY_ON_VIEWS>\"".to_string(),
            format!("{record}.DROP_VIEW"),
            format!("{record}.CREATE_VIEW"),
            empty(),
            empty(),
        ),
        EntityType::Query => (
            "\"<NO_PRIMARY_KEY_ON_QUERIES>\"".to_string(),
            empty(),
            empty(),
            empty(),
            empty(),
        ),
    };
    class.add_member(override_val("primaryKey", "String", primary_key));
    class.add_member(override_val("dropSql", "String", drop_sql));
    class.add_member(override_val("createSql", "String", create_sql));
    class.add_member(override_val("insertSql", "String", insert_sql));
    class.add_member(override_val("updateSql", "String", update_sql));

    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::android::tests::context_for;
    use crate::kotlin::SourceStyle;
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

        assert!(text.contains("import org.sample.DatabaseManager\n"));
        assert!(text.contains(
            "abstract class PersonBaseManager(databaseManager: DatabaseManager) : \
             KotlinAndroidBaseManagerWritable<Person>(databaseManager) {\n"
        ));
        assert!(text.contains("    override val primaryKey: String = PersonConst.PRIMARY_KEY_COLUMN\n"));
        assert!(text.contains("    override fun newRecord(): Person {\n        return Person()\n    }\n"));
    }

    #[test]
    fn read_only_tables_and_rx() {
        let db = database(EntityType::Table, true);
        let mut ctx = context_for(&db, 0);
        ctx.config.rx_java_support = true;
        let class = base_manager_class(&ctx).unwrap();
        assert_eq!(
            class.extends,
            "RxKotlinAndroidBaseManagerReadOnly<Person>(databaseManager)"
        );
    }

    #[test]
    fn queries_declare_abstract_query() {
        let db = database(EntityType::Query, false);
        let class = base_manager_class(&context_for(&db, 0)).unwrap();
        let text = class.render(&SourceStyle::default());

        assert!(text.contains("    abstract fun getQuery(): String;\n"));
        assert!(text.contains("\"<NO_PRIMARY_KEY_ON_QUERIES>\""));
        assert_eq!(
            class.function("getTableName").unwrap().content,
            "return getQuery()"
        );
    }

    #[test]
    fn jsr305_annotates_string_getters() {
        let db = database(EntityType::View, false);
        let mut ctx = context_for(&db, 0);
        ctx.config.jsr305_support = true;
        let text = base_manager_class(&ctx).unwrap().render(&SourceStyle::default());

        assert!(text.contains("import javax.annotation.Nonnull\n"));
        assert!(text.contains("    @Nonnull\n    override fun getDatabaseName(): String {\n"));
        assert!(text.contains("override val dropSql: String = Person.DROP_VIEW\n"));
    }
}
