//! Editable `<Entity>` record subclasses.

use dbtools_schema::{EntityType, SchemaEntity};

use crate::error::Result;
use crate::generators::android::{editable_header, EntityContext};
use crate::kotlin::format::format_constant;
use crate::kotlin::{ClassKind, KotlinClass, KotlinFun, KotlinVal};

const SQL_QUERY_BUILDER: &str = "org.dbtools.query.sql.SQLQueryBuilder";

pub(crate) fn record_class(ctx: &EntityContext<'_>) -> Result<KotlinClass> {
    let mut class = KotlinClass::new(ctx.class_name(), ctx.package(), ClassKind::Class);
    class.extends = ctx.base_record_name();
    class.file_header_comment = editable_header(&class.file_name(), &ctx.created);

    class.add_import("android.database.Cursor");
    class.add_import("org.dbtools.android.domain.database.contentvalues.DBToolsContentValues");
    class.add_constructor(KotlinFun::constructor())?;
    class.add_constructor(
        KotlinFun::constructor()
            .with_parameter("cursor", "Cursor")
            .with_content("setContent(cursor)"),
    )?;
    class.add_constructor(
        KotlinFun::constructor()
            .with_parameter("values", "DBToolsContentValues<*>")
            .with_content("setContent(values)"),
    )?;

    match ctx.entity.kind {
        EntityType::View => add_view_sql(ctx, &mut class),
        EntityType::Query => add_query_sql(ctx, &mut class),
        EntityType::Table => {}
    }
    Ok(class)
}

/// `(FULL_C_X, C_X)` constant pairs of every column.
pub(crate) fn column_pairs(entity: &SchemaEntity, const_name: &str) -> Vec<(String, String)> {
    entity
        .fields
        .iter()
        .map(|field| {
            let constant = format_constant(&field.variable_name());
            (
                format!("{const_name}.FULL_C_{constant}"),
                format!("{const_name}.C_{constant}"),
            )
        })
        .collect()
}

fn add_view_sql(ctx: &EntityContext<'_>, class: &mut KotlinClass) {
    let const_name = ctx.const_name();
    class.class_header_comment = format!(
        "// Replace the following CREATE_VIEW sql (the following is a template suggestion for your view)\n\
         // SUGGESTION: Keep the \" AS {const_name}.<columnname>\" portion of the sql"
    );
    class.add_constant(
        KotlinVal::new("DROP_VIEW", "String")
            .with_default(format!("\"DROP VIEW IF EXISTS \" + {const_name}.TABLE")),
    );

    let columns = column_pairs(ctx.entity, &const_name);
    if ctx.config.sql_query_builder_support {
        class.add_import(SQL_QUERY_BUILDER);
        let mut builder = format!(
            "CREATE_VIEW = \"CREATE VIEW IF NOT EXISTS \" + {const_name}.TABLE + \" AS \" +\n\tSQLQueryBuilder()\n"
        );
        for (full, short) in &columns {
            builder.push_str(&format!("\t.field({full}, {short})\n"));
        }
        builder.push_str(&format!("\t.table({const_name}.TABLE)\n\t.buildQuery()"));
        class.add_constant(KotlinVal::new("CREATE_VIEW", "String"));
        class.append_static_init(&builder);
    } else {
        let selected: Vec<String> = columns
            .iter()
            .map(|(full, short)| format!("{full} + \" AS \" + {short}"))
            .collect();
        class.add_constant(KotlinVal::new("CREATE_VIEW", "String").with_default(format!(
            "\"CREATE VIEW IF NOT EXISTS \" + {const_name}.TABLE + \" AS SELECT \" + {} + \" FROM \" + {const_name}.TABLE",
            selected.join(" + \", \" + ")
        )));
    }
}

fn add_query_sql(ctx: &EntityContext<'_>, class: &mut KotlinClass) {
    let const_name = ctx.const_name();
    let columns = column_pairs(ctx.entity, &const_name);

    if ctx.config.sql_query_builder_support {
        class.class_header_comment = "// Replace the following QUERY sql (the following is a template suggestion for your query)\n\
             // SUGGESTION: Keep the second parameter of each field(<replace>, <keep>)"
            .to_string();
        class.add_import(SQL_QUERY_BUILDER);
        let mut builder = String::from("QUERY = SQLQueryBuilder()\n");
        for (full, short) in &columns {
            builder.push_str(&format!("\t.field({full}, {short})\n"));
        }
        builder.push_str("\t.table(\"SOME_TABLE\")\n\t.buildQuery()");
        class.add_constant(KotlinVal::new("QUERY", "String"));
        class.append_static_init(&builder);
    } else {
        class.class_header_comment = format!(
            "// Replace the following QUERY sql (the following is a template suggestion for your query)\n\
             // BE SURE TO KEEP THE OPENING AND CLOSING PARENTHESES (so queries can be run as sub-select: select * from (select a, b from t) )\n\
             // SUGGESTION: Keep the \" AS {const_name}.<columnname>\" portion of the sql"
        );
        let selected: Vec<String> = columns
            .iter()
            .map(|(full, short)| format!("{full} + \" AS \" + {short}"))
            .collect();
        class.add_constant(KotlinVal::new("QUERY", "String").with_default(format!(
            "\"(\" + \"SELECT \" + {} + \" FROM SOME TABLE(S)\" + \")\"",
            selected.join(" + \", \" + ")
        )));
    }
    class.add_constant(
        KotlinVal::new("QUERY_RAW", "String").with_default("\"SELECT * FROM \" + QUERY"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::android::tests::context_for;
    use crate::kotlin::SourceStyle;
    use dbtools_schema::{FieldType, SchemaDatabase, SchemaField};

    fn database(kind: EntityType) -> SchemaDatabase {
        let mut entity = SchemaEntity::new(kind, "PERSON_NAMES");
        entity.fields = vec![
            SchemaField::new("ID", FieldType::Bigint),
            SchemaField::new("NAME", FieldType::Varchar),
        ];
        SchemaDatabase {
            name: "main".to_string(),
            tables: vec![entity],
            ..Default::default()
        }
    }

    #[test]
    fn record_has_three_constructors() {
        let db = database(EntityType::Table);
        let text = record_class(&context_for(&db, 0))
            .unwrap()
            .render(&SourceStyle::default());

        assert!(text.contains("class PersonNames : PersonNamesBaseRecord {\n"));
        assert!(text.contains("    constructor()\n"));
        assert!(text.contains("    constructor(cursor: Cursor) {\n        setContent(cursor)\n    }\n"));
        assert!(text.contains("    constructor(values: DBToolsContentValues<*>) {\n"));
        assert!(text.contains(" * Created: 2024-01-01 00:00:00\n"));
        assert!(!text.contains("companion"));
    }

    #[test]
    fn views_declare_sql() {
        let db = database(EntityType::View);
        let class = record_class(&context_for(&db, 0)).unwrap();
        let text = class.render(&SourceStyle::default());

        assert!(text.contains(
            "val DROP_VIEW: String = \"DROP VIEW IF EXISTS \" + PersonNamesConst.TABLE\n"
        ));
        assert!(text.contains(
            "PersonNamesConst.FULL_C_NAME + \" AS \" + PersonNamesConst.C_NAME + \" FROM \" + PersonNamesConst.TABLE"
        ));
    }

    #[test]
    fn sql_builder_views_use_static_init() {
        let db = database(EntityType::View);
        let mut ctx = context_for(&db, 0);
        ctx.config.sql_query_builder_support = true;
        let class = record_class(&ctx).unwrap();

        assert!(class.imports().contains(&SQL_QUERY_BUILDER.to_string()));
        assert!(class.static_init.contains("\t.field(PersonNamesConst.FULL_C_ID, PersonNamesConst.C_ID)\n"));
        assert!(class
            .render(&SourceStyle::default())
            .contains("        val CREATE_VIEW: String\n"));
    }

    #[test]
    fn queries_declare_raw_query() {
        let db = database(EntityType::Query);
        let class = record_class(&context_for(&db, 0)).unwrap();
        let names: Vec<&str> = class.constants().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["QUERY", "QUERY_RAW"]);
    }
}
