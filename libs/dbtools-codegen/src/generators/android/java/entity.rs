//! Java `<Entity>Const`, `<Entity>BaseRecord`, enumeration enums and the
//! editable `<Entity>` records.

use dbtools_schema::{sqlite, EntityType};

use crate::error::Result;
use crate::generators::android::base_record::{
    insert_statement, primary_key, update_statement, NO_PRIMARY_KEY,
};
use crate::generators::android::java::field::JavaField;
use crate::generators::android::record::column_pairs;
use crate::generators::android::{editable_header, generated_header, EntityContext};
use crate::java::format::quote;
use crate::java::{Access, JavaClass, JavaClassKind, JavaMethod, JavaVariable};

const ANDROID_BASE_RECORD: &str = "org.dbtools.android.domain.AndroidBaseRecord";
const CONTENT_VALUES: &str = "org.dbtools.android.domain.database.contentvalues.DBToolsContentValues";
const STATEMENT_WRAPPER: &str = "org.dbtools.android.domain.database.statement.StatementWrapper";
const CURSOR: &str = "android.database.Cursor";
const SQL_QUERY_BUILDER: &str = "org.dbtools.query.sql.SQLQueryBuilder";

fn add_generated_header(class: &mut JavaClass) -> Result<()> {
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")
}

/// `new String[]{` one column per line `}`
fn string_array(items: &[String]) -> String {
    let lines: Vec<String> = items.iter().map(|item| format!("\t{item}")).collect();
    format!("new String[]{{\n{}}}", lines.join(",\n"))
}

pub(crate) fn constants_class(ctx: &EntityContext<'_>) -> Result<JavaClass> {
    let entity = ctx.entity;
    let base_record = ctx.base_record_name();
    let models = ctx.fields()?;
    let key = primary_key(ctx, &models)?;

    let mut class = JavaClass::new(ctx.const_name(), ctx.package(), JavaClassKind::Class);
    add_generated_header(&mut class)?;

    let database = &ctx.database.name;
    class.add_string_constant("DATABASE", quote(database));
    if entity.kind != EntityType::Query {
        class.add_string_constant("TABLE", quote(&entity.name));
        class.add_string_constant("FULL_TABLE", quote(&format!("{database}.{}", entity.name)));
    }
    if let Some(key) = key {
        class.add_string_constant("PRIMARY_KEY_COLUMN", quote(&key.field.name));
    }

    for model in &models {
        class.add_string_constant(&model.column, quote(&model.field.name));
        class.add_string_constant(
            &model.full_column(),
            quote(&format!("{}.{}", entity.name, model.field.name)),
        );
    }

    if entity.is_table() {
        let create = sqlite::create_table(entity).replace('\t', "");
        let lines: Vec<String> = create.trim_end().lines().map(quote).collect();
        class.add_string_constant("CREATE_TABLE", lines.join(" + \"\\n\" +\n\t\t"));
        class.add_string_constant("DROP_TABLE", quote(&sqlite::drop_table(entity)));
        class.add_string_constant("INSERT_STATEMENT", quote(&insert_statement(ctx, &models)));
        class.add_string_constant(
            "UPDATE_STATEMENT",
            quote(&update_statement(ctx, &models, key)),
        );
    }

    let columns: Vec<String> = models.iter().map(|m| m.column.clone()).collect();
    let full_columns: Vec<String> = models.iter().map(|m| m.full_column()).collect();
    class.add_constant(JavaVariable::constant("ALL_COLUMNS", "String[]", string_array(&columns)));
    class.add_constant(JavaVariable::constant(
        "ALL_COLUMNS_FULL",
        "String[]",
        string_array(&full_columns),
    ));

    if entity.is_enumeration_table() {
        return Ok(class);
    }

    class.add_import(CURSOR);
    for model in models {
        if let Some(import) = model.enum_source().and_then(|s| s.import.clone()) {
            class.add_import(&import);
        }
        let field = JavaField::new(model).qualified(&base_record);
        let getter_name = field.variable(false).getter_name();
        class.add_method(
            JavaMethod::new(getter_name, field.java_type.as_str())
                .static_method()
                .with_parameter("cursor", "Cursor")
                .with_content(format!("return {};", field.from_cursor(field.column()))),
        );
    }

    Ok(class)
}

/// Enum of an enumeration table, with the display string of each value.
pub(crate) fn enum_class(ctx: &EntityContext<'_>) -> Result<JavaClass> {
    let name = ctx.class_name();
    let enums = ctx.entity.table_enums();
    let values = enums.iter().map(|e| e.name.clone()).collect();
    let mut class = JavaClass::new_enum(name.as_str(), ctx.package(), values)?;
    add_generated_header(&mut class)?;
    for import in [
        "java.util.Map",
        "java.util.EnumMap",
        "java.util.List",
        "java.util.ArrayList",
        "java.util.Collections",
    ] {
        class.add_import(import);
    }

    let mut string_map = JavaVariable::constant(
        "enumStringMap",
        &format!("Map<{name}, String>"),
        format!("new EnumMap<{name}, String>({name}.class)"),
    );
    string_map.access = Access::Private;
    class.add_constant(string_map);
    let mut string_list = JavaVariable::constant(
        "stringList",
        "List<String>",
        "new ArrayList<String>()",
    );
    string_list.access = Access::Private;
    class.add_constant(string_list);

    let mut init = String::new();
    for e in &enums {
        init.push_str(&format!("enumStringMap.put({}, {});\n", e.name, quote(&e.value)));
        init.push_str(&format!("stringList.add({});\n", quote(&e.value)));
    }
    class.append_static_init(init.trim_end());

    class.add_method(
        JavaMethod::new("getString", "String")
            .static_method()
            .with_parameter("key", &name)
            .with_content("return enumStringMap.get(key);"),
    );
    class.add_method(
        JavaMethod::new("getList", "List<String>")
            .static_method()
            .with_content("return Collections.unmodifiableList(stringList);"),
    );
    Ok(class)
}

pub(crate) fn base_record_class(ctx: &EntityContext<'_>) -> Result<JavaClass> {
    let const_name = ctx.const_name();
    let record_name = ctx.class_name();
    let models = ctx.fields()?;
    let key = primary_key(ctx, &models)?.map(|k| JavaField::new(k.clone()));
    let jsr305 = ctx.config.jsr305_support;

    let mut class = JavaClass::new(ctx.base_record_name(), ctx.package(), JavaClassKind::Class);
    class.is_abstract = true;
    class.extends = "AndroidBaseRecord".to_string();
    add_generated_header(&mut class)?;
    class.add_import(ANDROID_BASE_RECORD);
    class.add_import(STATEMENT_WRAPPER);
    class.add_import(CONTENT_VALUES);
    class.add_import(CURSOR);
    if jsr305 {
        class.add_import("javax.annotation.Nonnull");
        class.add_import("javax.annotation.Nullable");
    }

    let fields: Vec<JavaField<'_>> = models.into_iter().map(JavaField::new).collect();
    for field in &fields {
        if let Some(source) = field.model.enum_source() {
            if let Some(import) = &source.import {
                class.add_import(import);
            }
            if let Some(values) = &source.nested {
                class.add_enum(&source.class, values.clone())?;
            }
        }
        class.add_variable(field.variable(jsr305));
    }

    add_primary_key_methods(&mut class, &const_name, key.as_ref());

    class.add_method(
        JavaMethod::new("getAllColumns", "String[]")
            .overriding()
            .with_content(format!("return {const_name}.ALL_COLUMNS.clone();")),
    );
    class.add_method(
        JavaMethod::new("getAllColumnsFull", "String[]")
            .with_content(format!("return {const_name}.ALL_COLUMNS_FULL.clone();")),
    );

    let column_ref = |field: &JavaField<'_>| format!("{const_name}.{}", field.column());
    let writable: Vec<&JavaField<'_>> = fields
        .iter()
        .filter(|f| !f.model.is_auto_increment_key())
        .collect();

    let content_values: String = writable
        .iter()
        .map(|f| format!("values.put({}, {});\n", column_ref(f), f.db_value()))
        .collect();
    class.add_method(
        JavaMethod::new("getContentValues", "void")
            .overriding()
            .with_parameter("values", "DBToolsContentValues<?>")
            .with_content(content_values),
    );

    let values: Vec<String> = fields
        .iter()
        .map(|f| {
            if f.model.is_auto_increment_key() {
                format!("\t{}", f.var_name())
            } else {
                format!("\t{}", f.db_value())
            }
        })
        .collect();
    class.add_method(
        JavaMethod::new("getValues", "Object[]")
            .overriding()
            .with_content(format!(
                "Object[] values = new Object[]{{\n{}\n}};\nreturn values;",
                values.join(",\n")
            )),
    );

    let mut copy = format!("{record_name} copy = new {record_name}();\n");
    for field in &fields {
        let setter = field.variable(false).setter_name();
        copy.push_str(&format!("copy.{setter}({});\n", field.var_name()));
    }
    copy.push_str("return copy;");
    class.add_method(JavaMethod::new("copy", record_name.as_str()).with_content(copy));

    let binds = |fields: &[&JavaField<'_>]| -> String {
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| f.bind(i + 1))
            .collect()
    };
    class.add_method(
        JavaMethod::new("bindInsertStatement", "void")
            .overriding()
            .with_parameter("statement", "StatementWrapper")
            .with_content(binds(&writable)),
    );
    let mut update = binds(&writable);
    if let Some(key) = &key {
        update.push_str(&format!(
            "statement.bindLong({}, {});\n",
            writable.len() + 1,
            key.var_name()
        ));
    }
    class.add_method(
        JavaMethod::new("bindUpdateStatement", "void")
            .overriding()
            .with_parameter("statement", "StatementWrapper")
            .with_content(update),
    );

    let from_values: String = writable
        .iter()
        .map(|f| format!("{} = {};\n", f.var_name(), f.from_values(&column_ref(f))))
        .collect();
    class.add_method(
        JavaMethod::new("setContent", "void")
            .overriding()
            .with_parameter("values", "DBToolsContentValues<?>")
            .with_content(from_values),
    );
    let from_cursor: String = fields
        .iter()
        .map(|f| format!("{} = {};\n", f.var_name(), f.from_cursor(&column_ref(f))))
        .collect();
    class.add_method(
        JavaMethod::new("setContent", "void")
            .overriding()
            .with_parameter("cursor", "Cursor")
            .with_content(from_cursor),
    );

    class.add_method(
        JavaMethod::new("isNewRecord", "boolean")
            .overriding()
            .with_content("return getPrimaryKeyId() <= 0;"),
    );

    Ok(class)
}

/// Primary key accessors. The runtime passes ids as `long`.
fn add_primary_key_methods(class: &mut JavaClass, const_name: &str, key: Option<&JavaField<'_>>) {
    let (column, get, set) = match key {
        Some(key) => {
            let assign = if key.java_type == "long" {
                "id".to_string()
            } else {
                format!("({}) id", key.java_type)
            };
            (
                format!("return {const_name}.{};", key.column()),
                format!("return {};", key.var_name()),
                format!("this.{} = {assign};", key.var_name()),
            )
        }
        None => (
            format!("return \"{NO_PRIMARY_KEY}\";"),
            "return 0;".to_string(),
            format!("// {NO_PRIMARY_KEY}"),
        ),
    };
    class.add_method(JavaMethod::new("getIdColumnName", "String").overriding().with_content(column));
    class.add_method(JavaMethod::new("getPrimaryKeyId", "long").overriding().with_content(get));
    class.add_method(
        JavaMethod::new("setPrimaryKeyId", "void")
            .overriding()
            .with_parameter("id", "long")
            .with_content(set),
    );
}

/// Editable `<Entity>` record, created once and then owned by the app.
pub(crate) fn record_class(ctx: &EntityContext<'_>) -> Result<JavaClass> {
    let mut class = JavaClass::new(ctx.class_name(), ctx.package(), JavaClassKind::Class);
    class.extends = ctx.base_record_name();
    class.file_header_comment = editable_header(&class.file_name(), &ctx.created);
    class.add_import(CURSOR);
    class.add_import(CONTENT_VALUES);

    let name = ctx.class_name();
    class.add_constructor(JavaMethod::constructor(name.as_str()))?;
    class.add_constructor(
        JavaMethod::constructor(name.as_str())
            .with_parameter("cursor", "Cursor")
            .with_content("setContent(cursor);"),
    )?;
    class.add_constructor(
        JavaMethod::constructor(name.as_str())
            .with_parameter("values", "DBToolsContentValues<?>")
            .with_content("setContent(values);"),
    )?;

    match ctx.entity.kind {
        EntityType::View => add_view_sql(ctx, &mut class),
        EntityType::Query => add_query_sql(ctx, &mut class),
        EntityType::Table => {}
    }
    Ok(class)
}

fn add_view_sql(ctx: &EntityContext<'_>, class: &mut JavaClass) {
    let const_name = ctx.const_name();
    class.class_header_comment = format!(
        "// Replace the following CREATE_VIEW sql (the following is a template suggestion for your view)\n\
         // SUGGESTION: Keep the \" AS {const_name}.<columnname>\" portion of the sql"
    );
    class.add_string_constant(
        "DROP_VIEW",
        format!("\"DROP VIEW IF EXISTS \" + {const_name}.TABLE"),
    );

    let columns = column_pairs(ctx.entity, &const_name);
    if ctx.config.sql_query_builder_support {
        class.add_import(SQL_QUERY_BUILDER);
        let mut builder = format!(
            "CREATE_VIEW = \"CREATE VIEW IF NOT EXISTS \" + {const_name}.TABLE + \" AS \" +\n\tnew SQLQueryBuilder()\n"
        );
        for (full, short) in &columns {
            builder.push_str(&format!("\t.field({full}, {short})\n"));
        }
        builder.push_str(&format!("\t.table({const_name}.TABLE)\n\t.buildQuery();"));
        class.add_string_constant("CREATE_VIEW", "");
        class.append_static_init(&builder);
    } else {
        let selected: Vec<String> = columns
            .iter()
            .map(|(full, short)| format!("{full} + \" AS \" + {short}"))
            .collect();
        class.add_string_constant(
            "CREATE_VIEW",
            format!(
                "\"CREATE VIEW IF NOT EXISTS \" + {const_name}.TABLE + \" AS SELECT \" + {} + \" FROM \" + {const_name}.TABLE",
                selected.join(" + \", \" + ")
            ),
        );
    }
}

fn add_query_sql(ctx: &EntityContext<'_>, class: &mut JavaClass) {
    let const_name = ctx.const_name();
    let columns = column_pairs(ctx.entity, &const_name);

    if ctx.config.sql_query_builder_support {
        class.class_header_comment = "// Replace the following QUERY sql (the following is a template suggestion for your query)\n\
             // SUGGESTION: Keep the second parameter of each field(<replace>, <keep>)"
            .to_string();
        class.add_import(SQL_QUERY_BUILDER);
        let mut builder = String::from("QUERY = new SQLQueryBuilder()\n");
        for (full, short) in &columns {
            builder.push_str(&format!("\t.field({full}, {short})\n"));
        }
        builder.push_str("\t.table(\"SOME_TABLE\")\n\t.buildQuery();");
        class.add_string_constant("QUERY", "");
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
        class.add_string_constant(
            "QUERY",
            format!(
                "\"(\" + \"SELECT \" + {} + \" FROM SOME TABLE(S)\" + \")\"",
                selected.join(" + \", \" + ")
            ),
        );
    }
    class.add_string_constant("QUERY_RAW", "\"SELECT * FROM \" + QUERY");
}
