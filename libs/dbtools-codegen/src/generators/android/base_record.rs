//! `<Entity>Const` objects, `<Entity>BaseRecord` classes and enumeration
//! table enums.

use dbtools_schema::{sqlite, EntityType};

use crate::error::{CodegenError, Result};
use crate::generators::android::{generated_header, EntityContext, FieldModel};
use crate::kotlin::format::quote;
use crate::kotlin::{ClassKind, KotlinClass, KotlinEnum, KotlinFun, KotlinVal};

pub(crate) const NO_PRIMARY_KEY: &str = "NO_PRIMARY_KEY";

const ANDROID_BASE_RECORD: &str = "org.dbtools.android.domain.AndroidBaseRecord";
const CONTENT_VALUES: &str = "org.dbtools.android.domain.database.contentvalues.DBToolsContentValues";
const STATEMENT_WRAPPER: &str = "org.dbtools.android.domain.database.statement.StatementWrapper";
const CURSOR: &str = "android.database.Cursor";

fn add_generated_header(class: &mut KotlinClass) -> Result<()> {
    class.file_header_comment = generated_header(&class.file_name());
    class.add_annotation("@SuppressWarnings(\"all\")")
}

/// The single primary key of the entity, if any.
pub(crate) fn primary_key<'f, 'a>(
    ctx: &EntityContext<'_>,
    fields: &'f [FieldModel<'a>],
) -> Result<Option<&'f FieldModel<'a>>> {
    let mut keys = fields.iter().filter(|f| f.field.primary_key);
    let first = keys.next();
    if let Some(second) = keys.next() {
        return Err(CodegenError::DuplicatePrimaryKey {
            entity: ctx.entity.name.clone(),
            field: second.var_name.clone(),
        });
    }
    Ok(first)
}

pub(crate) fn constants_class(ctx: &EntityContext<'_>) -> Result<KotlinClass> {
    let entity = ctx.entity;
    let base_record = ctx.base_record_name();
    let fields = ctx.fields()?;
    let primary_key = primary_key(ctx, &fields)?;

    let mut class = KotlinClass::new(ctx.const_name(), ctx.package(), ClassKind::Object);
    add_generated_header(&mut class)?;

    let database = &ctx.database.name;
    class.add_const("DATABASE", quote(database));
    if entity.kind != EntityType::Query {
        class.add_const("TABLE", quote(&entity.name));
        class.add_const("FULL_TABLE", quote(&format!("{database}.{}", entity.name)));
    }
    if let Some(key) = primary_key {
        class.add_const("PRIMARY_KEY_COLUMN", quote(&key.field.name));
    }

    for model in &fields {
        class.add_const(&model.column, quote(&model.field.name));
        class.add_const(
            &model.full_column(),
            quote(&format!("{}.{}", entity.name, model.field.name)),
        );
    }

    if entity.is_table() {
        let create = sqlite::create_table(entity).replace('\t', "");
        class.add_const("CREATE_TABLE", quote(create.trim_end()));
        class.add_const("DROP_TABLE", quote(&sqlite::drop_table(entity)));
        class.add_const("INSERT_STATEMENT", quote(&insert_statement(ctx, &fields)));
        class.add_const(
            "UPDATE_STATEMENT",
            quote(&update_statement(ctx, &fields, primary_key)),
        );
    }

    let columns: Vec<&str> = fields.iter().map(|f| f.column.as_str()).collect();
    let full_columns: Vec<String> = fields.iter().map(|f| f.full_column()).collect();
    class.add_constant(
        KotlinVal::new("ALL_COLUMNS", "Array<String>")
            .with_default(format!("arrayOf({})", columns.join(", "))),
    );
    class.add_constant(
        KotlinVal::new("ALL_COLUMNS_FULL", "Array<String>")
            .with_default(format!("arrayOf({})", full_columns.join(", "))),
    );

    if entity.is_enumeration_table() {
        return Ok(class);
    }

    class.add_import(CURSOR);
    for model in &fields {
        if let Some(import) = model.enum_source().and_then(|s| s.import.as_deref()) {
            class.add_import(import);
        }
        let model = model.qualified(&base_record);
        class.add_fun(
            KotlinFun::new(model.member().getter_name(), model.declared_type())
                .with_parameter("cursor", "Cursor")
                .with_content(format!("return {}", model.from_cursor(&model.column))),
        );
    }

    Ok(class)
}

/// Top-level enum of an enumeration table.
pub(crate) fn enum_class(ctx: &EntityContext<'_>) -> Result<KotlinClass> {
    let names = ctx.entity.table_enums().into_iter().map(|e| e.name).collect();
    let mut class = KotlinClass::new_enum(ctx.class_name(), ctx.package(), names)?;
    add_generated_header(&mut class)?;
    Ok(class)
}

pub(crate) fn base_record_class(ctx: &EntityContext<'_>) -> Result<KotlinClass> {
    let const_name = ctx.const_name();
    let record_name = ctx.class_name();
    let fields = ctx.fields()?;
    let primary_key = primary_key(ctx, &fields)?;

    let mut class = KotlinClass::new(ctx.base_record_name(), ctx.package(), ClassKind::Class);
    class.is_abstract = true;
    class.extends = "AndroidBaseRecord()".to_string();
    add_generated_header(&mut class)?;
    class.add_import(ANDROID_BASE_RECORD);
    class.add_import(STATEMENT_WRAPPER);
    class.add_import(CONTENT_VALUES);
    class.add_import(CURSOR);

    for model in &fields {
        if let Some(source) = model.enum_source() {
            if let Some(import) = &source.import {
                class.add_import(import);
            }
            if let Some(values) = &source.nested {
                if !class.enums().iter().any(|e| e.name == source.class) {
                    class.add_enum(KotlinEnum::new(&source.class, values.clone())?);
                }
            }
        }
        class.add_member(model.member());
    }

    add_primary_key_functions(&mut class, &const_name, primary_key);

    class.add_fun(
        KotlinFun::new("getAllColumns", "Array<String>")
            .overriding()
            .with_content(format!("return {const_name}.ALL_COLUMNS.clone()")),
    );
    class.add_fun(
        KotlinFun::new("getAllColumnsFull", "Array<String>")
            .with_content(format!("return {const_name}.ALL_COLUMNS_FULL.clone()")),
    );

    let column_ref = |model: &FieldModel<'_>| format!("{const_name}.{}", model.column);
    let writable: Vec<&FieldModel<'_>> = fields
        .iter()
        .filter(|f| !f.is_auto_increment_key())
        .collect();

    let content_values: String = writable
        .iter()
        .map(|m| format!("values.put({}, {})\n", column_ref(m), m.db_value()))
        .collect();
    class.add_fun(
        KotlinFun::new("getContentValues", "")
            .overriding()
            .with_parameter("values", "DBToolsContentValues<*>")
            .with_content(content_values),
    );

    let values: Vec<String> = fields
        .iter()
        .map(|m| {
            if m.is_auto_increment_key() {
                format!("\t{}", m.var_name)
            } else {
                format!("\t{}", m.db_value())
            }
        })
        .collect();
    class.add_fun(
        KotlinFun::new("getValues", "Array<Any?>")
            .overriding()
            .with_content(format!("return arrayOf(\n{})\n", values.join(",\n"))),
    );

    let mut copy = format!("val copy = {record_name}()\n");
    for model in &fields {
        copy.push_str(&format!("copy.{} = {}\n", model.var_name, model.copy_value()));
    }
    copy.push_str("return copy");
    class.add_fun(KotlinFun::new("copy", record_name.as_str()).with_content(copy));

    let insert: String = writable
        .iter()
        .enumerate()
        .map(|(i, m)| m.bind(i + 1))
        .collect();
    class.add_fun(
        KotlinFun::new("bindInsertStatement", "")
            .overriding()
            .with_parameter("statement", "StatementWrapper")
            .with_content(insert),
    );

    let mut update: String = writable
        .iter()
        .enumerate()
        .map(|(i, m)| m.bind(i + 1))
        .collect();
    if let Some(key) = primary_key {
        update.push_str(&format!(
            "statement.bindLong({}, {})\n",
            writable.len() + 1,
            key.var_name
        ));
    }
    class.add_fun(
        KotlinFun::new("bindUpdateStatement", "")
            .overriding()
            .with_parameter("statement", "StatementWrapper")
            .with_content(update),
    );

    let from_values: String = writable
        .iter()
        .map(|m| format!("{} = {}\n", m.var_name, m.from_values(&column_ref(m))))
        .collect();
    class.add_fun(
        KotlinFun::new("setContent", "")
            .overriding()
            .with_parameter("values", "DBToolsContentValues<*>")
            .with_content(from_values),
    );

    let from_cursor: String = fields
        .iter()
        .map(|m| format!("{} = {}\n", m.var_name, m.from_cursor(&column_ref(m))))
        .collect();
    class.add_fun(
        KotlinFun::new("setContent", "")
            .overriding()
            .with_parameter("cursor", "Cursor")
            .with_content(from_cursor),
    );

    class.add_fun(
        KotlinFun::new("isNewRecord", "Boolean")
            .overriding()
            .with_content("return primaryKeyId <= 0"),
    );

    Ok(class)
}

/// `getIdColumnName` / `getPrimaryKeyId` / `setPrimaryKeyId`. Entities
/// without a key get accessors for the `NO_PRIMARY_KEY` column.
fn add_primary_key_functions(class: &mut KotlinClass, const_name: &str, key: Option<&FieldModel<'_>>) {
    match key {
        Some(key) => {
            class.add_fun(
                KotlinFun::new("getIdColumnName", "String")
                    .overriding()
                    .with_content(format!("return {const_name}.{}", key.column)),
            );
            class.add_fun(
                KotlinFun::new("getPrimaryKeyId", key.kotlin_type.as_str())
                    .overriding()
                    .with_content(format!("return {}", key.var_name)),
            );
            class.add_fun(
                KotlinFun::new("setPrimaryKeyId", "")
                    .overriding()
                    .with_parameter("id", &key.kotlin_type)
                    .with_content(format!("this.{} = id", key.var_name)),
            );
        }
        None => {
            class.add_fun(
                KotlinFun::new("getIdColumnName", "String")
                    .overriding()
                    .with_content(format!("return \"{NO_PRIMARY_KEY}\"")),
            );
            class.add_fun(
                KotlinFun::new("getPrimaryKeyId", "Long")
                    .overriding()
                    .with_content("return 0"),
            );
            class.add_fun(
                KotlinFun::new("setPrimaryKeyId", "")
                    .overriding()
                    .with_parameter("id", "Long")
                    .with_content(format!("// {NO_PRIMARY_KEY}")),
            );
        }
    }
}

pub(crate) fn insert_statement(ctx: &EntityContext<'_>, fields: &[FieldModel<'_>]) -> String {
    let columns: Vec<&str> = fields
        .iter()
        .filter(|f| !f.is_auto_increment_key())
        .map(|f| f.field.name.as_str())
        .collect();
    let params = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        ctx.entity.name,
        columns.join(","),
        params.join(",")
    )
}

pub(crate) fn update_statement(
    ctx: &EntityContext<'_>,
    fields: &[FieldModel<'_>],
    primary_key: Option<&FieldModel<'_>>,
) -> String {
    let assignments: Vec<String> = fields
        .iter()
        .filter(|f| !f.is_auto_increment_key())
        .map(|f| format!("{}=?", f.field.name))
        .collect();
    let key = primary_key.map_or(NO_PRIMARY_KEY, |k| k.field.name.as_str());
    format!(
        "UPDATE {} SET {} WHERE {key} = ?",
        ctx.entity.name,
        assignments.join(", ")
    )
}
