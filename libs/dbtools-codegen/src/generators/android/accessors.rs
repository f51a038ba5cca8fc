//! Per-column Kotlin fragments: property declaration, database value,
//! statement binding, content-values and cursor readers.

use dbtools_schema::{naming, FieldType, SchemaField};
use tracing::warn;

use crate::error::{CodegenError, Result};
use crate::generators::android::EntityContext;
use crate::generators::DateType;
use crate::kotlin::format::{format_constant, format_default_value};
use crate::kotlin::KotlinVal;

/// Inline text emitted where a column type has no accessor rule.
pub fn unhandled(field_type: FieldType) -> String {
    format!("[[UNHANDLED FIELD TYPE: {field_type}]]")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueKind {
    /// Ordinal of `class`.
    Enumeration(EnumSource),
    Date,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumSource {
    pub class: String,
    /// Literals of an enum declared inside the base record.
    pub nested: Option<Vec<String>>,
    /// Fully qualified name to import.
    pub import: Option<String>,
}

/// A schema column resolved against its entity and the generator options.
#[derive(Debug, Clone)]
pub(crate) struct FieldModel<'a> {
    pub field: &'a SchemaField,
    pub var_name: String,
    /// `C_FIRST_NAME`
    pub column: String,
    /// Kotlin type without the nullable marker.
    pub kotlin_type: String,
    pub nullable: bool,
    pub kind: ValueKind,
    pub default_value: String,
    pub date_type: DateType,
}

impl<'a> FieldModel<'a> {
    pub fn resolve(ctx: &EntityContext<'_>, field: &'a SchemaField) -> Result<Self> {
        let var_name = field.variable_name();
        let column = format!("C_{}", format_constant(&var_name));
        let date_type = ctx.config.date_type;

        if field.is_enumeration() {
            let source = resolve_enum(ctx, field, &var_name)?;
            let literal = enum_default(ctx, field, &source);
            let default_value = match literal {
                Some(literal) => format!("{}.{literal}", source.class),
                None => format!("{}.values()[0]", source.class),
            };
            return Ok(Self {
                field,
                var_name,
                column,
                kotlin_type: source.class.clone(),
                nullable: false,
                kind: ValueKind::Enumeration(source),
                default_value,
                date_type,
            });
        }

        let data_type = field.jdbc_data_type;
        let (kind, kotlin_type) = if data_type.is_date() {
            (ValueKind::Date, date_type.kotlin_type(field).to_string())
        } else {
            (ValueKind::Plain, data_type.kotlin_type().to_string())
        };
        let nullable = (!field.not_null || kotlin_type == "Any") && !field.primary_key;

        if bind_method(data_type).is_none()
            || (kind == ValueKind::Date && !date_type.supports(field))
        {
            warn!(
                field = %field.name,
                data_type = %data_type,
                date_type = %date_type,
                "no accessor rule for field type"
            );
        }

        let default_value = match kind {
            ValueKind::Date => {
                if !nullable
                    || (field.has_default_value()
                        && field.default_value.trim().eq_ignore_ascii_case("now"))
                {
                    date_type.default_value(field)
                } else {
                    "null".to_string()
                }
            }
            _ => format_default_value(&kotlin_type, &field.default_value),
        };

        Ok(Self {
            field,
            var_name,
            column,
            kotlin_type,
            nullable,
            kind,
            default_value,
            date_type,
        })
    }

    /// Same column with a nested enum referenced through `owner`.
    pub fn qualified(&self, owner: &str) -> Self {
        let mut model = self.clone();
        if let ValueKind::Enumeration(source) = &mut model.kind {
            if source.nested.is_some() {
                source.class = format!("{owner}.{}", source.class);
                model.kotlin_type = source.class.clone();
                model.default_value = format!("{owner}.{}", model.default_value);
            }
        }
        model
    }

    /// `FULL_C_FIRST_NAME`
    pub fn full_column(&self) -> String {
        format!("FULL_{}", self.column)
    }

    pub fn declared_type(&self) -> String {
        if self.nullable {
            format!("{}?", self.kotlin_type)
        } else {
            self.kotlin_type.clone()
        }
    }

    pub fn is_auto_increment_key(&self) -> bool {
        self.field.primary_key && self.field.increment
    }

    pub fn member(&self) -> KotlinVal {
        KotlinVal::var(&self.var_name, self.declared_type()).with_default(&self.default_value)
    }

    pub fn enum_source(&self) -> Option<&EnumSource> {
        match &self.kind {
            ValueKind::Enumeration(source) => Some(source),
            _ => None,
        }
    }

    /// Value stored in content values and the values array. May be null.
    pub fn db_value(&self) -> String {
        self.convert(false)
    }

    /// Statements binding this column at `index` (1 based).
    pub fn bind(&self, index: usize) -> String {
        let Some(method) = self.bind_method() else {
            return format!("{}\n", unhandled(self.field.jdbc_data_type));
        };
        let value = self.convert(true);
        if self.nullable {
            format!(
                "if ({var} != null) {{\n\tstatement.{method}({index}, {value})\n}} else {{\n\tstatement.bindNull({index})\n}}\n",
                var = self.var_name
            )
        } else {
            format!("statement.{method}({index}, {value})\n")
        }
    }

    pub fn bind_method(&self) -> Option<&'static str> {
        match self.kind {
            ValueKind::Enumeration(_) => Some("bindLong"),
            _ => bind_method(self.field.jdbc_data_type),
        }
    }

    /// Read the column `column_ref` out of `values: DBToolsContentValues<*>`.
    pub fn from_values(&self, column_ref: &str) -> String {
        let data_type = self.field.jdbc_data_type;
        match &self.kind {
            ValueKind::Enumeration(source) => {
                format!("{}.values()[values.getAsInteger({column_ref})!!]", source.class)
            }
            ValueKind::Date => self
                .date_type
                .from_values(self.field, column_ref)
                .unwrap_or_else(|| unhandled(data_type)),
            ValueKind::Plain => {
                let getter = match self.kotlin_type.as_str() {
                    "Int" => "getAsInteger",
                    "String" => "getAsString",
                    "Long" => "getAsLong",
                    "Boolean" => "getAsBoolean",
                    "Float" => "getAsFloat",
                    "Double" => "getAsDouble",
                    "ByteArray" => "getAsByteArray",
                    "Char" => {
                        return if self.nullable {
                            format!("values.getAsString({column_ref})?.firstOrNull()")
                        } else {
                            format!("values.getAsString({column_ref})!![0]")
                        };
                    }
                    _ => return unhandled(data_type),
                };
                let read = format!("values.{getter}({column_ref})");
                if self.nullable {
                    read
                } else {
                    format!("{read}!!")
                }
            }
        }
    }

    /// Read the column `column_ref` out of `cursor: Cursor`.
    pub fn from_cursor(&self, column_ref: &str) -> String {
        let data_type = self.field.jdbc_data_type;
        let index = format!("cursor.getColumnIndexOrThrow({column_ref})");
        let read = match &self.kind {
            ValueKind::Enumeration(source) => {
                return format!("{}.values()[cursor.getInt({index})]", source.class);
            }
            ValueKind::Date => {
                return self
                    .date_type
                    .from_cursor(self.field, column_ref)
                    .unwrap_or_else(|| unhandled(data_type));
            }
            ValueKind::Plain => match self.kotlin_type.as_str() {
                "Int" => format!("cursor.getInt({index})"),
                "String" => format!("cursor.getString({index})"),
                "Long" => format!("cursor.getLong({index})"),
                "Float" => format!("cursor.getFloat({index})"),
                "Double" => format!("cursor.getDouble({index})"),
                "ByteArray" => format!("cursor.getBlob({index})"),
                "Boolean" => format!("cursor.getInt({index}) != 0"),
                "Char" => format!("cursor.getString({index})[0]"),
                _ => return unhandled(data_type),
            },
        };
        if self.nullable {
            format!("if (!cursor.isNull({index})) {read} else null")
        } else {
            read
        }
    }

    /// Right-hand side of `copy.<var> = ...`.
    pub fn copy_value(&self) -> String {
        match self.kind {
            ValueKind::Date => self.date_type.copy(&self.var_name, !self.nullable),
            _ => self.var_name.clone(),
        }
    }

    /// `non_null` is set inside a null check, where the value must not be null.
    fn convert(&self, non_null: bool) -> String {
        let var = &self.var_name;
        let data_type = self.field.jdbc_data_type;
        match &self.kind {
            ValueKind::Enumeration(_) => format!("{var}.ordinal.toLong()"),
            ValueKind::Date => match self.date_type.to_db_value(self.field, var) {
                Some(value) if non_null => format!("{value}!!"),
                Some(value) => value,
                None => unhandled(data_type),
            },
            ValueKind::Plain => {
                let safe = self.nullable && !non_null;
                let base = if self.nullable && non_null {
                    format!("{var}!!")
                } else {
                    var.clone()
                };
                let call = if safe { "?." } else { "." };
                match data_type {
                    FieldType::Boolean | FieldType::Bit | FieldType::Tinyint => {
                        if safe {
                            format!("{var}?.let {{ if (it) 1L else 0L }}")
                        } else {
                            format!("if ({base}) 1L else 0L")
                        }
                    }
                    FieldType::Smallint | FieldType::Integer | FieldType::BigInteger => {
                        format!("{base}{call}toLong()")
                    }
                    FieldType::Real
                    | FieldType::Float
                    | FieldType::Decimal
                    | FieldType::Numeric
                    | FieldType::BigDecimal => format!("{base}{call}toDouble()"),
                    FieldType::Char => format!("{base}{call}toString()"),
                    FieldType::Bigint
                    | FieldType::Double
                    | FieldType::Varchar
                    | FieldType::Longvarchar
                    | FieldType::Clob
                    | FieldType::Blob => base,
                    _ => unhandled(data_type),
                }
            }
        }
    }
}

/// Statement bind method for a column type.
pub fn bind_method(data_type: FieldType) -> Option<&'static str> {
    match data_type {
        FieldType::Boolean
        | FieldType::Bit
        | FieldType::Tinyint
        | FieldType::Smallint
        | FieldType::Integer
        | FieldType::Bigint
        | FieldType::BigInteger
        | FieldType::Timestamp => Some("bindLong"),
        FieldType::Real
        | FieldType::Float
        | FieldType::Double
        | FieldType::Decimal
        | FieldType::Numeric
        | FieldType::BigDecimal => Some("bindDouble"),
        FieldType::Char
        | FieldType::Varchar
        | FieldType::Longvarchar
        | FieldType::Clob
        | FieldType::Datetime
        | FieldType::Date
        | FieldType::Time => Some("bindString"),
        FieldType::Blob => Some("bindBlob"),
        FieldType::JavaObject | FieldType::Money | FieldType::Fraction | FieldType::Unknown => {
            None
        }
    }
}

fn resolve_enum(ctx: &EntityContext<'_>, field: &SchemaField, var_name: &str) -> Result<EnumSource> {
    let local_values = field.enum_values();

    if field.is_foreign_key_enumeration() && field.is_foreign_key() {
        let table_name = field.foreign_key_table.as_deref().unwrap_or_default();
        let class = ctx
            .database
            .table(table_name)
            .map(|t| t.class_name())
            .unwrap_or_else(|| naming::class_name(table_name));
        if !local_values.is_empty() {
            return Ok(EnumSource {
                class,
                nested: Some(local_values),
                import: None,
            });
        }
        let import = format!("{}.{class}", ctx.sibling_package(&class));
        return Ok(EnumSource {
            class,
            nested: None,
            import: Some(import),
        });
    }

    if let Some(class) = field
        .enumeration_class
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        return Ok(EnumSource {
            class: class.to_string(),
            nested: None,
            import: None,
        });
    }

    if local_values.is_empty() {
        return Err(CodegenError::InvalidArgument(format!(
            "enumeration field {}.{} declares no values",
            ctx.entity.name, field.name
        )));
    }
    Ok(EnumSource {
        class: crate::kotlin::capitalize(var_name),
        nested: Some(local_values),
        import: None,
    })
}

fn enum_default(ctx: &EntityContext<'_>, field: &SchemaField, source: &EnumSource) -> Option<String> {
    if let Some(default) = field
        .enumeration_default
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        return Some(default.to_string());
    }
    if let Some(values) = &source.nested {
        return values.first().cloned();
    }
    field
        .foreign_key_table
        .as_deref()
        .and_then(|t| ctx.database.table(t))
        .and_then(|t| t.table_enums().into_iter().next())
        .map(|e| e.name)
}
