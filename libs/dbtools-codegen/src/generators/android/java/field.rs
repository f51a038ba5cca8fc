//! Per-column Java fragments, layered over the resolved [`FieldModel`].

use dbtools_schema::FieldType;

use crate::generators::android::accessors::ValueKind;
use crate::generators::android::{unhandled, FieldModel};
use crate::java::format::format_default_value;
use crate::java::{JavaVariable, Nullability};

const ENUM_UTIL: &str = "org.dbtools.android.domain.util.EnumUtil";

/// A resolved column with its Java type and default.
#[derive(Debug, Clone)]
pub(crate) struct JavaField<'a> {
    pub model: FieldModel<'a>,
    /// Boxed when the column is nullable.
    pub java_type: String,
    pub default_value: String,
}

impl<'a> JavaField<'a> {
    pub fn new(model: FieldModel<'a>) -> Self {
        let field = model.field;
        let (java_type, default_value) = match &model.kind {
            ValueKind::Enumeration(source) => (source.class.clone(), model.default_value.clone()),
            ValueKind::Date => {
                let default_value = if model.default_value == "null" {
                    "null".to_string()
                } else {
                    model.date_type.java_default_value(field)
                };
                (model.kotlin_type.clone(), default_value)
            }
            ValueKind::Plain => {
                let java_type = field.jdbc_data_type.java_type(model.nullable).to_string();
                let default_value = format_default_value(&java_type, &field.default_value);
                (java_type, default_value)
            }
        };
        Self {
            model,
            java_type,
            default_value,
        }
    }

    /// Same column with a nested enum referenced through `owner`.
    pub fn qualified(&self, owner: &str) -> Self {
        Self::new(self.model.qualified(owner))
    }

    pub fn var_name(&self) -> &str {
        &self.model.var_name
    }

    pub fn column(&self) -> &str {
        &self.model.column
    }

    /// Private field with accessors. Mutable dates are copied in and out.
    pub fn variable(&self, jsr305: bool) -> JavaVariable {
        let mut variable = JavaVariable::new(self.var_name(), self.java_type.as_str())
            .with_default(&self.default_value)
            .with_accessors();
        variable.clone_on_access =
            self.model.kind == ValueKind::Date && self.model.date_type.is_mutable();
        if jsr305 {
            variable = variable.with_nullability(if self.model.nullable {
                Nullability::Nullable
            } else {
                Nullability::Nonnull
            });
        }
        variable
    }

    /// Value stored in content values and the values array. May be null.
    pub fn db_value(&self) -> String {
        let var = self.var_name();
        match self.convert() {
            Some(value) if self.model.nullable && value != var => {
                format!("{var} != null ? {value} : null")
            }
            Some(value) => value,
            None => unhandled(self.model.field.jdbc_data_type),
        }
    }

    /// Statements binding this column at `index` (1 based).
    pub fn bind(&self, index: usize) -> String {
        let data_type = self.model.field.jdbc_data_type;
        let (Some(method), Some(value)) = (self.model.bind_method(), self.convert()) else {
            return format!("{}\n", unhandled(data_type));
        };
        if self.model.nullable {
            format!(
                "if ({var} != null) {{\n\tstatement.{method}({index}, {value});\n}} else {{\n\tstatement.bindNull({index});\n}}\n",
                var = self.var_name()
            )
        } else {
            format!("statement.{method}({index}, {value});\n")
        }
    }

    /// Read the column `column_ref` out of `values: DBToolsContentValues<?>`.
    pub fn from_values(&self, column_ref: &str) -> String {
        let field = self.model.field;
        match &self.model.kind {
            ValueKind::Enumeration(source) => format!(
                "{ENUM_UTIL}.ordinalToEnum({}.class, values.getAsInteger({column_ref}), {})",
                source.class, self.default_value
            ),
            ValueKind::Date => self
                .model
                .date_type
                .java_from_values(field, column_ref)
                .unwrap_or_else(|| unhandled(field.jdbc_data_type)),
            ValueKind::Plain => {
                let getter = match field.jdbc_data_type {
                    FieldType::Boolean | FieldType::Bit | FieldType::Tinyint => "getAsBoolean",
                    FieldType::Smallint | FieldType::Integer => "getAsInteger",
                    FieldType::Bigint => "getAsLong",
                    FieldType::Real | FieldType::Float | FieldType::Decimal | FieldType::Numeric => {
                        "getAsFloat"
                    }
                    FieldType::Double => "getAsDouble",
                    FieldType::Varchar | FieldType::Longvarchar | FieldType::Clob => "getAsString",
                    FieldType::Blob => "getAsByteArray",
                    FieldType::Char => {
                        let read = format!("values.getAsString({column_ref})");
                        return if self.model.nullable {
                            format!("{read} != null ? {read}.charAt(0) : null")
                        } else {
                            format!("{read}.charAt(0)")
                        };
                    }
                    other => return unhandled(other),
                };
                format!("values.{getter}({column_ref})")
            }
        }
    }

    /// Read the column `column_ref` out of `cursor: Cursor`.
    pub fn from_cursor(&self, column_ref: &str) -> String {
        let field = self.model.field;
        let index = format!("cursor.getColumnIndexOrThrow({column_ref})");
        let read = match &self.model.kind {
            ValueKind::Enumeration(source) => {
                return format!(
                    "{ENUM_UTIL}.ordinalToEnum({}.class, cursor.getInt({index}), {})",
                    source.class, self.default_value
                );
            }
            ValueKind::Date => {
                return self
                    .model
                    .date_type
                    .java_from_cursor(field, column_ref)
                    .unwrap_or_else(|| unhandled(field.jdbc_data_type));
            }
            ValueKind::Plain => match field.jdbc_data_type {
                FieldType::Boolean | FieldType::Bit | FieldType::Tinyint => {
                    format!("cursor.getInt({index}) != 0")
                }
                FieldType::Smallint | FieldType::Integer => format!("cursor.getInt({index})"),
                FieldType::Bigint => format!("cursor.getLong({index})"),
                FieldType::Real | FieldType::Float | FieldType::Decimal | FieldType::Numeric => {
                    format!("cursor.getFloat({index})")
                }
                FieldType::Double => format!("cursor.getDouble({index})"),
                FieldType::Varchar | FieldType::Longvarchar | FieldType::Clob => {
                    format!("cursor.getString({index})")
                }
                FieldType::Blob => format!("cursor.getBlob({index})"),
                FieldType::Char => format!("cursor.getString({index}).charAt(0)"),
                other => return unhandled(other),
            },
        };
        if self.model.nullable {
            format!("!cursor.isNull({index}) ? {read} : null")
        } else {
            read
        }
    }

    /// Database form of the field, assuming it is not null.
    fn convert(&self) -> Option<String> {
        let var = self.var_name();
        let field = self.model.field;
        match &self.model.kind {
            ValueKind::Enumeration(_) => Some(format!("{var}.ordinal()")),
            ValueKind::Date => self.model.date_type.to_db_value(field, var),
            ValueKind::Plain => match field.jdbc_data_type {
                FieldType::Boolean | FieldType::Bit | FieldType::Tinyint => {
                    Some(format!("{var} ? 1 : 0"))
                }
                FieldType::Char => Some(format!("String.valueOf({var})")),
                FieldType::BigDecimal => Some(format!("{var}.doubleValue()")),
                FieldType::BigInteger => Some(format!("{var}.longValue()")),
                FieldType::Smallint
                | FieldType::Integer
                | FieldType::Bigint
                | FieldType::Real
                | FieldType::Float
                | FieldType::Decimal
                | FieldType::Numeric
                | FieldType::Double
                | FieldType::Varchar
                | FieldType::Longvarchar
                | FieldType::Clob
                | FieldType::Blob => Some(var.to_string()),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::android::tests::context_for;
    use crate::generators::DateType;
    use dbtools_schema::{EntityType, SchemaDatabase, SchemaEntity, SchemaField};

    fn database(fields: Vec<SchemaField>) -> SchemaDatabase {
        let mut person = SchemaEntity::new(EntityType::Table, "PERSON");
        person.fields = fields;
        SchemaDatabase {
            name: "main".to_string(),
            tables: vec![person],
            ..Default::default()
        }
    }

    fn java_field(db: &SchemaDatabase) -> JavaField<'_> {
        let ctx = context_for(db, 0);
        JavaField::new(FieldModel::resolve(&ctx, &db.tables[0].fields[0]).unwrap())
    }

    #[test]
    fn nullable_columns_are_boxed() {
        let db = database(vec![SchemaField::new("AGE", FieldType::Integer)]);
        let field = java_field(&db);

        assert_eq!(field.java_type, "Integer");
        assert_eq!(field.default_value, "0");
        assert_eq!(
            field.bind(2),
            "if (age != null) {\n\tstatement.bindLong(2, age);\n} else {\n\tstatement.bindNull(2);\n}\n"
        );
        assert_eq!(
            field.from_cursor("C_AGE"),
            "!cursor.isNull(cursor.getColumnIndexOrThrow(C_AGE)) ? cursor.getInt(cursor.getColumnIndexOrThrow(C_AGE)) : null"
        );
    }

    #[test]
    fn booleans_are_stored_as_integers() {
        let mut active = SchemaField::new("ACTIVE", FieldType::Boolean);
        active.not_null = true;
        active.default_value = "1".to_string();
        let db = database(vec![active]);
        let field = java_field(&db);

        assert_eq!(field.java_type, "boolean");
        assert_eq!(field.default_value, "true");
        assert_eq!(field.bind(1), "statement.bindLong(1, active ? 1 : 0);\n");
        assert_eq!(field.db_value(), "active ? 1 : 0");
        assert_eq!(field.variable(false).getter_name(), "isActive");
    }

    #[test]
    fn nullable_conversions_guard_null() {
        let db = database(vec![SchemaField::new("INITIAL", FieldType::Char)]);
        let field = java_field(&db);

        assert_eq!(field.java_type, "Character");
        assert_eq!(
            field.db_value(),
            "initial != null ? String.valueOf(initial) : null"
        );
        assert_eq!(
            field.from_values("C_INITIAL"),
            "values.getAsString(C_INITIAL) != null ? values.getAsString(C_INITIAL).charAt(0) : null"
        );
    }

    #[test]
    fn enumerations_use_enum_util() {
        let mut status = SchemaField::new("STATUS", FieldType::Integer);
        status.not_null = true;
        status.enumerations = "OPEN,CLOSED".to_string();
        let db = database(vec![status]);
        let field = java_field(&db).qualified("PersonBaseRecord");

        assert_eq!(field.java_type, "PersonBaseRecord.Status");
        assert_eq!(field.db_value(), "status.ordinal()");
        assert_eq!(
            field.from_cursor("C_STATUS"),
            "org.dbtools.android.domain.util.EnumUtil.ordinalToEnum(PersonBaseRecord.Status.class, \
             cursor.getInt(cursor.getColumnIndexOrThrow(C_STATUS)), PersonBaseRecord.Status.OPEN)"
        );
    }

    #[test]
    fn mutable_dates_are_cloned_by_accessors() {
        let mut created = SchemaField::new("CREATED", FieldType::Timestamp);
        created.not_null = true;
        let db = database(vec![created]);
        let field = java_field(&db);

        assert_eq!(field.model.date_type, DateType::JavaDate);
        assert_eq!(field.default_value, "new java.util.Date()");
        let variable = field.variable(true);
        assert!(variable.clone_on_access);
        assert_eq!(variable.nullability, Some(Nullability::Nonnull));
        assert_eq!(
            field.from_cursor("C_CREATED"),
            "new java.util.Date(cursor.getLong(cursor.getColumnIndexOrThrow(C_CREATED)))"
        );
    }

    #[test]
    fn unsupported_types_emit_sentinel() {
        let db = database(vec![SchemaField::new("PAYLOAD", FieldType::JavaObject)]);
        let field = java_field(&db);

        assert_eq!(field.java_type, "Object");
        assert_eq!(field.bind(1), "[[UNHANDLED FIELD TYPE: JAVA_OBJECT]]\n");
        assert_eq!(field.db_value(), "[[UNHANDLED FIELD TYPE: JAVA_OBJECT]]");
    }
}
