//! How date and time columns are represented in generated records.

use std::fmt;
use std::str::FromStr;

use dbtools_schema::{FieldType, SchemaField};
use serde::{Deserialize, Serialize};

use crate::error::CodegenError;

const DATE_FORMATTER: &str = "org.dbtools.android.domain.date.DBToolsDateFormatter";
const JODA_FORMATTER: &str = "org.dbtools.android.domain.date.DBToolsJodaFormatter";
const THREETEN_FORMATTER: &str = "org.dbtools.android.domain.date.DBToolsThreeTenFormatter";

/// Date library used by generated code.
///
/// `TIMESTAMP` columns are stored as epoch milliseconds, the other date
/// columns as text. `TIME` columns are only supported with [`DateType::Jsr310`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateType {
    /// `java.util.Date`
    #[default]
    JavaDate,
    /// `org.joda.time.DateTime`
    Joda,
    /// `org.threeten.bp` local date/time types.
    #[serde(rename = "JSR_310")]
    Jsr310,
}

impl DateType {
    /// Joda and JSR-310 values are immutable and can be shared on copy.
    pub fn is_mutable(self) -> bool {
        self == DateType::JavaDate
    }

    pub fn supports(self, field: &SchemaField) -> bool {
        field.jdbc_data_type != FieldType::Time || self == DateType::Jsr310
    }

    pub fn kotlin_type(self, field: &SchemaField) -> &'static str {
        match self {
            DateType::JavaDate => "java.util.Date",
            DateType::Joda => "org.joda.time.DateTime",
            DateType::Jsr310 => match field.jdbc_data_type {
                FieldType::Date => "org.threeten.bp.LocalDate",
                FieldType::Time => "org.threeten.bp.LocalTime",
                _ => "org.threeten.bp.LocalDateTime",
            },
        }
    }

    /// Value assigned to a not-null date property of a new record.
    pub fn default_value(self, field: &SchemaField) -> String {
        match self {
            DateType::JavaDate => "java.util.Date()".to_string(),
            _ => format!("{}.now()", self.kotlin_type(field)),
        }
    }

    /// Database representation of `variable`. The expression is nullable.
    pub fn to_db_value(self, field: &SchemaField, variable: &str) -> Option<String> {
        if !self.supports(field) {
            return None;
        }
        let stored_as_long = field.jdbc_data_type == FieldType::Timestamp;
        let function = match (self, field.jdbc_data_type) {
            (DateType::JavaDate, _) if stored_as_long => "dateToLong",
            (DateType::JavaDate, _) => "dateToDBString",
            (DateType::Joda, _) if stored_as_long => "dateTimeToLong",
            (DateType::Joda, _) => "dateTimeToDBString",
            (DateType::Jsr310, FieldType::Date) => "localDateToDBString",
            (DateType::Jsr310, FieldType::Time) => "localTimeToDBString",
            (DateType::Jsr310, _) if stored_as_long => "localDateTimeToLong",
            (DateType::Jsr310, _) => "localDateTimeToDBString",
        };
        Some(format!("{}.{function}({variable})", self.formatter()))
    }

    /// Read the column named by the constant `column` from content values.
    pub fn from_values(self, field: &SchemaField, column: &str) -> Option<String> {
        self.from_source(field, &format!("values.getAsLong({column})"), &format!("values.getAsString({column})"))
    }

    /// Read the column named by the constant `column` from a cursor.
    pub fn from_cursor(self, field: &SchemaField, column: &str) -> Option<String> {
        let index = format!("cursor.getColumnIndexOrThrow({column})");
        let text = format!("cursor.getString({index})");
        let read = if field.jdbc_data_type == FieldType::Timestamp {
            let long = format!("cursor.getLong({index})");
            let value = self.from_long(&long);
            if field.not_null {
                return Some(value);
            }
            format!("if (!cursor.isNull({index})) {value} else null")
        } else {
            self.from_source(field, "", &text)?
        };
        Some(read)
    }

    /// Expression copying `variable` into a new record.
    pub fn copy(self, variable: &str, not_null: bool) -> String {
        if !self.is_mutable() {
            return variable.to_string();
        }
        if not_null {
            format!("java.util.Date({variable}.time)")
        } else {
            format!("{variable}?.let {{ java.util.Date(it.time) }}")
        }
    }

    fn from_source(self, field: &SchemaField, long: &str, text: &str) -> Option<String> {
        if field.jdbc_data_type == FieldType::Timestamp {
            let value = self.from_long(long);
            if field.not_null {
                return Some(value);
            }
            return Some(format!("if ({long} != null) {value} else null"));
        }
        let value = self.parse_text(field, text)?;
        if field.not_null {
            Some(format!("{value}!!"))
        } else {
            Some(value)
        }
    }

    /// Formatter call parsing the stored text of a non-timestamp column.
    fn parse_text(self, field: &SchemaField, text: &str) -> Option<String> {
        if !self.supports(field) {
            return None;
        }
        let function = match (self, field.jdbc_data_type) {
            (DateType::JavaDate, _) => "dbStringToDate",
            (DateType::Joda, _) => "dbStringToDateTime",
            (DateType::Jsr310, FieldType::Date) => "dbStringToLocalDate",
            (DateType::Jsr310, FieldType::Time) => "dbStringToLocalTime",
            (DateType::Jsr310, _) => "dbStringToLocalDateTime",
        };
        Some(format!("{}.{function}({text})", self.formatter()))
    }

    fn from_long(self, long: &str) -> String {
        match self {
            DateType::JavaDate => format!("java.util.Date({long}!!)"),
            DateType::Joda => format!("{JODA_FORMATTER}.longToDateTime({long})!!"),
            DateType::Jsr310 => format!("{THREETEN_FORMATTER}.longToLocalDateTime({long})!!"),
        }
    }

    /// Java expression for a not-null date field of a new record.
    pub fn java_default_value(self, field: &SchemaField) -> String {
        match self {
            DateType::JavaDate => "new java.util.Date()".to_string(),
            _ => format!("{}.now()", self.kotlin_type(field)),
        }
    }

    /// Java read of the column constant `column` from content values.
    pub fn java_from_values(self, field: &SchemaField, column: &str) -> Option<String> {
        if field.jdbc_data_type == FieldType::Timestamp {
            let long = format!("values.getAsLong({column})");
            let value = self.java_from_long(&long);
            if field.not_null {
                return Some(value);
            }
            return Some(format!("{long} != null ? {value} : null"));
        }
        self.parse_text(field, &format!("values.getAsString({column})"))
    }

    /// Java read of the column constant `column` from a cursor.
    pub fn java_from_cursor(self, field: &SchemaField, column: &str) -> Option<String> {
        let index = format!("cursor.getColumnIndexOrThrow({column})");
        if field.jdbc_data_type == FieldType::Timestamp {
            let value = self.java_from_long(&format!("cursor.getLong({index})"));
            if field.not_null {
                return Some(value);
            }
            return Some(format!("!cursor.isNull({index}) ? {value} : null"));
        }
        self.parse_text(field, &format!("cursor.getString({index})"))
    }

    fn java_from_long(self, long: &str) -> String {
        match self {
            DateType::JavaDate => format!("new java.util.Date({long})"),
            DateType::Joda => format!("{JODA_FORMATTER}.longToDateTime({long})"),
            DateType::Jsr310 => format!("{THREETEN_FORMATTER}.longToLocalDateTime({long})"),
        }
    }

    fn formatter(self) -> &'static str {
        match self {
            DateType::JavaDate => DATE_FORMATTER,
            DateType::Joda => JODA_FORMATTER,
            DateType::Jsr310 => THREETEN_FORMATTER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateType::JavaDate => "JAVA_DATE",
            DateType::Joda => "JODA",
            DateType::Jsr310 => "JSR_310",
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "JAVA_DATE" => Ok(DateType::JavaDate),
            "JODA" => Ok(DateType::Joda),
            "JSR_310" | "JSR310" => Ok(DateType::Jsr310),
            _ => Err(CodegenError::UnknownDateType(s.to_string())),
        }
    }
}
