//! Column data types as declared by the `jdbcDataType` attribute.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The declared data type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Boolean,
    Bit,
    Tinyint,
    Smallint,
    Integer,
    Bigint,
    Real,
    Float,
    Double,
    Decimal,
    Numeric,
    Char,
    Varchar,
    Longvarchar,
    Clob,
    Date,
    Datetime,
    Time,
    Timestamp,
    Blob,
    #[serde(rename = "BIGDECIMAL")]
    BigDecimal,
    #[serde(rename = "BIGINTEGER")]
    BigInteger,
    JavaObject,
    Money,
    Fraction,
    Unknown,
}

/// SQLite storage class used when rendering DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqliteAffinity {
    Integer,
    Real,
    Text,
    Blob,
}

impl SqliteAffinity {
    pub fn as_str(self) -> &'static str {
        match self {
            SqliteAffinity::Integer => "INTEGER",
            SqliteAffinity::Real => "REAL",
            SqliteAffinity::Text => "TEXT",
            SqliteAffinity::Blob => "BLOB",
        }
    }
}

impl FieldType {
    pub const ALL: [FieldType; 26] = [
        FieldType::Boolean,
        FieldType::Bit,
        FieldType::Tinyint,
        FieldType::Smallint,
        FieldType::Integer,
        FieldType::Bigint,
        FieldType::Real,
        FieldType::Float,
        FieldType::Double,
        FieldType::Decimal,
        FieldType::Numeric,
        FieldType::Char,
        FieldType::Varchar,
        FieldType::Longvarchar,
        FieldType::Clob,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Time,
        FieldType::Timestamp,
        FieldType::Blob,
        FieldType::BigDecimal,
        FieldType::BigInteger,
        FieldType::JavaObject,
        FieldType::Money,
        FieldType::Fraction,
        FieldType::Unknown,
    ];

    /// Name as written in a schema document.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Boolean => "BOOLEAN",
            FieldType::Bit => "BIT",
            FieldType::Tinyint => "TINYINT",
            FieldType::Smallint => "SMALLINT",
            FieldType::Integer => "INTEGER",
            FieldType::Bigint => "BIGINT",
            FieldType::Real => "REAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Decimal => "DECIMAL",
            FieldType::Numeric => "NUMERIC",
            FieldType::Char => "CHAR",
            FieldType::Varchar => "VARCHAR",
            FieldType::Longvarchar => "LONGVARCHAR",
            FieldType::Clob => "CLOB",
            FieldType::Date => "DATE",
            FieldType::Datetime => "DATETIME",
            FieldType::Time => "TIME",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Blob => "BLOB",
            FieldType::BigDecimal => "BIGDECIMAL",
            FieldType::BigInteger => "BIGINTEGER",
            FieldType::JavaObject => "JAVA_OBJECT",
            FieldType::Money => "MONEY",
            FieldType::Fraction => "FRACTION",
            FieldType::Unknown => "UNKNOWN",
        }
    }

    /// Kotlin type text of a not-null column of this type.
    pub fn kotlin_type(self) -> &'static str {
        match self {
            FieldType::Boolean | FieldType::Bit | FieldType::Tinyint => "Boolean",
            FieldType::Smallint | FieldType::Integer => "Int",
            FieldType::Bigint => "Long",
            FieldType::Real | FieldType::Float | FieldType::Decimal | FieldType::Numeric => {
                "Float"
            }
            FieldType::Double => "Double",
            FieldType::Char => "Char",
            FieldType::Varchar | FieldType::Longvarchar | FieldType::Clob => "String",
            FieldType::Date | FieldType::Datetime | FieldType::Timestamp => "java.util.Date",
            FieldType::Time => "java.util.Date",
            FieldType::Blob => "ByteArray",
            FieldType::BigDecimal => "java.math.BigDecimal",
            FieldType::BigInteger => "java.math.BigInteger",
            FieldType::JavaObject | FieldType::Money | FieldType::Fraction | FieldType::Unknown => {
                "Any"
            }
        }
    }

    /// Java type text of a column of this type. Nullable columns use the
    /// boxed class in place of a primitive.
    pub fn java_type(self, nullable: bool) -> &'static str {
        let (primitive, boxed) = match self {
            FieldType::Boolean | FieldType::Bit | FieldType::Tinyint => ("boolean", "Boolean"),
            FieldType::Smallint | FieldType::Integer => ("int", "Integer"),
            FieldType::Bigint => ("long", "Long"),
            FieldType::Real | FieldType::Float | FieldType::Decimal | FieldType::Numeric => {
                ("float", "Float")
            }
            FieldType::Double => ("double", "Double"),
            FieldType::Char => ("char", "Character"),
            FieldType::Varchar | FieldType::Longvarchar | FieldType::Clob => return "String",
            FieldType::Date | FieldType::Datetime | FieldType::Time | FieldType::Timestamp => {
                return "java.util.Date"
            }
            FieldType::Blob => return "byte[]",
            FieldType::BigDecimal => return "java.math.BigDecimal",
            FieldType::BigInteger => return "java.math.BigInteger",
            FieldType::JavaObject | FieldType::Money | FieldType::Fraction | FieldType::Unknown => {
                return "Object"
            }
        };
        if nullable {
            boxed
        } else {
            primitive
        }
    }

    /// Types that map onto a JVM primitive (Boolean, Int, Long, Float, Double, Char).
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            FieldType::Boolean
                | FieldType::Bit
                | FieldType::Tinyint
                | FieldType::Smallint
                | FieldType::Integer
                | FieldType::Bigint
                | FieldType::Real
                | FieldType::Float
                | FieldType::Double
                | FieldType::Decimal
                | FieldType::Numeric
                | FieldType::Char
        )
    }

    pub fn is_number(self) -> bool {
        matches!(
            self,
            FieldType::Tinyint
                | FieldType::Smallint
                | FieldType::Integer
                | FieldType::Bigint
                | FieldType::Real
                | FieldType::Float
                | FieldType::Double
                | FieldType::Decimal
                | FieldType::Numeric
                | FieldType::BigDecimal
                | FieldType::BigInteger
        )
    }

    pub fn is_date(self) -> bool {
        matches!(
            self,
            FieldType::Date | FieldType::Datetime | FieldType::Time | FieldType::Timestamp
        )
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, FieldType::Boolean | FieldType::Bit)
    }

    pub fn sqlite_affinity(self) -> SqliteAffinity {
        match self {
            FieldType::Boolean
            | FieldType::Bit
            | FieldType::Tinyint
            | FieldType::Smallint
            | FieldType::Integer
            | FieldType::Bigint
            | FieldType::BigInteger
            | FieldType::Timestamp => SqliteAffinity::Integer,
            FieldType::Real
            | FieldType::Float
            | FieldType::Double
            | FieldType::Decimal
            | FieldType::Numeric
            | FieldType::BigDecimal
            | FieldType::Money
            | FieldType::Fraction => SqliteAffinity::Real,
            FieldType::Blob | FieldType::JavaObject => SqliteAffinity::Blob,
            _ => SqliteAffinity::Text,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| SchemaError::UnknownFieldType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("varchar".parse::<FieldType>().unwrap(), FieldType::Varchar);
        assert_eq!(
            "BIGDECIMAL".parse::<FieldType>().unwrap(),
            FieldType::BigDecimal
        );
        assert!("VARCHAR2".parse::<FieldType>().is_err());
    }

    #[test]
    fn every_type_round_trips_through_its_name() {
        for t in FieldType::ALL {
            assert_eq!(t.as_str().parse::<FieldType>().unwrap(), t);
        }
    }

    #[test]
    fn nullable_java_types_are_boxed() {
        assert_eq!(FieldType::Integer.java_type(false), "int");
        assert_eq!(FieldType::Integer.java_type(true), "Integer");
        assert_eq!(FieldType::Char.java_type(true), "Character");
        assert_eq!(FieldType::Blob.java_type(true), "byte[]");
        assert_eq!(FieldType::Varchar.java_type(false), "String");
        assert_eq!(FieldType::Money.java_type(true), "Object");
    }

    #[test]
    fn timestamps_are_stored_as_integers() {
        assert_eq!(
            FieldType::Timestamp.sqlite_affinity(),
            SqliteAffinity::Integer
        );
        assert_eq!(FieldType::Date.sqlite_affinity(), SqliteAffinity::Text);
    }
}
