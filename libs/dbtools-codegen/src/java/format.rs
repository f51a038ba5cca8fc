//! Literal formatting for generated Java.

use phf::phf_map;

use crate::kotlin::format::{char_literal, is_quoted, or_else};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefaultRule {
    Text,
    Integral,
    Long,
    Float,
    Double,
    Boolean,
    Char,
    Date,
    BigInteger,
    BigDecimal,
    ByteArray,
}

/// Declared Java type -> default value rule.
static DEFAULT_VALUE_RULES: phf::Map<&'static str, DefaultRule> = phf_map! {
    "String" => DefaultRule::Text,
    "int" => DefaultRule::Integral,
    "Integer" => DefaultRule::Integral,
    "short" => DefaultRule::Integral,
    "Short" => DefaultRule::Integral,
    "byte" => DefaultRule::Integral,
    "Byte" => DefaultRule::Integral,
    "long" => DefaultRule::Long,
    "Long" => DefaultRule::Long,
    "float" => DefaultRule::Float,
    "Float" => DefaultRule::Float,
    "double" => DefaultRule::Double,
    "Double" => DefaultRule::Double,
    "boolean" => DefaultRule::Boolean,
    "Boolean" => DefaultRule::Boolean,
    "char" => DefaultRule::Char,
    "Character" => DefaultRule::Char,
    "Date" => DefaultRule::Date,
    "java.util.Date" => DefaultRule::Date,
    "BigInteger" => DefaultRule::BigInteger,
    "java.math.BigInteger" => DefaultRule::BigInteger,
    "BigDecimal" => DefaultRule::BigDecimal,
    "java.math.BigDecimal" => DefaultRule::BigDecimal,
    "byte[]" => DefaultRule::ByteArray,
};

/// Render a schema default value as a Java literal of `data_type`.
///
/// An empty value or `NULL` (any case) gives the zero value of the type.
/// Formatting a value that is already a canonical literal returns it unchanged.
pub fn format_default_value(data_type: &str, default_value: &str) -> String {
    let value = default_value.trim();
    let value = if value.eq_ignore_ascii_case("null") {
        ""
    } else {
        value
    };

    match DEFAULT_VALUE_RULES.get(data_type.trim()) {
        Some(DefaultRule::Text) => {
            if is_quoted(value, '"') {
                value.to_string()
            } else {
                quote(value)
            }
        }
        Some(DefaultRule::Integral) => or_else(value, "0"),
        Some(DefaultRule::Long) => {
            if value.is_empty() {
                "0L".to_string()
            } else if value.ends_with(['l', 'L']) {
                value.to_string()
            } else {
                format!("{value}L")
            }
        }
        Some(DefaultRule::Float) => {
            if value.is_empty() {
                "0.0f".to_string()
            } else if value.ends_with(['f', 'F']) {
                value.to_string()
            } else {
                format!("{value}f")
            }
        }
        Some(DefaultRule::Double) => {
            if value.is_empty() {
                "0.0".to_string()
            } else if value.contains(['.', 'e', 'E']) || value.ends_with(['f', 'F', 'd', 'D']) {
                value.to_string()
            } else {
                format!("{value}.0")
            }
        }
        Some(DefaultRule::Boolean) => match value {
            "1" => "true".to_string(),
            "0" | "" => "false".to_string(),
            v if v.eq_ignore_ascii_case("true") => "true".to_string(),
            v if v.eq_ignore_ascii_case("false") => "false".to_string(),
            v => v.to_string(),
        },
        Some(DefaultRule::Char) => {
            if value.is_empty() {
                "'\\u0000'".to_string()
            } else {
                char_literal(value)
            }
        }
        Some(DefaultRule::Date) => {
            if value.eq_ignore_ascii_case("now") {
                "new java.util.Date()".to_string()
            } else {
                or_else(value, "null")
            }
        }
        Some(DefaultRule::BigInteger) => big_number("java.math.BigInteger", value),
        Some(DefaultRule::BigDecimal) => big_number("java.math.BigDecimal", value),
        Some(DefaultRule::ByteArray) => or_else(value, "new byte[0]"),
        None => or_else(value, "null"),
    }
}

fn big_number(class: &str, value: &str) -> String {
    if value.starts_with("new ") {
        value.to_string()
    } else {
        let digits = if value.is_empty() { "0" } else { value };
        format!("new {class}(\"{digits}\")")
    }
}

/// Java string literal of `value`.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
