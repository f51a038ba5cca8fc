//! Literal and identifier formatting for generated Kotlin.

use phf::phf_map;

use crate::error::{CodegenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefaultRule {
    Text,
    Integral,
    Float,
    Double,
    Boolean,
    Char,
    Date,
    BigInteger,
    BigDecimal,
    ByteArray,
}

/// Declared Kotlin type (without `?`) -> default value rule.
static DEFAULT_VALUE_RULES: phf::Map<&'static str, DefaultRule> = phf_map! {
    "String" => DefaultRule::Text,
    "Int" => DefaultRule::Integral,
    "Long" => DefaultRule::Integral,
    "Short" => DefaultRule::Integral,
    "Byte" => DefaultRule::Integral,
    "Float" => DefaultRule::Float,
    "Double" => DefaultRule::Double,
    "Boolean" => DefaultRule::Boolean,
    "Char" => DefaultRule::Char,
    "Date" => DefaultRule::Date,
    "java.util.Date" => DefaultRule::Date,
    "BigInteger" => DefaultRule::BigInteger,
    "java.math.BigInteger" => DefaultRule::BigInteger,
    "BigDecimal" => DefaultRule::BigDecimal,
    "java.math.BigDecimal" => DefaultRule::BigDecimal,
    "ByteArray" => DefaultRule::ByteArray,
};

/// Render a schema default value as a Kotlin literal of `data_type`.
///
/// An empty value or `NULL` (any case) means no default. Formatting a value
/// that is already a canonical literal returns it unchanged.
pub fn format_default_value(data_type: &str, default_value: &str) -> String {
    let value = default_value.trim();
    let value = if value.eq_ignore_ascii_case("null") {
        ""
    } else {
        value
    };
    let rule = DEFAULT_VALUE_RULES.get(data_type.trim().trim_end_matches('?'));

    match rule {
        Some(DefaultRule::Text) => {
            if is_quoted(value, '"') {
                value.to_string()
            } else {
                quote(value)
            }
        }
        Some(DefaultRule::Integral) => or_else(value, "0"),
        Some(DefaultRule::Float) => {
            if value.is_empty() {
                "0.0f".to_string()
            } else if value.ends_with('f') || value.ends_with('F') {
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
                "java.util.Date()".to_string()
            } else {
                or_else(value, "null")
            }
        }
        Some(DefaultRule::BigInteger) => big_number("java.math.BigInteger", value),
        Some(DefaultRule::BigDecimal) => big_number("java.math.BigDecimal", value),
        Some(DefaultRule::ByteArray) => or_else(value, "ByteArray(0)"),
        None => or_else(value, "null"),
    }
}

/// `firstName` -> `FIRST_NAME`
pub fn format_constant(name: &str) -> String {
    dbtools_schema::naming::constant_name(name)
}

/// Validate annotation text and make sure it starts with `@`.
pub fn normalize_annotation(annotation: &str) -> Result<String> {
    let annotation = annotation.trim();
    if annotation.is_empty() || annotation == "@" {
        return Err(CodegenError::InvalidArgument(
            "annotation cannot be empty".to_string(),
        ));
    }
    if annotation.starts_with('@') {
        Ok(annotation.to_string())
    } else {
        Ok(format!("@{annotation}"))
    }
}

fn big_number(class: &str, value: &str) -> String {
    let short_name = class.rsplit('.').next().unwrap_or(class);
    if value.starts_with(class) || value.starts_with(&format!("{short_name}(")) {
        value.to_string()
    } else {
        let digits = if value.is_empty() { "0" } else { value };
        format!("{class}(\"{digits}\")")
    }
}

/// `value` as a character literal, unless it already is one.
pub(crate) fn char_literal(value: &str) -> String {
    if is_quoted(value, '\'') {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

pub(crate) fn or_else(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// True when `value` is wrapped in `quote` and every inner `quote` is escaped.
pub(crate) fn is_quoted(value: &str, quote: char) -> bool {
    let Some(inner) = value
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
    else {
        return false;
    };

    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return false;
        }
    }
    !escaped
}

/// Kotlin string literal of `value`.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_quoted() {
        assert_eq!(format_default_value("String", ""), "\"\"");
        assert_eq!(format_default_value("String", "Bob"), "\"Bob\"");
        assert_eq!(format_default_value("String?", "NULL"), "\"\"");
        assert_eq!(format_default_value("String", "a\"b$"), "\"a\\\"b\\$\"");
    }

    #[test]
    fn booleans_accept_numeric_flags() {
        assert_eq!(format_default_value("Boolean", "1"), "true");
        assert_eq!(format_default_value("Boolean", "0"), "false");
        assert_eq!(format_default_value("Boolean", "TRUE"), "true");
        assert_eq!(format_default_value("Boolean?", ""), "false");
    }

    #[test]
    fn numbers_get_kotlin_suffixes() {
        assert_eq!(format_default_value("Int", ""), "0");
        assert_eq!(format_default_value("Long", "42"), "42");
        assert_eq!(format_default_value("Float", ""), "0.0f");
        assert_eq!(format_default_value("Float", "1.5"), "1.5f");
        assert_eq!(format_default_value("Double", "2"), "2.0");
        assert_eq!(format_default_value("Double", "1d"), "1d");
        assert_eq!(format_default_value("Double", "1f"), "1f");
    }

    #[test]
    fn inner_quotes_must_be_escaped() {
        assert!(is_quoted("\"a\\\"b\"", '"'));
        assert!(!is_quoted("\"a\"b\"", '"'));
        assert!(!is_quoted("\"a\\\"", '"'));
        assert!(!is_quoted("\"", '"'));
        assert_eq!(format_default_value("String", "\"a\"b\""), "\"\\\"a\\\"b\\\"\"");
        assert_eq!(format_default_value("Char", "'"), "'\\''");
    }

    #[test]
    fn special_types() {
        assert_eq!(format_default_value("Char", ""), "'\\u0000'");
        assert_eq!(format_default_value("Char", "x"), "'x'");
        assert_eq!(
            format_default_value("java.util.Date", "now"),
            "java.util.Date()"
        );
        assert_eq!(
            format_default_value("java.math.BigDecimal", "1.25"),
            "java.math.BigDecimal(\"1.25\")"
        );
        assert_eq!(
            format_default_value("java.math.BigInteger", ""),
            "java.math.BigInteger(\"0\")"
        );
        assert_eq!(
            format_default_value("java.math.BigDecimal", "BigDecimal(\"1\")"),
            "BigDecimal(\"1\")"
        );
        assert_eq!(format_default_value("Custom", ""), "null");
        assert_eq!(format_default_value("Custom", "Custom.A"), "Custom.A");
    }

    #[test]
    fn annotations_gain_sigil() {
        assert_eq!(normalize_annotation("Inject").unwrap(), "@Inject");
        assert_eq!(normalize_annotation("@Inject").unwrap(), "@Inject");
        assert!(normalize_annotation("  ").is_err());
    }
}
