//! Identifier conversions between SQL names and Kotlin names.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};

/// `INDIVIDUAL_TYPE` -> `IndividualType`
pub fn class_name(sql_name: &str) -> String {
    sql_name.to_upper_camel_case()
}

/// `INDIVIDUAL_TYPE_ID` -> `individualTypeId`, `_id` -> `id`
pub fn variable_name(sql_name: &str) -> String {
    sql_name.to_lower_camel_case()
}

/// `individualTypeId` -> `INDIVIDUAL_TYPE_ID`
pub fn constant_name(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// `HEAD_OF_HOUSE` -> `Head Of House`
pub fn display_value(enum_name: &str) -> String {
    enum_name
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
