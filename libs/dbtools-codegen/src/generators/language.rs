//! Source language of the generated files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodegenError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    #[default]
    Kotlin,
    Java,
}

impl Language {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Kotlin => "kt",
            Language::Java => "java",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Kotlin => "KOTLIN",
            Language::Java => "JAVA",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kotlin" | "kt" => Ok(Language::Kotlin),
            "java" => Ok(Language::Java),
            _ => Err(CodegenError::UnknownLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("Java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!("kt".parse::<Language>().unwrap(), Language::Kotlin);
        assert!(matches!(
            "scala".parse::<Language>(),
            Err(CodegenError::UnknownLanguage(_))
        ));
        assert_eq!(Language::Java.extension(), "java");
    }
}
