use crate::error::{CodegenError, Result};
use crate::kotlin::{Access, SourceStyle};

/// Enum declared inside another class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinEnum {
    pub name: String,
    pub access: Access,
    values: Vec<String>,
}

impl KotlinEnum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Result<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(CodegenError::InvalidArgument(format!(
                "enum {name} must declare at least one value"
            )));
        }
        Ok(Self {
            name,
            access: Access::Public,
            values,
        })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn render(&self, style: &SourceStyle, depth: usize) -> String {
        let pad = style.pad(depth);
        format!(
            "{pad}{}enum class {} {{\n{}{}\n{pad}}}\n",
            self.access.keyword(),
            self.name,
            style.pad(depth + 1),
            self.values.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_values() {
        assert!(KotlinEnum::new("Status", Vec::new()).is_err());
    }

    #[test]
    fn renders_nested_enum() {
        let e = KotlinEnum::new("Status", vec!["OPEN".into(), "CLOSED".into()]).unwrap();
        assert_eq!(
            e.render(&SourceStyle::default(), 1),
            "    enum class Status {\n        OPEN, CLOSED\n    }\n"
        );
    }
}
