use crate::error::Result;
use crate::kotlin::format::{format_default_value, normalize_annotation};
use crate::kotlin::{Access, SourceStyle};

/// Where a member is declared, which decides how it renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemberKind {
    /// `val`/`var` property of a class or object.
    #[default]
    Declaration,
    /// Function or constructor parameter: no keyword, no access.
    Parameter,
}

/// A property, constant or parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KotlinVal {
    pub name: String,
    /// Empty means the type is inferred.
    pub data_type: String,
    pub default_value: String,
    pub kind: MemberKind,
    pub access: Access,
    pub mutable: bool,
    pub is_open: bool,
    pub is_override: bool,
    pub is_inline: bool,
    pub is_lateinit: bool,
    pub is_const: bool,
    /// Renders `private set` below the declaration.
    pub private_setter: bool,
    annotations: Vec<String>,
}

impl KotlinVal {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    pub fn var(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            mutable: true,
            ..Self::new(name, data_type)
        }
    }

    pub fn parameter(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Parameter,
            ..Self::new(name, data_type)
        }
    }

    /// `const val NAME = value`
    pub fn constant(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            is_const: true,
            default_value: value.into(),
            ..Self::new(name, "")
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the default value after formatting it for the declared type.
    pub fn with_formatted_default(mut self, value: &str) -> Self {
        self.default_value = format_default_value(&self.data_type, value);
        self
    }

    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }

    pub fn add_annotation(&mut self, annotation: &str) -> Result<()> {
        self.annotations.push(normalize_annotation(annotation)?);
        Ok(())
    }

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    /// `isActive` for booleans, `getName` otherwise.
    pub fn getter_name(&self) -> String {
        let prefix = if self.data_type.trim_end_matches('?') == "Boolean" {
            "is"
        } else {
            "get"
        };
        format!("{prefix}{}", capitalize(&self.name))
    }

    pub fn render(&self, style: &SourceStyle, depth: usize) -> String {
        match self.kind {
            MemberKind::Declaration => self.render_declaration(style, depth),
            MemberKind::Parameter => self.render_parameter(),
        }
    }

    fn render_declaration(&self, style: &SourceStyle, depth: usize) -> String {
        let pad = style.pad(depth);
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(&pad);
            out.push_str(annotation);
            out.push('\n');
        }

        out.push_str(&pad);
        out.push_str(self.access.keyword());
        if self.is_open {
            out.push_str("open ");
        }
        if self.is_override {
            out.push_str("override ");
        }
        if self.is_inline {
            out.push_str("inline ");
        }
        if self.is_lateinit {
            out.push_str("lateinit ");
        }
        if self.is_const {
            out.push_str("const ");
        }
        out.push_str(if self.mutable { "var " } else { "val " });
        out.push_str(&self.signature());
        out.push('\n');

        if self.private_setter {
            out.push_str(&style.pad(depth + 1));
            out.push_str("private set\n");
        }
        out
    }

    fn render_parameter(&self) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(annotation);
            out.push(' ');
        }
        out.push_str(&self.signature());
        out
    }

    fn signature(&self) -> String {
        let mut out = self.name.clone();
        if !self.data_type.trim().is_empty() {
            out.push_str(": ");
            out.push_str(self.data_type.trim());
        }
        if !self.default_value.trim().is_empty() {
            out.push_str(" = ");
            out.push_str(&self.default_value);
        }
        out
    }
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_class_member() {
        let mut member = KotlinVal::var("name", "String").with_formatted_default("Bob");
        member.access = Access::Private;
        member.add_annotation("Transient").unwrap();

        assert_eq!(
            member.render(&SourceStyle::default(), 1),
            "    @Transient\n    private var name: String = \"Bob\"\n"
        );
    }

    #[test]
    fn renders_parameter_inline() {
        let mut param = KotlinVal::parameter("cursor", "Cursor");
        param.add_annotation("@Nonnull").unwrap();
        assert_eq!(
            param.render(&SourceStyle::default(), 3),
            "@Nonnull cursor: Cursor"
        );
    }

    #[test]
    fn constants_omit_type() {
        let constant = KotlinVal::constant("TABLE", "\"person\"");
        assert_eq!(
            constant.render(&SourceStyle::default(), 0),
            "const val TABLE = \"person\"\n"
        );
    }

    #[test]
    fn getter_names() {
        assert_eq!(KotlinVal::var("active", "Boolean?").getter_name(), "isActive");
        assert_eq!(KotlinVal::var("name", "String").getter_name(), "getName");
    }
}
