use crate::error::Result;
use crate::java::format::format_default_value;
use crate::java::{is_primitive, Access, JavaMethod, Nullability, SourceStyle};
use crate::kotlin::capitalize;
use crate::kotlin::format::normalize_annotation;

/// A field, constant or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaVariable {
    pub name: String,
    pub data_type: String,
    pub default_value: String,
    pub access: Access,
    pub is_static: bool,
    pub is_final: bool,
    pub nullability: Option<Nullability>,
    pub generate_getter: bool,
    pub generate_setter: bool,
    /// Accessors hand out copies of mutable values.
    pub clone_on_access: bool,
    annotations: Vec<String>,
}

impl JavaVariable {
    /// Private field without accessors.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            default_value: String::new(),
            access: Access::Private,
            is_static: false,
            is_final: false,
            nullability: None,
            generate_getter: false,
            generate_setter: false,
            clone_on_access: false,
            annotations: Vec::new(),
        }
    }

    /// `public static final TYPE NAME = value;`
    pub fn constant(name: &str, data_type: &str, value: impl Into<String>) -> Self {
        Self {
            access: Access::Public,
            is_static: true,
            is_final: true,
            default_value: value.into(),
            ..Self::new(name, data_type)
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

    pub fn with_accessors(mut self) -> Self {
        self.generate_getter = true;
        self.generate_setter = true;
        self
    }

    /// Nullability annotation, ignored for primitives.
    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        if !is_primitive(&self.data_type) {
            self.nullability = Some(nullability);
        }
        self
    }

    pub fn add_annotation(&mut self, annotation: &str) -> Result<()> {
        self.annotations.push(normalize_annotation(annotation)?);
        Ok(())
    }

    /// `isActive` for booleans, `getName` otherwise.
    pub fn getter_name(&self) -> String {
        let prefix = if matches!(self.data_type.trim(), "boolean" | "Boolean") {
            "is"
        } else {
            "get"
        };
        format!("{prefix}{}", capitalize(&self.name))
    }

    pub fn setter_name(&self) -> String {
        format!("set{}", capitalize(&self.name))
    }

    pub fn render(&self, style: &SourceStyle, depth: usize) -> String {
        let pad = style.pad(depth);
        let mut out = String::new();
        for annotation in self.all_annotations() {
            out.push_str(&pad);
            out.push_str(&annotation);
            out.push('\n');
        }

        let mut line = String::from(self.access.keyword());
        if self.is_static {
            line.push_str("static ");
        }
        if self.is_final {
            line.push_str("final ");
        }
        line.push_str(&format!("{} {}", self.data_type.trim(), self.name));
        if !self.default_value.trim().is_empty() {
            line.push_str(" = ");
            line.push_str(&self.default_value);
        }
        line.push(';');
        out.push_str(&style.indent_block(&line, depth));
        out
    }

    /// `@Nonnull String name`
    pub fn render_parameter(&self) -> String {
        let mut out = String::new();
        for annotation in self.all_annotations() {
            out.push_str(&annotation);
            out.push(' ');
        }
        out.push_str(&format!("{} {}", self.data_type.trim(), self.name));
        out
    }

    fn all_annotations(&self) -> Vec<String> {
        let mut annotations = self.annotations.clone();
        if let Some(nullability) = self.nullability {
            annotations.push(nullability.annotation().to_string());
        }
        annotations
    }

    /// Generated getter and setter, in that order.
    pub(crate) fn accessors(&self) -> Vec<JavaMethod> {
        let mut methods = Vec::new();
        let data_type = self.data_type.trim();
        let name = &self.name;

        if self.generate_getter {
            let content = if self.clone_on_access {
                format!(
                    "if ({name} != null) {{\n\treturn ({data_type}) {name}.clone();\n}} else {{\n\treturn null;\n}}"
                )
            } else {
                format!("return {name};")
            };
            let mut getter = JavaMethod::new(self.getter_name(), data_type).with_content(content);
            getter.nullability = self.nullability;
            getter.is_static = self.is_static;
            methods.push(getter);
        }

        if self.generate_setter && !self.is_final {
            let target = if self.is_static {
                name.clone()
            } else {
                format!("this.{name}")
            };
            let content = if self.clone_on_access {
                format!(
                    "if ({name} != null) {{\n\t{target} = ({data_type}) {name}.clone();\n}} else {{\n\t{target} = null;\n}}"
                )
            } else {
                format!("{target} = {name};")
            };
            let mut parameter = JavaVariable::new(name.clone(), data_type);
            parameter.nullability = self.nullability;
            let mut setter = JavaMethod::new(self.setter_name(), "void").with_content(content);
            setter.parameters.push(parameter);
            setter.is_static = self.is_static;
            methods.push(setter);
        }
        methods
    }
}
