use crate::error::{CodegenError, Result};
use crate::java::{Access, JavaVariable, Nullability, SourceStyle};
use crate::kotlin::format::normalize_annotation;

/// A method or constructor. The body is opaque text indented one level
/// below the signature; leading tabs add further levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaMethod {
    pub name: String,
    /// Empty for constructors.
    pub return_type: String,
    pub parameters: Vec<JavaVariable>,
    pub content: String,
    pub access: Access,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_constructor: bool,
    pub nullability: Option<Nullability>,
    annotations: Vec<String>,
    exceptions: Vec<String>,
}

impl JavaMethod {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            content: String::new(),
            access: Access::Public,
            is_static: false,
            is_abstract: false,
            is_constructor: false,
            nullability: None,
            annotations: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    /// Constructor of `class_name`.
    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            is_constructor: true,
            ..Self::new(class_name, "")
        }
    }

    pub fn with_parameter(mut self, name: &str, data_type: &str) -> Self {
        self.parameters.push(JavaVariable::new(name, data_type));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Adds `@Override`.
    pub fn overriding(mut self) -> Self {
        self.annotations.push("@Override".to_string());
        self
    }

    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn add_parameter(&mut self, parameter: JavaVariable) {
        self.parameters.push(parameter);
    }

    pub fn add_annotation(&mut self, annotation: &str) -> Result<()> {
        self.annotations.push(normalize_annotation(annotation)?);
        Ok(())
    }

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn add_throws(&mut self, exception: &str) -> Result<()> {
        let exception = exception.trim();
        if exception.is_empty() {
            return Err(CodegenError::InvalidArgument(
                "exception name cannot be empty".to_string(),
            ));
        }
        self.exceptions.push(exception.to_string());
        Ok(())
    }

    /// Render at `depth`. `signature_only` (interfaces) and abstract
    /// methods end with `;` instead of a body.
    pub fn render(&self, style: &SourceStyle, depth: usize, signature_only: bool) -> String {
        let pad = style.pad(depth);
        let mut out = String::new();

        for annotation in &self.annotations {
            out.push_str(&pad);
            out.push_str(annotation);
            out.push('\n');
        }
        if let Some(nullability) = self.nullability {
            out.push_str(&pad);
            out.push_str(nullability.annotation());
            out.push('\n');
        }

        out.push_str(&pad);
        if !signature_only {
            out.push_str(self.access.keyword());
        }
        if self.is_static {
            out.push_str("static ");
        }
        if self.is_abstract && !signature_only {
            out.push_str("abstract ");
        }
        if !self.is_constructor {
            out.push_str(self.return_type.trim());
            out.push(' ');
        }

        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(JavaVariable::render_parameter)
            .collect();
        out.push_str(&format!("{}({})", self.name, parameters.join(", ")));
        if !self.exceptions.is_empty() {
            out.push_str(" throws ");
            out.push_str(&self.exceptions.join(", "));
        }

        if signature_only || self.is_abstract {
            out.push_str(";\n");
            return out;
        }

        out.push_str(" {\n");
        out.push_str(&style.indent_block(&self.content, depth + 1));
        out.push_str(&pad);
        out.push_str("}\n");
        out
    }
}
