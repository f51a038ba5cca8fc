use crate::error::{CodegenError, Result};
use crate::java::{Access, JavaMethod, JavaVariable, SourceStyle};
use crate::kotlin::format::normalize_annotation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaClassKind {
    Class,
    Interface,
    /// Top-level enum and its constants.
    Enum(Vec<String>),
}

impl JavaClassKind {
    fn keyword(&self) -> &'static str {
        match self {
            JavaClassKind::Class => "class",
            JavaClassKind::Interface => "interface",
            JavaClassKind::Enum(_) => "enum",
        }
    }
}

/// One Java source file holding a single top-level type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    pub name: String,
    pub package: String,
    pub kind: JavaClassKind,
    pub access: Access,
    pub is_abstract: bool,
    pub is_final: bool,
    pub extends: String,
    pub file_header_comment: String,
    pub class_header_comment: String,
    /// Body of the `static { }` initializer.
    pub static_init: String,
    imports: Vec<String>,
    annotations: Vec<String>,
    implements: Vec<String>,
    /// Nested `public enum Name {A, B}` declarations.
    enums: Vec<(String, Vec<String>)>,
    constants: Vec<JavaVariable>,
    variables: Vec<JavaVariable>,
    constructors: Vec<JavaMethod>,
    methods: Vec<JavaMethod>,
}

impl JavaClass {
    pub fn new(name: impl Into<String>, package: impl Into<String>, kind: JavaClassKind) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            access: Access::Public,
            is_abstract: false,
            is_final: false,
            extends: String::new(),
            file_header_comment: String::new(),
            class_header_comment: String::new(),
            static_init: String::new(),
            imports: Vec::new(),
            annotations: Vec::new(),
            implements: Vec::new(),
            enums: Vec::new(),
            constants: Vec::new(),
            variables: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Top-level enum. At least one constant is required.
    pub fn new_enum(
        name: impl Into<String>,
        package: impl Into<String>,
        values: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(CodegenError::InvalidArgument(format!(
                "enum {name} must declare at least one value"
            )));
        }
        Ok(Self::new(name, package, JavaClassKind::Enum(values)))
    }

    pub fn file_name(&self) -> String {
        format!("{}.java", self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == JavaClassKind::Interface
    }

    /// Imports keep insertion order; repeats are ignored.
    pub fn add_import(&mut self, import: &str) {
        let import = import.trim();
        if !import.is_empty() && !self.imports.iter().any(|i| i == import) {
            self.imports.push(import.to_string());
        }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn add_annotation(&mut self, annotation: &str) -> Result<()> {
        self.annotations.push(normalize_annotation(annotation)?);
        Ok(())
    }

    pub fn add_implements(&mut self, interface: &str) -> Result<()> {
        let interface = interface.trim();
        if interface.is_empty() {
            return Err(CodegenError::InvalidArgument(
                "implemented interface name cannot be empty".to_string(),
            ));
        }
        self.implements.push(interface.to_string());
        Ok(())
    }

    /// Nested enum. Repeated names are ignored.
    pub fn add_enum(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.is_empty() {
            return Err(CodegenError::InvalidArgument(format!(
                "enum {name} must declare at least one value"
            )));
        }
        if !self.enums.iter().any(|(existing, _)| existing == name) {
            self.enums.push((name.to_string(), values));
        }
        Ok(())
    }

    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.iter().map(|(name, _)| name.as_str())
    }

    pub fn add_constant(&mut self, constant: JavaVariable) {
        self.constants.push(constant);
    }

    /// `public static final String NAME = value;`
    pub fn add_string_constant(&mut self, name: &str, value: impl Into<String>) {
        self.add_constant(JavaVariable::constant(name, "String", value));
    }

    pub fn constants(&self) -> &[JavaVariable] {
        &self.constants
    }

    pub fn add_variable(&mut self, variable: JavaVariable) -> &mut JavaVariable {
        self.variables.push(variable);
        let last = self.variables.len() - 1;
        &mut self.variables[last]
    }

    pub fn variables(&self) -> &[JavaVariable] {
        &self.variables
    }

    pub fn append_static_init(&mut self, text: &str) {
        if !self.static_init.is_empty() {
            self.static_init.push('\n');
        }
        self.static_init.push_str(text);
    }

    pub fn add_constructor(&mut self, mut constructor: JavaMethod) -> Result<()> {
        if self.is_interface() {
            return Err(CodegenError::InvalidState(format!(
                "cannot add a constructor to interface {}",
                self.name
            )));
        }
        constructor.is_constructor = true;
        constructor.name = self.name.clone();
        self.constructors.push(constructor);
        Ok(())
    }

    pub fn add_method(&mut self, method: JavaMethod) -> &mut JavaMethod {
        self.methods.push(method);
        let last = self.methods.len() - 1;
        &mut self.methods[last]
    }

    pub fn methods(&self) -> &[JavaMethod] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&JavaMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn render(&self, style: &SourceStyle) -> String {
        let mut out = String::new();

        if !self.file_header_comment.is_empty() {
            out.push_str(self.file_header_comment.trim_end());
            out.push_str("\n\n");
        }

        if !self.package.is_empty() {
            out.push_str(&format!("package {};\n\n", self.package));
        }

        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str(&format!("import {import};\n"));
            }
            out.push('\n');
        }

        if !self.class_header_comment.is_empty() {
            out.push_str(self.class_header_comment.trim_end());
            out.push('\n');
        }

        for annotation in &self.annotations {
            out.push_str(annotation);
            out.push('\n');
        }

        out.push_str(&self.header_line());
        out.push_str(" {\n");

        let sections = self.body_sections(style);
        if !sections.is_empty() {
            out.push('\n');
            out.push_str(&sections.join("\n"));
        }
        out.push_str("}\n");
        out
    }

    fn header_line(&self) -> String {
        let mut line = String::from(self.access.keyword());
        if self.is_abstract && !self.is_interface() {
            line.push_str("abstract ");
        }
        if self.is_final {
            line.push_str("final ");
        }
        line.push_str(self.kind.keyword());
        line.push(' ');
        line.push_str(&self.name);
        if !self.extends.is_empty() {
            line.push_str(" extends ");
            line.push_str(&self.extends);
        }
        if !self.implements.is_empty() {
            line.push_str(if self.is_interface() {
                " extends "
            } else {
                " implements "
            });
            line.push_str(&self.implements.join(", "));
        }
        line
    }

    fn body_sections(&self, style: &SourceStyle) -> Vec<String> {
        let mut sections = Vec::new();
        let interface = self.is_interface();

        if let JavaClassKind::Enum(values) = &self.kind {
            sections.push(format!("{}{};\n", style.pad(1), values.join(", ")));
        }

        for (name, values) in &self.enums {
            let pad = style.pad(1);
            sections.push(format!(
                "{pad}public enum {name} {{\n{}{}\n{pad}}}\n",
                style.pad(2),
                values.join(", ")
            ));
        }

        let constants: String = self.constants.iter().map(|c| c.render(style, 1)).collect();
        if !constants.is_empty() {
            sections.push(constants);
        }

        if !self.static_init.trim().is_empty() {
            let pad = style.pad(1);
            sections.push(format!(
                "{pad}static {{\n{}{pad}}}\n",
                style.indent_block(&self.static_init, 2)
            ));
        }

        let variables: String = self.variables.iter().map(|v| v.render(style, 1)).collect();
        if !variables.is_empty() {
            sections.push(variables);
        }

        if !interface {
            for constructor in &self.constructors {
                sections.push(constructor.render(style, 1, false));
            }
        }

        for method in &self.methods {
            sections.push(method.render(style, 1, interface));
        }

        for accessor in self.variables.iter().flat_map(JavaVariable::accessors) {
            sections.push(accessor.render(style, 1, interface));
        }

        sections
    }
}
