use crate::error::{CodegenError, Result};
use crate::kotlin::format::normalize_annotation;
use crate::kotlin::{Access, KotlinEnum, KotlinFun, KotlinVal, SourceStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    /// Top-level enum class and its literals.
    Enum(Vec<String>),
    Object,
    Data,
}

impl ClassKind {
    fn keyword(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum(_) => "enum class",
            ClassKind::Object => "object",
            ClassKind::Data => "data class",
        }
    }
}

/// One Kotlin source file holding a single top-level class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinClass {
    pub name: String,
    pub package: String,
    pub kind: ClassKind,
    pub access: Access,
    pub is_abstract: bool,
    pub generics: String,
    /// Parameter list of the primary constructor, including parentheses.
    pub primary_constructor: String,
    /// Supertype, including its constructor call if any.
    pub extends: String,
    pub file_header_comment: String,
    pub class_header_comment: String,
    pub static_init: String,
    imports: Vec<String>,
    annotations: Vec<String>,
    implements: Vec<String>,
    enums: Vec<KotlinEnum>,
    members: Vec<KotlinVal>,
    constants: Vec<KotlinVal>,
    static_functions: Vec<KotlinFun>,
    constructors: Vec<KotlinFun>,
    functions: Vec<KotlinFun>,
}

impl KotlinClass {
    pub fn new(name: impl Into<String>, package: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            access: Access::Public,
            is_abstract: false,
            generics: String::new(),
            primary_constructor: String::new(),
            extends: String::new(),
            file_header_comment: String::new(),
            class_header_comment: String::new(),
            static_init: String::new(),
            imports: Vec::new(),
            annotations: Vec::new(),
            implements: Vec::new(),
            enums: Vec::new(),
            members: Vec::new(),
            constants: Vec::new(),
            static_functions: Vec::new(),
            constructors: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Top-level enum class. At least one literal is required.
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
        Ok(Self::new(name, package, ClassKind::Enum(values)))
    }

    pub fn file_name(&self) -> String {
        format!("{}.kt", self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
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

    pub fn add_enum(&mut self, inner: KotlinEnum) {
        self.enums.push(inner);
    }

    pub fn enums(&self) -> &[KotlinEnum] {
        &self.enums
    }

    /// Add a `val` or `var` property depending on [`KotlinVal::mutable`].
    pub fn add_member(&mut self, member: KotlinVal) -> &mut KotlinVal {
        self.members.push(member);
        let last = self.members.len() - 1;
        &mut self.members[last]
    }

    pub fn members(&self) -> &[KotlinVal] {
        &self.members
    }

    /// Constant of the class. Objects declare constants directly; other
    /// kinds place them in the companion object.
    pub fn add_constant(&mut self, constant: KotlinVal) {
        self.constants.push(constant);
    }

    /// `const val NAME = value`
    pub fn add_const(&mut self, name: &str, value: impl Into<String>) {
        self.add_constant(KotlinVal::constant(name, value));
    }

    pub fn constants(&self) -> &[KotlinVal] {
        &self.constants
    }

    pub fn add_static_fun(&mut self, function: KotlinFun) {
        self.static_functions.push(function);
    }

    pub fn append_static_init(&mut self, text: &str) {
        if !self.static_init.is_empty() {
            self.static_init.push('\n');
        }
        self.static_init.push_str(text);
    }

    pub fn add_constructor(&mut self, constructor: KotlinFun) -> Result<()> {
        if self.is_interface() {
            return Err(CodegenError::InvalidState(format!(
                "cannot add a constructor to interface {}",
                self.name
            )));
        }
        let mut constructor = constructor;
        constructor.kind = crate::kotlin::FunKind::Constructor;
        self.constructors.push(constructor);
        Ok(())
    }

    pub fn add_fun(&mut self, function: KotlinFun) -> &mut KotlinFun {
        self.functions.push(function);
        let last = self.functions.len() - 1;
        &mut self.functions[last]
    }

    pub fn functions(&self) -> &[KotlinFun] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&KotlinFun> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn render(&self, style: &SourceStyle) -> String {
        let mut out = String::new();

        if !self.file_header_comment.is_empty() {
            out.push_str(self.file_header_comment.trim_end());
            out.push_str("\n\n");
        }

        if !self.package.is_empty() {
            out.push_str(&format!("package {}\n\n", self.package));
        }

        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str(&format!("import {import}\n"));
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
        out.push_str(&sections.join("\n"));
        out.push_str("}\n");
        out
    }

    fn header_line(&self) -> String {
        let mut line = String::from(self.access.keyword());
        if self.is_abstract && !self.is_interface() {
            line.push_str("abstract ");
        }
        line.push_str(self.kind.keyword());
        line.push(' ');
        line.push_str(&self.name);
        if !self.generics.is_empty() {
            line.push_str(&format!("<{}>", self.generics));
        }
        line.push_str(&self.primary_constructor);

        let mut supertypes: Vec<&str> = Vec::new();
        if !self.extends.is_empty() {
            supertypes.push(&self.extends);
        }
        supertypes.extend(self.implements.iter().map(String::as_str));
        if !supertypes.is_empty() {
            line.push_str(" : ");
            line.push_str(&supertypes.join(", "));
        }
        line
    }

    fn body_sections(&self, style: &SourceStyle) -> Vec<String> {
        let mut sections = Vec::new();

        if let ClassKind::Enum(values) = &self.kind {
            sections.push(format!("{}{};\n", style.pad(1), values.join(", ")));
        }

        for inner in &self.enums {
            sections.push(inner.render(style, 1));
        }

        if self.kind == ClassKind::Object {
            sections.extend(self.static_sections(style, 1));
        } else {
            let statics = self.static_sections(style, 2);
            if !statics.is_empty() {
                let pad = style.pad(1);
                sections.push(format!(
                    "{pad}companion object {{\n{}{pad}}}\n",
                    statics.join("\n")
                ));
            }
        }

        let vals: String = self
            .members
            .iter()
            .filter(|m| !m.mutable)
            .map(|m| m.render(style, 1))
            .collect();
        if !vals.is_empty() {
            sections.push(vals);
        }
        let vars: String = self
            .members
            .iter()
            .filter(|m| m.mutable)
            .map(|m| m.render(style, 1))
            .collect();
        if !vars.is_empty() {
            sections.push(vars);
        }

        if !self.is_interface() {
            for constructor in &self.constructors {
                sections.push(constructor.render(style, 1, false));
            }
        }

        for function in &self.functions {
            sections.push(function.render(style, 1, self.is_interface()));
        }

        sections
    }

    fn static_sections(&self, style: &SourceStyle, depth: usize) -> Vec<String> {
        let mut sections = Vec::new();
        let constants: String = self
            .constants
            .iter()
            .map(|c| c.render(style, depth))
            .collect();
        if !constants.is_empty() {
            sections.push(constants);
        }
        for function in &self.static_functions {
            sections.push(function.render(style, depth, false));
        }
        if !self.static_init.trim().is_empty() {
            let pad = style.pad(depth);
            sections.push(format!(
                "{pad}init {{\n{}{pad}}}\n",
                style.indent_block(&self.static_init, depth + 1)
            ));
        }
        sections
    }
}
