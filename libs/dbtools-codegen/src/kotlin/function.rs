use crate::error::{CodegenError, Result};
use crate::kotlin::format::normalize_annotation;
use crate::kotlin::{Access, KotlinVal, SourceStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FunKind {
    #[default]
    Standard,
    Constructor,
}

/// A function or secondary constructor.
///
/// The body is opaque text. Each line is indented one level below the
/// declaration; leading tabs add further levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KotlinFun {
    pub name: String,
    pub kind: FunKind,
    pub parameters: Vec<KotlinVal>,
    /// Empty means `Unit`.
    pub return_type: String,
    pub content: String,
    pub access: Access,
    pub is_abstract: bool,
    pub is_open: bool,
    pub is_override: bool,
    pub is_inline: bool,
    /// `super(...)` / `this(...)` call of a constructor.
    pub constructor_delegate: String,
    annotations: Vec<String>,
    exceptions: Vec<String>,
}

impl KotlinFun {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            ..Default::default()
        }
    }

    pub fn constructor() -> Self {
        Self {
            kind: FunKind::Constructor,
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, name: &str, data_type: &str) -> Self {
        self.parameters.push(KotlinVal::parameter(name, data_type));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_delegate(mut self, delegate: impl Into<String>) -> Self {
        self.constructor_delegate = delegate.into();
        self
    }

    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }

    pub fn abstract_fun(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn add_parameter(&mut self, mut parameter: KotlinVal) {
        parameter.kind = crate::kotlin::MemberKind::Parameter;
        self.parameters.push(parameter);
    }

    pub fn add_annotation(&mut self, annotation: &str) -> Result<()> {
        self.annotations.push(normalize_annotation(annotation)?);
        Ok(())
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

    pub fn is_constructor(&self) -> bool {
        self.kind == FunKind::Constructor
    }

    /// Render at `depth`. `signature_only` (interfaces) and abstract
    /// functions end with `;` instead of a body.
    pub fn render(&self, style: &SourceStyle, depth: usize, signature_only: bool) -> String {
        let pad = style.pad(depth);
        let mut out = String::new();

        for annotation in &self.annotations {
            out.push_str(&pad);
            out.push_str(annotation);
            out.push('\n');
        }
        if !self.exceptions.is_empty() {
            let classes: Vec<String> = self
                .exceptions
                .iter()
                .map(|e| format!("{e}::class"))
                .collect();
            out.push_str(&format!("{pad}@Throws({})\n", classes.join(", ")));
        }

        out.push_str(&pad);
        out.push_str(self.access.keyword());
        if self.is_open {
            out.push_str("open ");
        }
        if self.is_override {
            out.push_str("override ");
        }
        if self.is_abstract {
            out.push_str("abstract ");
        }
        if self.is_inline {
            out.push_str("inline ");
        }

        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|p| p.render(style, 0))
            .collect();
        match self.kind {
            FunKind::Constructor => {
                out.push_str(&format!("constructor({})", parameters.join(", ")));
                if !self.constructor_delegate.is_empty() {
                    out.push_str(" : ");
                    out.push_str(&self.constructor_delegate);
                }
            }
            FunKind::Standard => {
                out.push_str(&format!("fun {}({})", self.name, parameters.join(", ")));
                if !self.return_type.trim().is_empty() {
                    out.push_str(": ");
                    out.push_str(self.return_type.trim());
                }
            }
        }

        if signature_only || self.is_abstract {
            out.push_str(";\n");
            return out;
        }

        if self.is_constructor() && self.content.trim().is_empty() {
            out.push('\n');
            return out;
        }

        out.push_str(" {\n");
        out.push_str(&style.indent_block(&self.content, depth + 1));
        out.push_str(&pad);
        out.push_str("}\n");
        out
    }
}
