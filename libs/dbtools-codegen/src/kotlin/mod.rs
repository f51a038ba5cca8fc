//! Kotlin source model
//!
//! A small object model of a Kotlin source file: a [`KotlinClass`] owns its
//! members ([`KotlinVal`]), functions ([`KotlinFun`]) and nested enums
//! ([`KotlinEnum`]). Rendering is deterministic: the same model always
//! produces the same text, with sections emitted in a fixed order.

mod class;
mod enums;
pub mod format;
mod function;
mod member;

pub use class::{ClassKind, KotlinClass};
pub use enums::KotlinEnum;
pub use function::{FunKind, KotlinFun};
pub(crate) use member::capitalize;
pub use member::{KotlinVal, MemberKind};

/// Layout options shared by every render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStyle {
    /// One level of indentation.
    pub indent: String,
}

impl SourceStyle {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub(crate) fn pad(&self, depth: usize) -> String {
        self.indent.repeat(depth)
    }

    /// Indent every line of `text` by `depth` levels.
    ///
    /// Leading tab characters in a line are nesting markers and are expanded
    /// into additional levels. Empty lines stay empty.
    pub(crate) fn indent_block(&self, text: &str, depth: usize) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let trimmed = line.trim_start_matches('\t');
            if trimmed.trim().is_empty() {
                out.push('\n');
                continue;
            }
            let nesting = line.len() - trimmed.len();
            out.push_str(&self.pad(depth + nesting));
            out.push_str(trimmed);
            out.push('\n');
        }
        out
    }
}

impl Default for SourceStyle {
    fn default() -> Self {
        Self::new("    ")
    }
}

/// Visibility modifier. Kotlin declarations are public unless stated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl Access {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Access::Public => "",
            Access::Protected => "protected ",
            Access::Internal => "internal ",
            Access::Private => "private ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_block_expands_tab_markers() {
        let style = SourceStyle::new("  ");
        let text = "if (x) {\n\ty()\n}\n\nz()";
        assert_eq!(
            style.indent_block(text, 1),
            "  if (x) {\n    y()\n  }\n\n  z()\n"
        );
    }
}
