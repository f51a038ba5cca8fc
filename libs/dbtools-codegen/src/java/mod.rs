//! Java source model
//!
//! The Java counterpart of [`crate::kotlin`]: a [`JavaClass`] owns its fields
//! ([`JavaVariable`]) and methods ([`JavaMethod`]). Fields may ask for
//! generated getters and setters, which render after the explicit methods.

mod class;
pub mod format;
mod method;
mod variable;

pub use crate::kotlin::SourceStyle;
pub use class::{JavaClass, JavaClassKind};
pub use method::JavaMethod;
pub use variable::JavaVariable;

/// Visibility modifier. `Package` renders no keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

impl Access {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Access::Public => "public ",
            Access::Protected => "protected ",
            Access::Private => "private ",
            Access::Package => "",
        }
    }
}

/// Annotation marking a reference as never null or maybe null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    Nonnull,
    Nullable,
}

impl Nullability {
    pub(crate) fn annotation(self) -> &'static str {
        match self {
            Nullability::Nonnull => "@Nonnull",
            Nullability::Nullable => "@Nullable",
        }
    }
}

/// Primitive types cannot carry nullability annotations.
pub fn is_primitive(data_type: &str) -> bool {
    matches!(
        data_type.trim(),
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double"
    )
}
