//! Symbols referenced by a linkage error: classes, fields and methods

use std::fmt;

use crate::error::ValidationError;

/// Replace `<` and `>` with their entity references
///
/// Ampersands and quotes are left untouched, so values that contain them
/// are written through as-is.
pub fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// A class, field or method reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Class { name: String },
    Field { class_name: String, name: String },
    Method { class_name: String, name: String },
}

impl Symbol {
    /// Create a class symbol; the name must be non-empty
    pub fn class(name: Option<String>) -> Result<Self, ValidationError> {
        let name = require("Class", "name", name)?;
        if name.is_empty() {
            return Err(ValidationError::EmptyField {
                record: "Class",
                field: "name",
            });
        }
        Ok(Symbol::Class { name })
    }

    /// Create a field symbol
    pub fn field(
        class_name: Option<String>,
        name: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Symbol::Field {
            class_name: require("Field", "className", class_name)?,
            name: require("Field", "name", name)?,
        })
    }

    /// Create a method symbol
    pub fn method(
        class_name: Option<String>,
        name: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Symbol::Method {
            class_name: require("Method", "className", class_name)?,
            name: require("Method", "name", name)?,
        })
    }

    /// Symbol name (simple name for members, fully qualified for classes)
    pub fn name(&self) -> &str {
        match self {
            Symbol::Class { name }
            | Symbol::Field { name, .. }
            | Symbol::Method { name, .. } => name,
        }
    }
}

fn require(
    record: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField { record, field })
}

/// Canonical single-line element, e.g. `<Class name="com.x.Foo"/>`
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Class { name } => write!(f, "<Class name=\"{}\"/>", name),
            Symbol::Field { class_name, name } => {
                write!(f, "<Field className=\"{}\" name=\"{}\"/>", class_name, name)
            }
            Symbol::Method { class_name, name } => write!(
                f,
                "<Method className=\"{}\" name=\"{}\"/>",
                class_name,
                escape_markup(name)
            ),
        }
    }
}
