//! Filter records: one suppressed linkage error between a source and a target symbol

use std::fmt;

use crate::error::ValidationError;
use crate::symbol::{escape_markup, Symbol};

/// The referencing end of a linkage error
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source(pub Symbol);

/// The referenced end of a linkage error
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(pub Symbol);

impl Source {
    pub fn symbol(&self) -> &Symbol {
        &self.0
    }
}

impl Target {
    pub fn symbol(&self) -> &Symbol {
        &self.0
    }
}

fn write_endpoint(f: &mut fmt::Formatter<'_>, tag: &str, symbol: &Symbol) -> fmt::Result {
    writeln!(f, "    <{}>", tag)?;
    writeln!(f, "      {}", symbol)?;
    writeln!(f, "    </{}>", tag)
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_endpoint(f, "Source", &self.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_endpoint(f, "Target", &self.0)
    }
}

/// A complete (source, target, reason) triple
///
/// Equality and hashing cover all three fields, which makes the record its
/// own deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterRecord {
    source: Source,
    target: Target,
    reason: String,
}

impl FilterRecord {
    /// Assemble a record from the parts collected so far
    pub fn new(
        source: Option<Source>,
        target: Option<Target>,
        reason: Option<String>,
    ) -> Result<Self, ValidationError> {
        let missing = |field| ValidationError::MissingField {
            record: "LinkageError",
            field,
        };
        Ok(Self {
            source: source.ok_or_else(|| missing("Source"))?,
            target: target.ok_or_else(|| missing("Target"))?,
            reason: reason.ok_or_else(|| missing("Reason"))?,
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Indented `<LinkageError>` block, terminated by a newline
impl fmt::Display for FilterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  <LinkageError>")?;
        write!(f, "{}{}", self.source, self.target)?;
        writeln!(f, "    <Reason>{}</Reason>", escape_markup(&self.reason))?;
        writeln!(f, "  </LinkageError>")
    }
}
