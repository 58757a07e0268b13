//! Error taxonomy for the reduction pipeline
//!
//! Every parsing or validation failure is fatal for the run. Errors raised
//! while consuming the tag stream are wrapped in [`ReduceError::Parse`]
//! together with the input position of the offending event.

use std::path::PathBuf;
use thiserror::Error;

use crate::events::Position;
use crate::tag::Tag;

/// A required field was absent when finalizing a symbol or filter record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{record} is missing its {field}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} has an empty {field}")]
    EmptyField {
        record: &'static str,
        field: &'static str,
    },
}

/// Errors raised while turning tag events into filter records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Don't recognize tag <{0}>")]
    UnrecognizedTag(String),

    #[error("<{tag}> is missing required attribute \"{attribute}\"")]
    MissingAttribute { tag: Tag, attribute: &'static str },

    #[error("Invalid linkage error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed markup: {0}")]
    Stream(String),
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Stream(err.to_string())
    }
}

/// Top-level failure of a reduction run
#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("Input file {} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source} at {position}")]
    Parse {
        position: Position,
        #[source]
        source: ParseError,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReduceError {
    /// The parse error kind, if this failure happened while reading the tag stream
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            ReduceError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Input position of a parse failure
    pub fn position(&self) -> Option<Position> {
        match self {
            ReduceError::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for reduction operations
pub type Result<T> = std::result::Result<T, ReduceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_includes_position() {
        let err = ReduceError::Parse {
            position: Position {
                offset: 42,
                line: 3,
                column: 7,
            },
            source: ParseError::UnrecognizedTag("Unknown".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("Don't recognize tag <Unknown>"));
        assert!(msg.contains("line 3, column 7"));
        assert_eq!(err.position().map(|p| p.line), Some(3));
    }

    #[test]
    fn test_missing_attribute_message() {
        let err = ParseError::MissingAttribute {
            tag: Tag::Method,
            attribute: "className",
        };
        assert_eq!(
            err.to_string(),
            "<Method> is missing required attribute \"className\""
        );
    }

    #[test]
    fn test_validation_converts_into_parse_error() {
        let err: ParseError = ValidationError::MissingField {
            record: "LinkageError",
            field: "Reason",
        }
        .into();
        assert!(matches!(err, ParseError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Invalid linkage error: LinkageError is missing its Reason"
        );
    }

    #[test]
    fn test_input_not_found_has_no_parse_kind() {
        let err = ReduceError::InputNotFound(PathBuf::from("/nope.xml"));
        assert_eq!(err.to_string(), "Input file /nope.xml not found");
        assert!(err.parse_error().is_none());
        assert!(err.position().is_none());
    }
}
