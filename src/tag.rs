//! Closed tag vocabulary of linkage checker filter documents

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Every tag name a filter document may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Root of a concatenated baseline (plural)
    LinkageCheckerFilters,
    /// Per-module filter block; also the root of the reduced output
    LinkageCheckerFilter,
    LinkageError,
    Source,
    Target,
    Class,
    Field,
    Method,
    Reason,
}

impl Tag {
    pub const ALL: [Tag; 9] = [
        Tag::LinkageCheckerFilters,
        Tag::LinkageCheckerFilter,
        Tag::LinkageError,
        Tag::Source,
        Tag::Target,
        Tag::Class,
        Tag::Field,
        Tag::Method,
        Tag::Reason,
    ];

    /// Tag name as it appears in markup
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::LinkageCheckerFilters => "LinkageCheckerFilters",
            Tag::LinkageCheckerFilter => "LinkageCheckerFilter",
            Tag::LinkageError => "LinkageError",
            Tag::Source => "Source",
            Tag::Target => "Target",
            Tag::Class => "Class",
            Tag::Field => "Field",
            Tag::Method => "Method",
            Tag::Reason => "Reason",
        }
    }
}

impl FromStr for Tag {
    type Err = ParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name)
            .ok_or_else(|| ParseError::UnrecognizedTag(name.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_parses_from_its_name() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "Unknown".parse::<Tag>().unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedTag("Unknown".to_string()));
    }

    #[test]
    fn test_tag_names_are_case_sensitive() {
        assert!("method".parse::<Tag>().is_err());
        assert!("LINKAGEERROR".parse::<Tag>().is_err());
    }
}
