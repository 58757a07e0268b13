//! Read, reduce and write a linkage checker filter baseline
//!
//! The whole run is one pass: events are pulled from the source, fed through
//! the state machine into a [`ReductionStore`], and the store is rendered
//! only once the input is exhausted. The output file is never touched when
//! reduction fails.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReduceConfig;
use crate::error::{ParseError, ReduceError, Result};
use crate::events::{EventSource, XmlEventSource};
use crate::machine::FilterStateMachine;
use crate::serializer;
use crate::store::ReductionStore;

/// Diagnostic counts of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceSummary {
    /// Filter records parsed, duplicates included
    pub linkage_errors: usize,
    /// Distinct filter records written
    pub flattened_linkage_errors: usize,
}

impl ReduceSummary {
    pub fn from_store(store: &ReductionStore) -> Self {
        Self {
            linkage_errors: store.total_occurrences(),
            flattened_linkage_errors: store.distinct_count(),
        }
    }

    /// Two-line human readable report
    pub fn to_text(&self) -> String {
        format!(
            "LinkageErrors: {}\nFlattened LinkageErrors: {}",
            self.linkage_errors, self.flattened_linkage_errors
        )
    }
}

/// Drive the state machine over every event of `source`
pub fn reduce_events<S: EventSource>(source: &mut S) -> Result<ReductionStore> {
    let mut store = ReductionStore::new();
    let mut machine = FilterStateMachine::new();

    loop {
        let event = match source.next_event() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(err) => return Err(parse_failure(&*source, err)),
        };
        machine = match machine.step(event, &mut store) {
            Ok(machine) => machine,
            Err(err) => return Err(parse_failure(&*source, err)),
        };
    }

    debug!(
        occurrences = store.total_occurrences(),
        distinct = store.distinct_count(),
        "event stream exhausted"
    );
    Ok(store)
}

fn parse_failure<S: EventSource>(source: &S, err: ParseError) -> ReduceError {
    ReduceError::Parse {
        position: source.position(),
        source: err,
    }
}

/// Reduce an in-memory filter document
pub fn reduce_str(text: &str) -> Result<ReductionStore> {
    reduce_events(&mut XmlEventSource::new(text))
}

/// Reduce `input` and write the canonical document to `output`
///
/// The output file is created, or truncated if it already exists.
pub fn reduce_file(input: &Path, output: &Path, config: &ReduceConfig) -> Result<ReduceSummary> {
    if !input.exists() {
        return Err(ReduceError::InputNotFound(input.to_path_buf()));
    }

    debug!(input = %input.display(), "reading filter baseline");
    let text = fs::read_to_string(input).map_err(|source| ReduceError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let store = reduce_str(&text)?;
    let summary = ReduceSummary::from_store(&store);

    debug!(output = %output.display(), ?config, "writing reduced filter");
    let write_failure = |source| ReduceError::WriteOutput {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(write_failure)?);
    serializer::write_document(&store, config, &mut writer).map_err(write_failure)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventSequence, OpenTag, TagEvent};
    use tempfile::TempDir;

    const TWO_MODULES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LinkageCheckerFilters>
  <!-- module-a -->
  <LinkageCheckerFilter>
    <LinkageError>
      <Source><Class name="com.x.Foo"/></Source>
      <Target><Method className="com.x.Bar" name="baz"/></Target>
      <Reason>ignored</Reason>
    </LinkageError>
  </LinkageCheckerFilter>
  <!-- module-b -->
  <LinkageCheckerFilter>
    <LinkageError>
      <Source><Class name="com.x.Foo"/></Source>
      <Target><Method className="com.x.Bar" name="baz"/></Target>
      <Reason>ignored</Reason>
    </LinkageError>
  </LinkageCheckerFilter>
</LinkageCheckerFilters>
"#;

    #[test]
    fn test_identical_records_from_two_modules_collapse() {
        let store = reduce_str(TWO_MODULES).unwrap();
        let summary = ReduceSummary::from_store(&store);
        assert_eq!(summary.linkage_errors, 2);
        assert_eq!(summary.flattened_linkage_errors, 1);

        let doc = serializer::render_document(&store, &ReduceConfig::default());
        assert_eq!(doc.matches("<LinkageError>").count(), 1);
        assert!(doc.contains("<!--[module-a, module-b]-->"));
    }

    #[test]
    fn test_unknown_tag_reports_position() {
        let text = "<LinkageCheckerFilters>\n  <Bogus/>\n</LinkageCheckerFilters>";
        let err = reduce_str(text).unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::UnrecognizedTag("Bogus".to_string()))
        );
        let position = err.position().unwrap();
        assert_eq!((position.line, position.column), (2, 3));
    }

    #[test]
    fn test_malformed_markup_is_stream_error() {
        let err = reduce_str("<LinkageCheckerFilters><LinkageError></Source>").unwrap_err();
        assert!(matches!(err.parse_error(), Some(ParseError::Stream(_))));
    }

    #[test]
    fn test_reduce_events_wraps_with_event_index() {
        let mut events = EventSequence::new(vec![
            TagEvent::Annotation("m".into()),
            TagEvent::Open(OpenTag::new("Unknown")),
        ]);
        let err = reduce_events(&mut events).unwrap_err();
        assert_eq!(err.to_string(), "Don't recognize tag <Unknown> at event 1");
    }

    #[test]
    fn test_reduce_file_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("baseline.xml");
        let output = dir.path().join("reduced.xml");
        fs::write(&input, TWO_MODULES).unwrap();

        let summary = reduce_file(&input, &output, &ReduceConfig::default()).unwrap();
        assert_eq!(
            summary.to_text(),
            "LinkageErrors: 2\nFlattened LinkageErrors: 1"
        );
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("<LinkageCheckerFilter>\n"));
        assert!(written.ends_with("</LinkageCheckerFilter>"));
    }

    #[test]
    fn test_reduce_file_truncates_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("baseline.xml");
        let output = dir.path().join("reduced.xml");
        fs::write(&input, "<LinkageCheckerFilters/>").unwrap();
        fs::write(&output, "x".repeat(4096)).unwrap();

        reduce_file(&input, &output, &ReduceConfig::default()).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<LinkageCheckerFilter>\n</LinkageCheckerFilter>"
        );
    }

    #[test]
    fn test_missing_input_is_reported_before_parsing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("reduced.xml");
        let err = reduce_file(&dir.path().join("absent.xml"), &output, &ReduceConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReduceError::InputNotFound(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_parse_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("baseline.xml");
        let output = dir.path().join("reduced.xml");
        fs::write(&input, "<LinkageCheckerFilters><Unknown/></LinkageCheckerFilters>").unwrap();

        let err = reduce_file(&input, &output, &ReduceConfig::default()).unwrap_err();
        assert!(err.parse_error().is_some());
        assert!(!output.exists());
    }

    #[test]
    fn test_truncated_baseline_is_stream_error() {
        let truncated = &TWO_MODULES[..TWO_MODULES.find("<!-- module-b -->").unwrap()];
        let err = reduce_str(truncated).unwrap_err();
        assert!(matches!(err.parse_error(), Some(ParseError::Stream(_))));
        assert!(err.to_string().contains("left open"));
    }

    #[test]
    fn test_incomplete_input_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("baseline.xml");
        let output = dir.path().join("reduced.xml");
        let cut = TWO_MODULES.find("</LinkageCheckerFilters>").unwrap();

        for text in [&TWO_MODULES[..cut], "", "<LinkageCheckerFilters/><LinkageCheckerFilters/>"] {
            fs::write(&input, text).unwrap();
            let err = reduce_file(&input, &output, &ReduceConfig::default()).unwrap_err();
            assert!(matches!(err.parse_error(), Some(ParseError::Stream(_))), "{}", err);
            assert!(!output.exists());
        }
    }

    #[test]
    fn test_output_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("baseline.xml");
        fs::write(&input, TWO_MODULES).unwrap();

        let err = reduce_file(&input, dir.path(), &ReduceConfig::default()).unwrap_err();
        assert!(matches!(err, ReduceError::WriteOutput { .. }));
    }
}
