//! Structural tag events and the sources that produce them
//!
//! The state machine only ever sees [`TagEvent`]s. [`XmlEventSource`] turns
//! a markup document into that stream using quick-xml; [`EventSequence`]
//! replays a prepared list of events.

use std::collections::VecDeque;
use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;

/// An opening tag with its attributes in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl OpenTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One structural event of a tag stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Open(OpenTag),
    Close(String),
    Text(String),
    /// Free-text comment (provenance marker)
    Annotation(String),
}

/// Location of an event in the input
///
/// `line` and `column` are 1-based; a `line` of 0 means the source has no
/// line structure and `offset` is the index of the event in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Resolve a byte offset into line and column within `text`
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        Self {
            offset,
            line,
            column: offset - line_start + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "event {}", self.offset)
        } else {
            write!(f, "line {}, column {}", self.line, self.column)
        }
    }
}

/// A pull-based producer of tag events
pub trait EventSource {
    /// Next event, or `None` once the stream is exhausted
    fn next_event(&mut self) -> Result<Option<TagEvent>, ParseError>;

    /// Position of the most recently returned event (or of the failure)
    fn position(&self) -> Position;
}

/// Tag events read from an in-memory markup document
///
/// Self-closing elements are reported as an open event immediately
/// followed by a close event. The document must have exactly one root
/// element, closed before end of input, and no text outside it.
pub struct XmlEventSource<'a> {
    text: &'a str,
    reader: Reader<&'a [u8]>,
    event_start: usize,
    pending_close: Option<String>,
    depth: usize,
    root_seen: bool,
}

impl<'a> XmlEventSource<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        reader.config_mut().check_end_names = true;
        Self {
            text,
            reader,
            event_start: 0,
            pending_close: None,
            depth: 0,
            root_seen: false,
        }
    }

    /// Track element nesting; a second top-level element is an error
    fn enter_element(&mut self, name: &str) -> Result<(), ParseError> {
        if self.depth == 0 {
            if self.root_seen {
                return Err(ParseError::Stream(format!(
                    "element <{}> after the root element",
                    name
                )));
            }
            self.root_seen = true;
        }
        Ok(())
    }

    fn top_level_text(&self, text: &str) -> Result<(), ParseError> {
        if self.depth == 0 && !text.trim().is_empty() {
            return Err(ParseError::Stream(
                "text outside the root element".to_string(),
            ));
        }
        Ok(())
    }

    fn end_of_input(&self) -> Result<(), ParseError> {
        if !self.root_seen {
            return Err(ParseError::Stream("no root element".to_string()));
        }
        if self.depth > 0 {
            return Err(ParseError::Stream(format!(
                "unexpected end of input, {} element(s) left open",
                self.depth
            )));
        }
        Ok(())
    }

    fn open_tag(start: &BytesStart<'_>) -> Result<OpenTag, ParseError> {
        let mut tag = OpenTag::new(utf8(start.local_name().as_ref())?);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ParseError::Stream(e.to_string()))?;
            let key = utf8(attr.key.local_name().as_ref())?;
            let value = attr.unescape_value()?;
            tag.attributes.push((key, value.into_owned()));
        }
        Ok(tag)
    }
}

fn utf8(bytes: &[u8]) -> Result<String, ParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ParseError::Stream(e.to_string()))
}

impl EventSource for XmlEventSource<'_> {
    fn next_event(&mut self) -> Result<Option<TagEvent>, ParseError> {
        // Second half of a self-closing element
        if let Some(name) = self.pending_close.take() {
            return Ok(Some(TagEvent::Close(name)));
        }

        loop {
            self.event_start = self.reader.buffer_position() as usize;
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    self.event_start = self.reader.error_position() as usize;
                    return Err(err.into());
                }
            };
            let tag_event = match event {
                Event::Start(start) => {
                    let tag = Self::open_tag(&start)?;
                    self.enter_element(&tag.name)?;
                    self.depth += 1;
                    TagEvent::Open(tag)
                }
                Event::Empty(start) => {
                    let tag = Self::open_tag(&start)?;
                    self.enter_element(&tag.name)?;
                    self.pending_close = Some(tag.name.clone());
                    TagEvent::Open(tag)
                }
                Event::End(end) => {
                    self.depth = self.depth.saturating_sub(1);
                    TagEvent::Close(utf8(end.local_name().as_ref())?)
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    self.top_level_text(&text)?;
                    TagEvent::Text(text)
                }
                Event::CData(cdata) => {
                    let text = utf8(&cdata)?;
                    self.top_level_text(&text)?;
                    TagEvent::Text(text)
                }
                Event::Comment(comment) => TagEvent::Annotation(utf8(&comment)?),
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => continue,
                Event::Eof => {
                    self.end_of_input()?;
                    return Ok(None);
                }
            };
            tracing::trace!(?tag_event, offset = self.event_start, "tag event");
            return Ok(Some(tag_event));
        }
    }

    fn position(&self) -> Position {
        Position::from_offset(self.text, self.event_start)
    }
}

/// A prepared, finite list of tag events
#[derive(Debug, Clone, Default)]
pub struct EventSequence {
    events: VecDeque<TagEvent>,
    index: usize,
}

impl EventSequence {
    pub fn new(events: impl IntoIterator<Item = TagEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            index: 0,
        }
    }
}

impl EventSource for EventSequence {
    fn next_event(&mut self) -> Result<Option<TagEvent>, ParseError> {
        let event = self.events.pop_front();
        if event.is_some() {
            self.index += 1;
        }
        Ok(event)
    }

    fn position(&self) -> Position {
        Position {
            offset: self.index.saturating_sub(1),
            line: 0,
            column: 0,
        }
    }
}
