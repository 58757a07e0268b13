//! Tag-stream state machine
//!
//! Rebuilds symbols and filter records from a flat stream of tag events.
//! All partially built state lives in [`FilterStateMachine`], which is moved
//! through every step; completed records go straight into a
//! [`ReductionStore`].
//!
//! Registers and the events that fill or clear them:
//!
//! | Register     | Filled by                       | Cleared by                           |
//! |--------------|---------------------------------|--------------------------------------|
//! | `class_name` | `<Method>`, `<Field>` open      | `</Method>` `</Field>` `</Class>` `</Source>` `</Target>` |
//! | `name`       | `<Method>`, `<Field>`, `<Class>` open | `</Method>` `</Field>` `</Class>`    |
//! | `symbol`     | `</Method>` `</Field>` `</Class>` | `</Source>` `</Target>`            |
//! | `source`     | `</Source>`                     | `</LinkageError>`                    |
//! | `target`     | `</Target>`                     | `</LinkageError>`                    |
//! | `reason`     | text right after `<Reason>`     | `</LinkageError>`                    |
//! | `marker`     | comment                         | next comment                         |

use tracing::{debug, trace};

use crate::error::{ParseError, ValidationError};
use crate::events::{OpenTag, TagEvent};
use crate::record::{FilterRecord, Source, Target};
use crate::store::ReductionStore;
use crate::symbol::Symbol;
use crate::tag::Tag;

/// Builder registers for the record under construction
#[derive(Debug, Default)]
pub struct FilterStateMachine {
    class_name: Option<String>,
    name: Option<String>,
    symbol: Option<Symbol>,
    source: Option<Source>,
    target: Option<Target>,
    reason: Option<String>,
    expect_reason: bool,
    marker: String,
}

impl FilterStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, returning the machine for the next step
    pub fn step(mut self, event: TagEvent, store: &mut ReductionStore) -> Result<Self, ParseError> {
        // Only the event directly after <Reason> may carry the reason text
        let expect_reason = std::mem::take(&mut self.expect_reason);

        match event {
            TagEvent::Open(tag) => self.open(tag)?,
            TagEvent::Close(name) => self.close(name.parse()?, store)?,
            TagEvent::Text(text) => {
                if expect_reason {
                    self.reason = Some(text.trim().to_string());
                }
            }
            TagEvent::Annotation(text) => {
                self.marker = text.trim().to_string();
                trace!(marker = %self.marker, "marker");
            }
        }
        Ok(self)
    }

    fn open(&mut self, open: OpenTag) -> Result<(), ParseError> {
        let tag: Tag = open.name.parse()?;
        match tag {
            Tag::Method | Tag::Field => {
                self.class_name = Some(required_attribute(tag, &open, "className")?);
                self.name = Some(required_attribute(tag, &open, "name")?);
            }
            Tag::Class => {
                self.name = Some(required_attribute(tag, &open, "name")?);
            }
            Tag::Reason => self.expect_reason = true,
            Tag::LinkageCheckerFilters
            | Tag::LinkageCheckerFilter
            | Tag::LinkageError
            | Tag::Source
            | Tag::Target => {}
        }
        Ok(())
    }

    fn close(&mut self, tag: Tag, store: &mut ReductionStore) -> Result<(), ParseError> {
        match tag {
            Tag::Method => {
                self.symbol = Some(Symbol::method(self.class_name.take(), self.name.take())?);
            }
            Tag::Field => {
                self.symbol = Some(Symbol::field(self.class_name.take(), self.name.take())?);
            }
            Tag::Class => {
                self.class_name = None;
                self.symbol = Some(Symbol::class(self.name.take())?);
            }
            Tag::Source => {
                self.class_name = None;
                self.source = Some(Source(self.take_symbol("Source")?));
            }
            Tag::Target => {
                self.class_name = None;
                self.target = Some(Target(self.take_symbol("Target")?));
            }
            Tag::LinkageError => {
                let record =
                    FilterRecord::new(self.source.take(), self.target.take(), self.reason.take())?;
                let fresh = store.record_occurrence(record, self.marker.as_str());
                debug!(
                    marker = %self.marker,
                    fresh,
                    occurrences = store.total_occurrences(),
                    "linkage error"
                );
            }
            Tag::Reason | Tag::LinkageCheckerFilter | Tag::LinkageCheckerFilters => {}
        }
        Ok(())
    }

    fn take_symbol(&mut self, record: &'static str) -> Result<Symbol, ValidationError> {
        self.symbol.take().ok_or(ValidationError::MissingField {
            record,
            field: "symbol",
        })
    }
}

fn required_attribute(
    tag: Tag,
    open: &OpenTag,
    attribute: &'static str,
) -> Result<String, ParseError> {
    open.attribute(attribute)
        .map(str::to_string)
        .ok_or(ParseError::MissingAttribute { tag, attribute })
}
