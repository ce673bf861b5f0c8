/*!
 * Event-driven row accumulation.
 *
 * The accumulator is a three-state machine fed with structural events:
 *
 * ```text
 * Idle --RowStart--> InRow --ChannelStart--> InChannel
 *  ^                 |  ^                        |
 *  +-----RowEnd------+  +-------ChannelEnd-------+
 * ```
 *
 * A completed `RowRecord` is emitted on the `InRow -> Idle` transition.
 * It knows nothing about XML, so any streaming parser can drive it.
 */

use log::trace;

use crate::errors::DocumentError;

use super::row::{Channel, ChannelMap, RowRecord};

/// Structural events produced by a document reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent<'a> {
    /// A row element opened
    RowStart { id: &'a str },
    /// A language channel element opened inside a row
    ChannelStart { language: &'a str },
    /// Character data
    Text(&'a str),
    /// The current channel element closed
    ChannelEnd,
    /// The current row element closed
    RowEnd,
}

impl DocumentEvent<'_> {
    fn element(&self) -> &'static str {
        match self {
            Self::RowStart { .. } | Self::RowEnd => "row",
            Self::ChannelStart { .. } | Self::ChannelEnd => "channel",
            Self::Text(_) => "text",
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InRow(RowRecord),
    InChannel(RowRecord, Option<Channel>),
}

impl State {
    fn describe(&self) -> &'static str {
        match self {
            State::Idle => "outside of any row",
            State::InRow(_) => "inside a row",
            State::InChannel(..) => "inside a language channel",
        }
    }
}

/// Builds `RowRecord`s from a stream of `DocumentEvent`s
#[derive(Debug)]
pub struct RowAccumulator {
    channels: ChannelMap,
    state: State,
}

impl RowAccumulator {
    pub fn new(channels: ChannelMap) -> Self {
        Self {
            channels,
            state: State::Idle,
        }
    }

    /// True when no row is being accumulated
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// Feed one event; returns the finished row on `RowEnd`
    ///
    /// An out-of-place event is an error and leaves the accumulator idle,
    /// dropping the partially built row.
    pub fn handle(&mut self, event: DocumentEvent<'_>) -> Result<Option<RowRecord>, DocumentError> {
        let state = std::mem::take(&mut self.state);

        let (next, finished) = match (state, event) {
            (State::Idle, DocumentEvent::RowStart { id }) => {
                (State::InRow(RowRecord::empty(id)), None)
            }
            (State::InRow(row), DocumentEvent::ChannelStart { language }) => {
                let channel = self.channels.channel_for(language);
                if channel.is_none() {
                    trace!("Row '{}': ignoring channel '{}'", row.id, language);
                }
                (State::InChannel(row, channel), None)
            }
            (State::InChannel(mut row, channel), DocumentEvent::Text(fragment)) => {
                if let Some(channel) = channel {
                    row.append(channel, fragment);
                }
                (State::InChannel(row, channel), None)
            }
            // Text between structural elements carries no translation
            (state, DocumentEvent::Text(_)) => (state, None),
            (State::InChannel(row, _), DocumentEvent::ChannelEnd) => (State::InRow(row), None),
            (State::InRow(row), DocumentEvent::RowEnd) => (State::Idle, Some(row)),
            (state, event) => {
                return Err(DocumentError::UnexpectedElement {
                    element: event.element().to_string(),
                    reason: format!("{:?} {}", event, state.describe()),
                });
            }
        };

        self.state = next;
        Ok(finished)
    }
}
