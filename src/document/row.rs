/*!
 * Row model for bilingual translation tables.
 */

use serde::{Deserialize, Serialize};

use crate::language_utils;

/// The two language channels a row carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Original text
    Source,
    /// Translated text
    Target,
}

/// One translation unit with the text of both channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    /// Row identifier, not necessarily unique
    pub id: String,
    /// Accumulated source text, untrimmed
    pub source: String,
    /// Accumulated target text, untrimmed
    pub target: String,
}

impl RowRecord {
    /// Create a row with both texts already known
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Create an empty row that text will be appended to
    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, String::new(), String::new())
    }

    /// Text of a channel
    pub fn text(&self, channel: Channel) -> &str {
        match channel {
            Channel::Source => &self.source,
            Channel::Target => &self.target,
        }
    }

    /// Append a text fragment to a channel
    pub fn append(&mut self, channel: Channel, fragment: &str) {
        match channel {
            Channel::Source => self.source.push_str(fragment),
            Channel::Target => self.target.push_str(fragment),
        }
    }
}

/// Maps document language ids to channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    source_language: String,
    target_language: String,
}

impl ChannelMap {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Resolve a language id; ids of any other language map to nothing
    pub fn channel_for(&self, language: &str) -> Option<Channel> {
        if language_utils::language_codes_match(language, &self.source_language) {
            Some(Channel::Source)
        } else if language_utils::language_codes_match(language, &self.target_language) {
            Some(Channel::Target)
        } else {
            None
        }
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::new("en", "pl")
    }
}
