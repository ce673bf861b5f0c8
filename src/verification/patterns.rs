/*!
 * Placeholder syntax detection.
 *
 * Localization strings embed runtime values through placeholders. A document
 * normally sticks to one syntax, which is detected from the first source text
 * that contains any of the known candidates.
 */

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Regex for `%{name}s` placeholders
static PERCENT_BRACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%\{[a-zA-Z0-9]+\}s").expect("Invalid percent-brace regex")
});

/// Regex for `%(name)s` placeholders
static PERCENT_PAREN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%\([a-zA-Z0-9]+\)s").expect("Invalid percent-paren regex")
});

/// Regex for `{0}` placeholders
static NUMERIC_BRACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[0-9]+\}").expect("Invalid numeric-brace regex")
});

/// Regex for `{name}` placeholders
static NAMED_BRACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[a-zA-Z0-9]+\}").expect("Invalid named-brace regex")
});

/// Supported placeholder syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPattern {
    /// `%{name}s`
    PercentBrace,
    /// `%(name)s`
    PercentParen,
    /// `{0}`
    NumericBrace,
    /// `{name}`
    NamedBrace,
}

impl MarkerPattern {
    /// Candidates in detection order; earlier entries win
    pub const PRIORITY: [MarkerPattern; 4] = [
        MarkerPattern::PercentBrace,
        MarkerPattern::PercentParen,
        MarkerPattern::NumericBrace,
        MarkerPattern::NamedBrace,
    ];

    pub fn regex(self) -> &'static Regex {
        match self {
            Self::PercentBrace => &*PERCENT_BRACE_REGEX,
            Self::PercentParen => &*PERCENT_PAREN_REGEX,
            Self::NumericBrace => &*NUMERIC_BRACE_REGEX,
            Self::NamedBrace => &*NAMED_BRACE_REGEX,
        }
    }

    /// Sample placeholder in this syntax
    pub fn example(self) -> &'static str {
        match self {
            Self::PercentBrace => "%{tag}s",
            Self::PercentParen => "%(tag)s",
            Self::NumericBrace => "{0}",
            Self::NamedBrace => "{tag}",
        }
    }

    /// Whether the text contains at least one placeholder of this syntax
    pub fn is_match(self, text: &str) -> bool {
        self.regex().is_match(text)
    }
}

impl fmt::Display for MarkerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PercentBrace => "percent-brace",
            Self::PercentParen => "percent-paren",
            Self::NumericBrace => "numeric-brace",
            Self::NamedBrace => "named-brace",
        };
        write!(f, "{} ({})", name, self.example())
    }
}

/// Picks the placeholder syntax used by a text
pub struct PatternDetector;

impl PatternDetector {
    /// First candidate, by priority, that matches anywhere in the text
    ///
    /// Priority is positional: `{0}` is reported as numeric-brace even though
    /// the named-brace syntax matches it too.
    pub fn detect(text: &str) -> Option<MarkerPattern> {
        MarkerPattern::PRIORITY
            .into_iter()
            .find(|pattern| pattern.is_match(text))
    }
}

/// Document-wide, write-once record of the active placeholder syntax
///
/// Unset until a row establishes it; afterwards every call returns the same
/// pattern until the owning verifier is dropped.
#[derive(Debug, Default)]
pub struct DetectionState {
    active: OnceCell<MarkerPattern>,
}

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active pattern, if one was established
    pub fn active(&self) -> Option<MarkerPattern> {
        self.active.get().copied()
    }

    pub fn is_set(&self) -> bool {
        self.active.get().is_some()
    }

    /// Store `pattern` unless a pattern is already active; returns the active one
    pub fn establish(&self, pattern: MarkerPattern) -> MarkerPattern {
        *self.active.get_or_init(|| {
            debug!("Active marker pattern: {}", pattern);
            pattern
        })
    }

    /// Active pattern, detecting it from `text` while still unset
    pub fn resolve(&self, text: &str) -> Option<MarkerPattern> {
        match self.active() {
            Some(pattern) => Some(pattern),
            None => PatternDetector::detect(text).map(|pattern| self.establish(pattern)),
        }
    }
}
