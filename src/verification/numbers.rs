/*!
 * Locale-aware number validation.
 *
 * The first grouped integer of the source text is compared with the first
 * grouped integer of the target text. Each side is matched with its own
 * locale's thousands separator (`1,500` in English, `1 500` in Polish) and
 * normalized before comparison.
 */

use log::debug;
use regex::Regex;

use crate::app_config::UnparsableNumberPolicy;
use crate::document::RowRecord;
use crate::language_utils;

use super::report::{Finding, Span};

/// Thousands separator per language
pub const NUMBER_GROUPING: &[(&str, char)] = &[
    ("en", ','),
    ("pl", ' '),
    ("de", '.'),
    ("fr", ' '),
    ("es", '.'),
    ("it", '.'),
    ("pt", '.'),
    ("nl", '.'),
    ("ru", ' '),
    ("uk", ' '),
    ("cs", ' '),
    ("sk", ' '),
    ("hu", ' '),
    ("sv", ' '),
    ("fi", ' '),
    ("nb", ' '),
    ("da", '.'),
    ("tr", '.'),
    ("ja", ','),
    ("zh", ','),
    ("ko", ','),
];

/// Built-in thousands separator for a language id
pub fn grouping_for_language(language: &str) -> Option<char> {
    NUMBER_GROUPING
        .iter()
        .find(|(code, _)| language_utils::language_codes_match(code, language))
        .map(|(_, grouping)| *grouping)
}

/// A number located in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedNumber {
    /// Matched substring, separators included
    pub text: String,
    pub span: Span,
    /// Normalized value; `None` when normalization failed
    pub value: Option<u64>,
}

/// Finds and normalizes integers grouped in threes by one separator
#[derive(Debug, Clone)]
pub struct GroupedNumberMatcher {
    grouping: char,
    regex: Regex,
}

impl GroupedNumberMatcher {
    pub fn new(grouping: char) -> Result<Self, regex::Error> {
        let separator = regex::escape(&grouping.to_string());
        let regex = Regex::new(&format!("[0-9]+(?:{}[0-9]{{3}})*", separator))?;
        Ok(Self { grouping, regex })
    }

    /// First grouped integer in the text
    pub fn find(&self, text: &str) -> Option<GroupedNumber> {
        self.regex.find(text).map(|found| GroupedNumber {
            text: found.as_str().to_string(),
            span: Span::from_byte_range(text, found.start(), found.end()),
            value: self.normalize(found.as_str()),
        })
    }

    /// Strip separators and parse; `None` if nothing numeric remains or it overflows
    pub fn normalize(&self, matched: &str) -> Option<u64> {
        let digits: String = matched.chars().filter(|c| *c != self.grouping).collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

/// Compares the first number of the source and target texts
#[derive(Debug, Clone)]
pub struct NumberChecker {
    source: GroupedNumberMatcher,
    target: GroupedNumberMatcher,
    unparsable: UnparsableNumberPolicy,
}

impl NumberChecker {
    pub fn new(
        source_grouping: char,
        target_grouping: char,
        unparsable: UnparsableNumberPolicy,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            source: GroupedNumberMatcher::new(source_grouping)?,
            target: GroupedNumberMatcher::new(target_grouping)?,
            unparsable,
        })
    }

    /// Returns a `NumberMismatch` when the target lacks the source's first number
    ///
    /// Rows whose source text holds no number are not checked.
    pub fn check(&self, row: &RowRecord) -> Option<Finding> {
        let source_text = row.source.trim();
        let target_text = row.target.trim();

        let source = self.source.find(source_text)?;
        let target = self.target.find(target_text);

        let mismatch = match &target {
            None => true,
            Some(target) => match (source.value, target.value) {
                (None, None) => self.unparsable == UnparsableNumberPolicy::Mismatch,
                (source_value, target_value) => source_value != target_value,
            },
        };

        if !mismatch {
            return None;
        }

        debug!(
            "Row '{}': number '{}' vs {:?}",
            row.id,
            source.text,
            target.as_ref().map(|t| t.text.as_str())
        );

        Some(Finding::NumberMismatch {
            row_id: row.id.clone(),
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
            source_number: source.text,
            source_value: source.value,
            source_span: source.span,
            target_value: target.as_ref().and_then(|t| t.value),
            target_span: target.as_ref().map(|t| t.span),
            target_number: target.map(|t| t.text),
        })
    }
}
