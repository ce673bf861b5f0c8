/*!
 * Marker validation for translated rows.
 *
 * Every placeholder of the active syntax found in the source text must occur
 * verbatim somewhere in the target text.
 */

use log::debug;

use crate::document::RowRecord;

use super::patterns::MarkerPattern;
use super::report::{Finding, Span};

/// Checks that source placeholders survive translation
pub struct MarkerChecker;

impl MarkerChecker {
    /// Report one `MarkerMismatch` per source occurrence missing from the target
    ///
    /// Occurrences are searched in the trimmed source text and looked up as
    /// plain substrings of the raw target text. Repeated identical markers are
    /// each reported.
    pub fn check(row: &RowRecord, pattern: MarkerPattern) -> Vec<Finding> {
        let source = row.source.trim();

        let findings: Vec<Finding> = pattern
            .regex()
            .find_iter(source)
            .filter(|occurrence| !row.target.contains(occurrence.as_str()))
            .map(|occurrence| Finding::MarkerMismatch {
                row_id: row.id.clone(),
                source_text: source.to_string(),
                target_text: row.target.trim().to_string(),
                marker: occurrence.as_str().to_string(),
                source_span: Span::from_byte_range(source, occurrence.start(), occurrence.end()),
            })
            .collect();

        if !findings.is_empty() {
            debug!("Row '{}': {} marker(s) missing", row.id, findings.len());
        }

        findings
    }
}
