/*!
 * Document-level verification pass.
 *
 * A `DocumentVerifier` is created per document. It owns the write-once
 * `DetectionState` and runs, for every row in order: placeholder detection,
 * the marker check and the number check.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::io::BufRead;

use crate::app_config::{Config, DetectionPolicy, VerificationConfig};
use crate::document::{RowReader, RowRecord};
use crate::errors::DocumentError;

use super::markers::MarkerChecker;
use super::numbers::NumberChecker;
use super::patterns::{DetectionState, MarkerPattern, PatternDetector};
use super::report::{Report, ReportBuilder};

/// Verifies the rows of one document
pub struct DocumentVerifier {
    detection: DetectionState,
    policy: DetectionPolicy,
    check_markers: bool,
    numbers: Option<NumberChecker>,
}

impl DocumentVerifier {
    /// Create a verifier for a source/target language pair
    pub fn new(
        settings: &VerificationConfig,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self> {
        let numbers = if settings.check_numbers {
            let source_grouping = settings.grouping_for(source_language).ok_or_else(|| {
                anyhow!("No number grouping character known for '{}'", source_language)
            })?;
            let target_grouping = settings.grouping_for(target_language).ok_or_else(|| {
                anyhow!("No number grouping character known for '{}'", target_language)
            })?;

            Some(
                NumberChecker::new(source_grouping, target_grouping, settings.unparsable_numbers)
                    .context("Failed to build number matcher")?,
            )
        } else {
            None
        };

        Ok(Self {
            detection: DetectionState::new(),
            policy: settings.marker_detection,
            check_markers: settings.check_markers,
            numbers,
        })
    }

    /// Create a verifier from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.verification,
            &config.source_language,
            &config.target_language,
        )
    }

    /// The document's detection state
    pub fn detection(&self) -> &DetectionState {
        &self.detection
    }

    /// Placeholder syntax to check this row with
    fn pattern_for(&self, row: &RowRecord) -> Option<MarkerPattern> {
        match self.policy {
            DetectionPolicy::Sticky => self.detection.resolve(&row.source),
            DetectionPolicy::PerRow => {
                let pattern = PatternDetector::detect(&row.source);
                if let Some(pattern) = pattern {
                    self.detection.establish(pattern);
                }
                pattern
            }
        }
    }

    /// Verify one row, appending its findings to `report`
    ///
    /// Marker findings come before the number finding of the same row.
    pub fn verify_row(&self, row: &RowRecord, report: &mut ReportBuilder) {
        if self.check_markers {
            if let Some(pattern) = self.pattern_for(row) {
                report.extend(MarkerChecker::check(row, pattern));
            }
        }

        if let Some(numbers) = &self.numbers {
            if let Some(finding) = numbers.check(row) {
                report.push(finding);
            }
        }

        report.row_checked();
    }

    /// Verify a sequence of rows; the first error discards every finding
    pub fn verify_rows<I>(self, rows: I) -> Result<Report, DocumentError>
    where
        I: IntoIterator<Item = Result<RowRecord, DocumentError>>,
    {
        let mut report = ReportBuilder::new();
        self.run(rows, &mut report)?;
        Ok(self.finish(report, None))
    }

    /// Verify every row produced by a document reader
    pub fn verify_document<R: BufRead>(self, mut rows: RowReader<R>) -> Result<Report, DocumentError> {
        let mut report = ReportBuilder::new();
        self.run(rows.by_ref(), &mut report)?;
        let document_class = rows.document_class().map(str::to_string);
        Ok(self.finish(report, document_class))
    }

    fn run<I>(&self, rows: I, report: &mut ReportBuilder) -> Result<(), DocumentError>
    where
        I: IntoIterator<Item = Result<RowRecord, DocumentError>>,
    {
        for row in rows {
            self.verify_row(&row?, report);
        }
        Ok(())
    }

    fn finish(self, report: ReportBuilder, document_class: Option<String>) -> Report {
        let report = report.finish(document_class, self.detection.active());
        match report.active_pattern() {
            Some(pattern) => debug!("Document verified with marker pattern {}", pattern),
            None => debug!("Document verified without any marker pattern"),
        }
        info!("{}", report.summary());
        report
    }
}
