/*!
 * Findings and the verification report.
 */

use std::fmt;

use serde::Serialize;

use super::patterns::MarkerPattern;

/// Half-open range of character offsets into a finding's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert a byte range reported by the regex engine into character offsets
    pub fn from_byte_range(text: &str, start: usize, end: usize) -> Self {
        let start_chars = text[..start].chars().count();
        let len_chars = text[start..end].chars().count();
        Self::new(start_chars, start_chars + len_chars)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Kind of inconsistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Marker,
    Number,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::Marker => write!(f, "marker"),
            FindingKind::Number => write!(f, "number"),
        }
    }
}

/// One inconsistency between a row's source and target text
///
/// Texts are trimmed; spans index into them by character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Finding {
    /// A placeholder of the source text is missing from the target text
    #[serde(rename = "marker")]
    MarkerMismatch {
        row_id: String,
        source_text: String,
        target_text: String,
        /// The placeholder exactly as it appears in the source
        marker: String,
        source_span: Span,
    },

    /// The first number of the source text differs from the target's
    #[serde(rename = "number")]
    NumberMismatch {
        row_id: String,
        source_text: String,
        target_text: String,
        source_number: String,
        /// `None` when the source number could not be normalized
        source_value: Option<u64>,
        source_span: Span,
        /// `None` when the target holds no number at all
        target_number: Option<String>,
        target_value: Option<u64>,
        /// `None` is the "not found" sentinel, serialized as `null`
        target_span: Option<Span>,
    },
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::MarkerMismatch { .. } => FindingKind::Marker,
            Finding::NumberMismatch { .. } => FindingKind::Number,
        }
    }

    pub fn row_id(&self) -> &str {
        match self {
            Finding::MarkerMismatch { row_id, .. } | Finding::NumberMismatch { row_id, .. } => row_id,
        }
    }

    pub fn source_text(&self) -> &str {
        match self {
            Finding::MarkerMismatch { source_text, .. }
            | Finding::NumberMismatch { source_text, .. } => source_text,
        }
    }

    pub fn target_text(&self) -> &str {
        match self {
            Finding::MarkerMismatch { target_text, .. }
            | Finding::NumberMismatch { target_text, .. } => target_text,
        }
    }

    /// Span of the offending substring in the source text
    pub fn source_span(&self) -> Span {
        match self {
            Finding::MarkerMismatch { source_span, .. }
            | Finding::NumberMismatch { source_span, .. } => *source_span,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MarkerMismatch { row_id, marker, .. } => {
                write!(f, "Row {}: marker '{}' missing in translation", row_id, marker)
            }
            Finding::NumberMismatch {
                row_id,
                source_number,
                target_number: Some(target_number),
                ..
            } => {
                write!(
                    f,
                    "Row {}: number '{}' translated as '{}'",
                    row_id, source_number, target_number
                )
            }
            Finding::NumberMismatch {
                row_id,
                source_number,
                target_number: None,
                ..
            } => {
                write!(f, "Row {}: number '{}' missing in translation", row_id, source_number)
            }
        }
    }
}

/// Immutable result of verifying one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    document_class: Option<String>,
    active_pattern: Option<MarkerPattern>,
    rows_checked: usize,
    findings: Vec<Finding>,
}

impl Report {
    /// Findings in row order, marker findings before number findings within a row
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn rows_checked(&self) -> usize {
        self.rows_checked
    }

    pub fn document_class(&self) -> Option<&str> {
        self.document_class.as_deref()
    }

    /// Placeholder syntax that was active for the document, if any
    pub fn active_pattern(&self) -> Option<MarkerPattern> {
        self.active_pattern
    }

    pub fn count(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind() == kind).count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        format!(
            "Verification: {} rows checked, {} problems ({} marker, {} number)",
            self.rows_checked,
            self.len(),
            self.count(FindingKind::Marker),
            self.count(FindingKind::Number)
        )
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

/// Append-only collector for findings of a document pass
#[derive(Debug, Default)]
pub struct ReportBuilder {
    findings: Vec<Finding>,
    rows_checked: usize,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Count a fully verified row
    pub fn row_checked(&mut self) {
        self.rows_checked += 1;
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Seal the collected findings into a report
    pub fn finish(self, document_class: Option<String>, active_pattern: Option<MarkerPattern>) -> Report {
        Report {
            document_class,
            active_pattern,
            rows_checked: self.rows_checked,
            findings: self.findings,
        }
    }
}

impl Extend<Finding> for ReportBuilder {
    fn extend<T: IntoIterator<Item = Finding>>(&mut self, iter: T) {
        self.findings.extend(iter);
    }
}
