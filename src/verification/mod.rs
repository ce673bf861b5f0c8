/*!
 * Verification module for localization quality assurance.
 *
 * This module checks every row of a bilingual document:
 * - Placeholder detection (one syntax per document, chosen by priority)
 * - Marker validation (source placeholders present in the target)
 * - Number validation (first number equal after locale normalization)
 *
 * # Architecture
 *
 * - `patterns`: Placeholder syntaxes, detector and write-once detection state
 * - `markers`: Marker consistency checker
 * - `numbers`: Grouped-number matcher and numeric consistency checker
 * - `report`: Findings, report builder and immutable report
 * - `verifier`: Orchestrates the checks over a whole document
 */

pub mod markers;
pub mod numbers;
pub mod patterns;
pub mod report;
pub mod verifier;

// Re-export main types
pub use markers::MarkerChecker;
pub use numbers::{GroupedNumberMatcher, NumberChecker};
pub use patterns::{DetectionState, MarkerPattern, PatternDetector};
pub use report::{Finding, FindingKind, Report, ReportBuilder, Span};
pub use verifier::DocumentVerifier;
