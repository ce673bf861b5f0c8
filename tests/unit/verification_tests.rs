/*!
 * Tests for placeholder detection, marker checks and number checks
 */

use slpcheck::app_config::UnparsableNumberPolicy;
use slpcheck::document::RowRecord;
use slpcheck::verification::numbers::grouping_for_language;
use slpcheck::verification::{
    DetectionState, Finding, FindingKind, GroupedNumberMatcher, MarkerChecker, MarkerPattern,
    NumberChecker, PatternDetector, ReportBuilder, Span,
};

fn en_pl_checker() -> NumberChecker {
    NumberChecker::new(',', ' ', UnparsableNumberPolicy::Mismatch).unwrap()
}

#[test]
fn test_patternDetector_withSeveralSyntaxes_shouldPreferPriorityOrder() {
    assert_eq!(
        PatternDetector::detect("{name} has %(count)s and %{total}s"),
        Some(MarkerPattern::PercentBrace)
    );
    assert_eq!(PatternDetector::detect("{user} and {0}"), Some(MarkerPattern::NumericBrace));
    assert_eq!(PatternDetector::detect("{user}"), Some(MarkerPattern::NamedBrace));
    assert_eq!(PatternDetector::detect("no placeholders"), None);
    assert_eq!(PatternDetector::detect("{}"), None);
}

#[test]
fn test_detectionState_onceSet_shouldNeverChange() {
    let state = DetectionState::new();
    assert!(!state.is_set());
    assert_eq!(state.resolve("plain text"), None);
    assert!(!state.is_set());

    assert_eq!(state.resolve("Hello {name}"), Some(MarkerPattern::NamedBrace));
    assert_eq!(state.resolve("%{count}s left"), Some(MarkerPattern::NamedBrace));
    assert_eq!(state.establish(MarkerPattern::PercentParen), MarkerPattern::NamedBrace);
    assert_eq!(state.active(), Some(MarkerPattern::NamedBrace));
}

#[test]
fn test_markerChecker_withRepeatedMarker_shouldReportEachOccurrence() {
    let row = RowRecord::new("r", "{0} of {0}", "z");
    let findings = MarkerChecker::check(&row, MarkerPattern::NumericBrace);

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].source_span(), Span::new(0, 3));
    assert_eq!(findings[1].source_span(), Span::new(7, 10));
}

#[test]
fn test_markerChecker_withReorderedMarkers_shouldAccept() {
    let row = RowRecord::new("r", "%(a)s then %(b)s", "%(b)s potem %(a)s");
    assert!(MarkerChecker::check(&row, MarkerPattern::PercentParen).is_empty());
}

#[test]
fn test_markerChecker_withOtherSyntaxInSource_shouldIgnoreIt() {
    let row = RowRecord::new("r", "{0} and %{count}s", "{0}");
    assert!(MarkerChecker::check(&row, MarkerPattern::NumericBrace).is_empty());
}

#[test]
fn test_markerChecker_withNonAsciiPrefix_shouldUseCharacterSpans() {
    let row = RowRecord::new("r", "  Żółw {name}  ", "Żółw");
    let findings = MarkerChecker::check(&row, MarkerPattern::NamedBrace);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].source_text(), "Żółw {name}");
    assert_eq!(findings[0].source_span(), Span::new(5, 11));
}

#[test]
fn test_groupedNumberMatcher_shouldMatchLocaleGrouping() {
    let polish = GroupedNumberMatcher::new(' ').unwrap();
    let found = polish.find("Cena: 1 500 000 zł").unwrap();
    assert_eq!(found.text, "1 500 000");
    assert_eq!(found.value, Some(1_500_000));
    assert_eq!(found.span, Span::new(6, 15));

    let english = GroupedNumberMatcher::new(',').unwrap();
    assert_eq!(english.find("Total 12,34").unwrap().text, "12");
    assert!(english.find("no digits").is_none());
}

#[test]
fn test_groupedNumberMatcher_withOverflow_shouldNotNormalize() {
    let english = GroupedNumberMatcher::new(',').unwrap();
    let found = english.find("99999999999999999999999").unwrap();
    assert_eq!(found.value, None);
}

#[test]
fn test_numberChecker_withLocaleEquivalentNumbers_shouldAccept() {
    let row = RowRecord::new("price", "Price: 1,500 USD", "Cena: 1 500 USD");
    assert!(en_pl_checker().check(&row).is_none());
}

#[test]
fn test_numberChecker_withSourceWithoutNumber_shouldSkip() {
    let row = RowRecord::new("r", "No digits", "Mamy 5");
    assert!(en_pl_checker().check(&row).is_none());
}

#[test]
fn test_numberChecker_withChangedNumber_shouldReport() {
    let row = RowRecord::new("r", "Wait 10 seconds", "Czekaj 15 sekund");
    let finding = en_pl_checker().check(&row).unwrap();

    match finding {
        Finding::NumberMismatch {
            source_number,
            source_value,
            target_number,
            target_value,
            target_span,
            ..
        } => {
            assert_eq!(source_number, "10");
            assert_eq!(source_value, Some(10));
            assert_eq!(target_number.as_deref(), Some("15"));
            assert_eq!(target_value, Some(15));
            assert_eq!(target_span, Some(Span::new(7, 9)));
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[test]
fn test_numberChecker_withMissingTargetNumber_shouldUseNotFoundSentinel() {
    let row = RowRecord::new("r", "Wait 10 seconds", "Czekaj chwilę");
    let finding = en_pl_checker().check(&row).unwrap();

    assert_eq!(finding.kind(), FindingKind::Number);
    assert!(matches!(
        finding,
        Finding::NumberMismatch { target_number: None, target_span: None, .. }
    ));
}

#[test]
fn test_groupingForLanguage_shouldResolveEquivalentCodes() {
    assert_eq!(grouping_for_language("en"), Some(','));
    assert_eq!(grouping_for_language("pol"), Some(' '));
    assert_eq!(grouping_for_language("de-DE"), Some('.'));
    assert_eq!(grouping_for_language("sw"), None);
}

#[test]
fn test_reportBuilder_shouldKeepInsertionOrder() {
    let mut builder = ReportBuilder::new();
    builder.extend(MarkerChecker::check(
        &RowRecord::new("a", "{x} {y}", ""),
        MarkerPattern::NamedBrace,
    ));
    builder.row_checked();

    let report = builder.finish(Some("ui".to_string()), Some(MarkerPattern::NamedBrace));
    let markers: Vec<&str> = report
        .findings()
        .iter()
        .filter_map(|f| match f {
            Finding::MarkerMismatch { marker, .. } => Some(marker.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(markers, vec!["{x}", "{y}"]);
    assert_eq!(report.rows_checked(), 1);
    assert_eq!(report.count(FindingKind::Marker), 2);
    assert_eq!(report.count(FindingKind::Number), 0);
}
