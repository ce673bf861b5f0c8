/*!
 * End-to-end tests: document file in, report out
 */

use anyhow::Result;
use slpcheck::app_config::{Config, DetectionPolicy, UnparsableNumberPolicy};
use slpcheck::app_controller::Controller;
use slpcheck::verification::{Finding, FindingKind, MarkerPattern};
use crate::common;

fn controller() -> Controller {
    common::init_test_logger();
    Controller::with_config(Config::default()).unwrap()
}

/// A translation keeping its placeholder produces an empty report
#[test]
fn test_checkFile_withPreservedMarker_shouldReportNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(
        temp_dir.path(),
        "items.slp",
        &[("found", "Found %{count}s items", "Found %{count}s elementos")],
    )?;

    let report = controller().check_file(&path)?;

    assert!(report.is_empty());
    assert_eq!(report.rows_checked(), 1);
    assert_eq!(report.active_pattern(), Some(MarkerPattern::PercentBrace));

    Ok(())
}

/// A dropped placeholder is reported with its exact text
#[test]
fn test_checkFile_withDroppedMarker_shouldReportMarkerMismatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(
        temp_dir.path(),
        "items.slp",
        &[("found", "Found %{count}s items", "Found elementos")],
    )?;

    let report = controller().check_file(&path)?;

    assert_eq!(report.len(), 1);
    match &report.findings()[0] {
        Finding::MarkerMismatch { row_id, marker, target_text, .. } => {
            assert_eq!(row_id, "found");
            assert_eq!(marker, "%{count}s");
            assert_eq!(target_text, "Found elementos");
        }
        other => panic!("unexpected finding: {:?}", other),
    }

    Ok(())
}

/// Locale-equivalent numbers are accepted
#[test]
fn test_checkFile_withLocaleGroupedNumbers_shouldReportNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(
        temp_dir.path(),
        "prices.slp",
        &[("price", "Price: 1,500 USD", "Price: 1 500 USD")],
    )?;

    let report = controller().check_file(&path)?;
    assert!(report.is_empty());

    Ok(())
}

/// A parse error on the second row fails the whole document
#[test]
fn test_checkFile_withParseErrorOnSecondRow_shouldFailWithoutFindings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_malformed_document(temp_dir.path(), "broken.slp")?;

    let result = controller().check_file(&path);
    assert!(result.is_err());

    Ok(())
}

/// Findings come in row order, markers before the number of the same row
#[test]
fn test_checkFile_withSeveralRows_shouldKeepDocumentOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(
        temp_dir.path(),
        "mixed.slp",
        &[
            ("a", "%{n}s of 3 <done>", "z 4"),
            ("b", "All good", "Wszystko dobrze"),
            ("c", "Total: %{sum}s", "Razem"),
        ],
    )?;

    let report = controller().check_file(&path)?;
    let order: Vec<(&str, FindingKind)> = report
        .findings()
        .iter()
        .map(|f| (f.row_id(), f.kind()))
        .collect();

    assert_eq!(
        order,
        vec![
            ("a", FindingKind::Marker),
            ("a", FindingKind::Number),
            ("c", FindingKind::Marker),
        ]
    );
    assert_eq!(report.rows_checked(), 3);
    assert_eq!(report.findings()[0].source_text(), "%{n}s of 3 <done>");

    Ok(())
}

/// The first detected syntax stays active for the rest of the document
///
/// Under `{name}` detection only the `{count}` part of `%{count}s` is a marker.
#[test]
fn test_checkFile_withStickyDetection_shouldIgnoreLaterSyntaxes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let rows = [
        ("first", "Hello {name}", "Cześć {name}"),
        ("second", "Found %{count}s items", "Znaleziono {count} elementów"),
    ];
    let path = common::create_test_document(temp_dir.path(), "sticky.slp", &rows)?;

    let report = controller().check_file(&path)?;
    assert!(report.is_empty());
    assert_eq!(report.active_pattern(), Some(MarkerPattern::NamedBrace));

    let mut config = Config::default();
    config.verification.marker_detection = DetectionPolicy::PerRow;
    let report = Controller::with_config(config)?.check_file(&path)?;

    assert_eq!(report.len(), 1);
    assert_eq!(report.findings()[0].row_id(), "second");
    assert_eq!(report.active_pattern(), Some(MarkerPattern::NamedBrace));

    Ok(())
}

/// Every document starts with a fresh detection state
#[test]
fn test_checkFile_withTwoDocuments_shouldDetectIndependently() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_document(
        temp_dir.path(),
        "first.slp",
        &[("a", "Hello {name}", "Cześć {name}")],
    )?;
    let second = common::create_test_document(
        temp_dir.path(),
        "second.slp",
        &[("b", "Found %{count}s items", "Znaleziono")],
    )?;

    let controller = controller();
    assert_eq!(controller.check_file(&first)?.active_pattern(), Some(MarkerPattern::NamedBrace));

    let report = controller.check_file(&second)?;
    assert_eq!(report.active_pattern(), Some(MarkerPattern::PercentBrace));
    assert_eq!(report.len(), 1);

    Ok(())
}

/// Unparsable numbers on both sides follow the configured policy
#[test]
fn test_checkFile_withUnparsableNumbers_shouldFollowPolicy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let huge = "Limit 99999999999999999999999";
    let path = common::create_test_document(
        temp_dir.path(),
        "huge.slp",
        &[("limit", huge, "Limit 99999999999999999999999")],
    )?;

    let report = controller().check_file(&path)?;
    assert_eq!(report.count(FindingKind::Number), 1);

    let mut config = Config::default();
    config.verification.unparsable_numbers = UnparsableNumberPolicy::Equal;
    let report = Controller::with_config(config)?.check_file(&path)?;
    assert!(report.is_empty());

    Ok(())
}

/// Disabled checks produce no findings of their kind
#[test]
fn test_checkFile_withChecksDisabled_shouldSkipThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(
        temp_dir.path(),
        "off.slp",
        &[("r", "Wait 10s for {name}", "Czekaj")],
    )?;

    let mut config = Config::default();
    config.verification.check_markers = false;
    let report = Controller::with_config(config.clone())?.check_file(&path)?;
    assert_eq!(report.count(FindingKind::Marker), 0);
    assert_eq!(report.count(FindingKind::Number), 1);

    config.verification.check_markers = true;
    config.verification.check_numbers = false;
    let report = Controller::with_config(config)?.check_file(&path)?;
    assert_eq!(report.count(FindingKind::Marker), 1);
    assert_eq!(report.count(FindingKind::Number), 0);

    Ok(())
}

/// Custom element names are honored
#[test]
fn test_checkText_withCustomLayout_shouldReadRows() -> Result<()> {
    let mut config = Config::default();
    config.source_language = "en".to_string();
    config.target_language = "de".to_string();
    config.document.root_element = "table".to_string();
    config.document.class_attribute = "kind".to_string();
    config.document.row_element = "entry".to_string();
    config.document.row_id_attribute = "key".to_string();
    config.document.channel_element = "text".to_string();
    config.document.language_attribute = "lang".to_string();

    let document = r#"<table kind="dialog">
        <entry key="gold"><text lang="en">You have 1,000 gold</text><text lang="de">Du hast 1.000 Gold</text></entry>
        <entry key="silver"><text lang="en">You have 2,000 silver</text><text lang="de">Du hast 200 Silber</text></entry>
    </table>"#;

    let report = Controller::with_config(config)?.check_text(document)?;

    assert_eq!(report.document_class(), Some("dialog"));
    assert_eq!(report.rows_checked(), 2);
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings()[0].row_id(), "silver");

    Ok(())
}
