/*!
 * Report renderers.
 *
 * - Text: the console layout reviewers read directly
 * - JSON: machine-readable export of the findings
 */

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::language_utils;
use crate::verification::{Finding, Report};

const SEPARATOR: &str = "*********************************************";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Console printer labelling texts with their language codes
pub struct TextPrinter {
    source_label: String,
    target_label: String,
}

impl TextPrinter {
    pub fn new(source_language: &str, target_language: &str) -> Self {
        Self {
            source_label: language_utils::channel_label(source_language),
            target_label: language_utils::channel_label(target_language),
        }
    }

    /// Render a report as the banner-and-blocks console listing
    pub fn render(&self, file: &Path, report: &Report) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", SEPARATOR);
        let _ = writeln!(out, "Problems in file: {}", file.display());
        let _ = writeln!(out, "Found {} problems", report.len());
        let _ = writeln!(out, "{}", SEPARATOR);

        for finding in report {
            self.render_finding(&mut out, finding);
            let _ = writeln!(out, "{}", SEPARATOR);
        }

        out
    }

    fn render_finding(&self, out: &mut String, finding: &Finding) {
        let _ = writeln!(out, "[ID]\t{}", finding.row_id());
        match finding {
            Finding::MarkerMismatch { marker, .. } => {
                let _ = writeln!(out, "[TAG]\t{}", marker);
            }
            Finding::NumberMismatch {
                source_number,
                target_number,
                ..
            } => {
                let _ = writeln!(
                    out,
                    "[ER]\tnumber! {} -> {}",
                    source_number,
                    target_number.as_deref().unwrap_or("(not found)")
                );
            }
        }
        let _ = writeln!(out, "[{}]\t{}", self.source_label, finding.source_text());
        let _ = writeln!(out, "[{}]\t{}", self.target_label, finding.target_text());
    }
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Render a report as pretty JSON, tagged with the file it came from
pub fn render_json(file: &Path, report: &Report) -> Result<String> {
    let payload = FileReport {
        file: file.display().to_string(),
        report: Some(report),
        error: None,
    };
    serde_json::to_string_pretty(&payload).context("Failed to serialize report to JSON")
}

/// Render the outcomes of several files as one JSON array
///
/// A file that could not be checked gets an `error` entry instead of a `report`.
pub fn render_json_all(outcomes: &[(PathBuf, std::result::Result<Report, String>)]) -> Result<String> {
    let payload: Vec<FileReport<'_>> = outcomes
        .iter()
        .map(|(file, outcome)| FileReport {
            file: file.display().to_string(),
            report: outcome.as_ref().ok(),
            error: outcome.as_ref().err().map(String::as_str),
        })
        .collect();
    serde_json::to_string_pretty(&payload).context("Failed to serialize reports to JSON")
}

/// Render in the requested format
pub fn render(format: OutputFormat, printer: &TextPrinter, file: &Path, report: &Report) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(printer.render(file, report)),
        OutputFormat::Json => render_json(file, report),
    }
}
