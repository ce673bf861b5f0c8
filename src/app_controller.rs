use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::document::{ChannelMap, RowReader};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::output::{self, OutputFormat, TextPrinter};
use crate::verification::{DocumentVerifier, Report};

// @module: Application controller for document verification

/// Outcome of a run over one file or a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents verified completely
    pub files_checked: usize,
    /// Documents that failed to parse
    pub files_failed: usize,
    /// Findings across all verified documents
    pub findings: usize,
}

/// Main application controller for localization checks
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Console printer for text output
    printer: TextPrinter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let printer = TextPrinter::new(&config.source_language, &config.target_language);
        Ok(Self { config, printer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn channel_map(&self) -> ChannelMap {
        ChannelMap::new(&self.config.source_language, &self.config.target_language)
    }

    /// Verify a document held in memory
    pub fn check_text(&self, text: &str) -> Result<Report> {
        let rows = RowReader::from_text(text, self.config.document.clone(), self.channel_map());
        let report = DocumentVerifier::from_config(&self.config)?.verify_document(rows)?;
        Ok(report)
    }

    /// Verify one document file; each file gets a fresh detection state
    pub fn check_file<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        let path = path.as_ref();
        debug!("Checking {:?}", path);

        verify_file(path, &self.config).with_context(|| format!("Failed to check document: {:?}", path))
    }

    /// Verify a file or every matching file below a directory, writing reports to `out`
    pub fn run<W: Write>(&self, input_path: &Path, format: OutputFormat, out: &mut W) -> Result<RunSummary> {
        if FileManager::file_exists(input_path) {
            self.run_file(input_path, format, out)
        } else if FileManager::dir_exists(input_path) {
            self.run_folder(input_path, format, out)
        } else {
            Err(anyhow!("Input path does not exist: {:?}", input_path))
        }
    }

    /// Run a single document; a parse error fails the run
    pub fn run_file<W: Write>(&self, input_file: &Path, format: OutputFormat, out: &mut W) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        let report = self.check_file(input_file)?;
        let rendered = output::render(format, &self.printer, input_file, &report)?;
        writeln!(out, "{}", rendered.trim_end()).context("Failed to write report")?;

        info!(
            "Checked {:?} in {}: {}",
            input_file,
            Self::format_duration(start_time.elapsed()),
            report.summary()
        );

        Ok(RunSummary {
            files_checked: 1,
            files_failed: 0,
            findings: report.len(),
        })
    }

    /// Run the workflow in folder mode, verifying all documents in a directory
    /// Documents that fail to parse are logged and counted; the others are still checked
    pub fn run_folder<W: Write>(&self, input_dir: &Path, format: OutputFormat, out: &mut W) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        let files = FileManager::find_files(input_dir, &self.config.file_extension)?;
        if files.is_empty() {
            warn!(
                "No .{} files found in directory: {:?}",
                self.config.file_extension.trim_start_matches('.'),
                input_dir
            );
            return Ok(RunSummary::default());
        }

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = RunSummary::default();
        let mut json_outcomes: Vec<(PathBuf, std::result::Result<Report, String>)> = Vec::new();

        for file in &files {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Checking: {}", file_name));

            match self.check_file(file) {
                Ok(report) => {
                    summary.files_checked += 1;
                    summary.findings += report.len();

                    match format {
                        OutputFormat::Text => {
                            let rendered = self.printer.render(file, &report);
                            folder_pb.suspend(|| writeln!(out, "{}", rendered.trim_end()))
                                .context("Failed to write report")?;
                        }
                        OutputFormat::Json => json_outcomes.push((file.clone(), Ok(report))),
                    }
                }
                Err(e) => {
                    folder_pb.suspend(|| error!("Error checking file {}: {:#}", file_name, e));
                    summary.files_failed += 1;
                    if format == OutputFormat::Json {
                        json_outcomes.push((file.clone(), Err(format!("{:#}", e))));
                    }
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        if format == OutputFormat::Json {
            let rendered = output::render_json_all(&json_outcomes)?;
            writeln!(out, "{}", rendered).context("Failed to write report")?;
        }

        info!(
            "Folder check completed in {}: {} checked, {} failed, {} problems",
            Self::format_duration(start_time.elapsed()),
            summary.files_checked,
            summary.files_failed,
            summary.findings
        );

        Ok(summary)
    }

    fn format_duration(duration: Duration) -> String {
        let seconds = duration.as_secs();
        if seconds >= 60 {
            format!("{}m {}s", seconds / 60, seconds % 60)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Verify a single document file with typed errors for library consumers
pub fn verify_file<P: AsRef<Path>>(path: P, config: &Config) -> std::result::Result<Report, AppError> {
    let path = path.as_ref();
    if !FileManager::file_exists(path) {
        return Err(AppError::File(format!("Not a readable file: {:?}", path)));
    }

    let verifier = DocumentVerifier::from_config(config)
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    let channels = ChannelMap::new(&config.source_language, &config.target_language);
    let rows = RowReader::from_file(path, config.document.clone(), channels)?;

    Ok(verifier.verify_document(rows)?)
}
