// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use slpcheck::app_config::{self, Config, DetectionPolicy};
use slpcheck::app_controller::Controller;
use slpcheck::output::OutputFormat;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum CliOutputFormat {
    #[default]
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify localization documents (default command)
    #[command(alias = "verify")]
    Check(CheckArgs),

    /// Generate shell completions for slpcheck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the default configuration file
    InitConfig {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Localization file or directory to verify
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language id of the documents (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language id of the documents (e.g., 'pl')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Text)]
    output_format: CliOutputFormat,

    /// Detect the placeholder syntax again for every row
    #[arg(long)]
    per_row_detection: bool,

    /// Exit with status 1 when any problem is reported
    #[arg(long)]
    fail_on_findings: bool,
}

/// slpcheck - Localization table verifier
///
/// Checks bilingual localization documents for placeholders dropped from
/// the translation and numbers that changed between languages.
#[derive(Parser, Debug)]
#[command(name = "slpcheck")]
#[command(version)]
#[command(about = "Placeholder and number checker for bilingual localization files")]
#[command(long_about = "slpcheck reads .slp localization documents and reports rows whose translation lost a placeholder or changed a number.

EXAMPLES:
    slpcheck menu.slp                          # Check one document with the default config
    slpcheck -s en -t de menu.slp              # Check an English/German document
    slpcheck -o json strings/ > report.json    # Check a directory, JSON report
    slpcheck --per-row-detection menu.slp      # Detect the placeholder syntax per row
    slpcheck --fail-on-findings strings/       # Exit with status 1 on any problem
    slpcheck init-config                       # Write conf.json with the defaults
    slpcheck completions bash > slpcheck.bash  # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, the built-in
    defaults are used; run `slpcheck init-config` to write them out.

PLACEHOLDER SYNTAXES (first match wins for the whole document):
    %{name}s   %(name)s   {0}   {name}")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Localization file or directory to verify
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Source language id of the documents (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language id of the documents (e.g., 'pl')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Text)]
    output_format: CliOutputFormat,

    /// Detect the placeholder syntax again for every row
    #[arg(long)]
    per_row_detection: bool,

    /// Exit with status 1 when any problem is reported
    #[arg(long)]
    fail_on_findings: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and prefix for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, prefix) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "slpcheck", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { config_path, force }) => init_config(&config_path, force),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            // Default behavior - top-level args act as the check subcommand
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let check_args = CheckArgs {
                input_path,
                source_language: cli.source_language,
                target_language: cli.target_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
                output_format: cli.output_format,
                per_row_detection: cli.per_row_detection,
                fail_on_findings: cli.fail_on_findings,
            };
            run_check(check_args)
        }
    }
}

fn init_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        return Err(anyhow!(
            "Config file already exists: {:?}. Use --force to overwrite.",
            config_path
        ));
    }

    Config::default().save(config_path)?;
    info!("Default configuration written to {:?}", config_path);
    Ok(())
}

fn load_config(options: &CheckArgs) -> Result<Config> {
    let mut config = if options.config_path.exists() {
        Config::from_file(&options.config_path)?
    } else {
        warn!(
            "Config file not found at {:?}, using default settings.",
            options.config_path
        );
        Config::default()
    };

    // Override config with CLI options if provided
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if options.per_row_detection {
        config.verification.marker_detection = DetectionPolicy::PerRow;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn run_check(options: CheckArgs) -> Result<()> {
    // If log level is set via command line, apply it before the config is read
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&options)?;
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = controller
        .run(&options.input_path, options.output_format.into(), &mut out)
        .with_context(|| format!("Verification failed for {:?}", options.input_path))?;
    out.flush().context("Failed to flush report")?;

    if summary.files_failed > 0 {
        return Err(anyhow!(
            "{} of {} documents could not be parsed",
            summary.files_failed,
            summary.files_failed + summary.files_checked
        ));
    }

    if options.fail_on_findings && summary.findings > 0 {
        std::process::exit(1);
    }

    Ok(())
}
