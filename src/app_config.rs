use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::verification::numbers::grouping_for_language;

/// Application configuration, read from `conf.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language id of the source channel (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language id of the target channel (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Extension of localization files picked up in directory mode
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Document layout (element and attribute names)
    #[serde(default)]
    pub document: DocumentConfig,

    /// Verification settings
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Names of the elements and attributes that carry the table structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentConfig {
    /// Root element holding the document class
    #[serde(default = "default_root_element")]
    pub root_element: String,

    /// Attribute of the root element naming the document class
    #[serde(default = "default_class_attribute")]
    pub class_attribute: String,

    /// One element per translation unit
    #[serde(default = "default_row_element")]
    pub row_element: String,

    /// Row identifier attribute
    #[serde(default = "default_id_attribute")]
    pub row_id_attribute: String,

    /// Element wrapping the text of one language
    #[serde(default = "default_channel_element")]
    pub channel_element: String,

    /// Language id attribute of the channel element
    #[serde(default = "default_id_attribute")]
    pub language_attribute: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            root_element: default_root_element(),
            class_attribute: default_class_attribute(),
            row_element: default_row_element(),
            row_id_attribute: default_id_attribute(),
            channel_element: default_channel_element(),
            language_attribute: default_id_attribute(),
        }
    }
}

/// How the placeholder syntax is chosen for each row
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// The first detected syntax is kept for the rest of the document
    #[default]
    Sticky,
    /// The syntax is detected again for every row
    PerRow,
}

/// Outcome when neither side's number could be normalized
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnparsableNumberPolicy {
    /// Report a number mismatch
    #[default]
    Mismatch,
    /// Treat the two unparsable numbers as equal
    Equal,
}

/// Verification settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerificationConfig {
    /// Run the marker consistency check
    #[serde(default = "default_true")]
    pub check_markers: bool,

    /// Run the numeric consistency check
    #[serde(default = "default_true")]
    pub check_numbers: bool,

    /// Placeholder detection policy
    #[serde(default)]
    pub marker_detection: DetectionPolicy,

    /// Double-unparsable number policy
    #[serde(default)]
    pub unparsable_numbers: UnparsableNumberPolicy,

    /// Per-language grouping character overrides (e.g. `{"de": "'"}`)
    #[serde(default)]
    pub number_grouping: BTreeMap<String, char>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            check_markers: true,
            check_numbers: true,
            marker_detection: DetectionPolicy::default(),
            unparsable_numbers: UnparsableNumberPolicy::default(),
            number_grouping: BTreeMap::new(),
        }
    }
}

impl VerificationConfig {
    /// Grouping character for a language: overrides first, then the built-in table
    pub fn grouping_for(&self, language: &str) -> Option<char> {
        self.number_grouping
            .iter()
            .find(|(code, _)| crate::language_utils::language_codes_match(code, language))
            .map(|(_, grouping)| *grouping)
            .or_else(|| grouping_for_language(language))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "pl".to_string()
}

fn default_file_extension() -> String {
    "slp".to_string()
}

fn default_root_element() -> String {
    "source".to_string()
}

fn default_class_attribute() -> String {
    "class".to_string()
}

fn default_row_element() -> String {
    "row".to_string()
}

fn default_channel_element() -> String {
    "lang".to_string()
}

fn default_id_attribute() -> String {
    "id".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        crate::file_utils::FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if crate::language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language must differ (both are '{}')",
                self.source_language
            ));
        }

        for language in [&self.source_language, &self.target_language] {
            crate::language_utils::get_language_name(language)
                .with_context(|| format!("Unsupported language code: {}", language))?;

            if self.verification.check_numbers && self.verification.grouping_for(language).is_none() {
                return Err(anyhow!(
                    "No number grouping character known for '{}', add one under verification.number_grouping",
                    language
                ));
            }
        }

        for (code, grouping) in &self.verification.number_grouping {
            if grouping.is_ascii_digit() {
                return Err(anyhow!("Grouping character for '{}' cannot be a digit", code));
            }
        }

        let document = &self.document;
        let names = [
            &document.root_element,
            &document.class_attribute,
            &document.row_element,
            &document.row_id_attribute,
            &document.channel_element,
            &document.language_attribute,
        ];
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(anyhow!("Document element and attribute names cannot be empty"));
        }
        if document.row_element == document.channel_element {
            return Err(anyhow!("Row and channel elements must have different names"));
        }

        if self.file_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("File extension cannot be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            file_extension: default_file_extension(),
            document: DocumentConfig::default(),
            verification: VerificationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
