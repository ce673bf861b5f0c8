/*!
 * Common test utilities for the slpcheck test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Escape text for use inside an XML element
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Builds an en/pl localization document from `(id, en, pl)` rows
pub fn slp_document(class: &str, rows: &[(&str, &str, &str)]) -> String {
    let mut document = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<source class=\"{}\">\n", class);
    for (id, en, pl) in rows {
        document.push_str(&format!(
            "  <row id=\"{}\">\n    <lang id=\"en\">{}</lang>\n    <lang id=\"pl\">{}</lang>\n  </row>\n",
            id,
            escape_xml(en),
            escape_xml(pl)
        ));
    }
    document.push_str("</source>\n");
    document
}

/// Writes an en/pl localization document into `dir`
pub fn create_test_document(dir: &Path, filename: &str, rows: &[(&str, &str, &str)]) -> Result<PathBuf> {
    create_test_file(dir, filename, &slp_document("ui", rows))
}

/// A document whose second row has a mismatched end tag
pub fn create_malformed_document(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"<source class="ui">
  <row id="intro">
    <lang id="en">Found %{count}s items</lang>
    <lang id="pl">Znaleziono elementy</lang>
  </row>
  <row id="outro">
    <lang id="en">Bye</lang>
    <lang id="pl">Pa</row>
</source>
"#;
    create_test_file(dir, filename, content)
}

/// Route library logging through env_logger while testing
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
