//! Analyzer configuration loaded from TOML.
//!
//! Hosts embedding the widget can ship a `postkit.toml` to retune the
//! scoring bands. Every field is optional; omitted values keep the
//! documented defaults.
//!
//! ```toml
//! [seo]
//! words_good = 400
//!
//! [readability]
//! long_sentence_words = 30
//! ```

use std::path::{Path, PathBuf};

use postkit_analyzer::{ReadabilityThresholds, SeoThresholds};
use serde::Deserialize;

/// Threshold overrides for both analyzers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub seo: SeoThresholds,
    pub readability: ReadabilityThresholds,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AnalyzerConfig {
    /// Load threshold overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing, unreadable, or not valid
    /// TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
