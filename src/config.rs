//! JSON configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::request::FontOverrides;
use crate::text::TextFit;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "QRSTYLER_CONFIG";

/// Values a config file may supply; every field is optional.
///
/// Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// URL to encode.
    pub url: Option<String>,
    /// Design name.
    pub design: Option<String>,
    /// Output file name.
    pub output: Option<String>,
    /// Title text.
    pub title: Option<String>,
    /// Subtitle text.
    pub subtitle: Option<String>,
    /// Footer text.
    pub footer: Option<String>,
    /// Text overflow policy.
    pub text_fit: Option<TextFit>,
    /// Per-field font files.
    pub fonts: Option<FontOverrides>,
}

impl FileConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not valid JSON.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Invalid JSON in config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `QRSTYLER_CONFIG` environment variable
///
/// Returns `None` when neither is set; running without a config is normal.
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(PathBuf::from(p));
    }
    std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty()).map(PathBuf::from)
}
