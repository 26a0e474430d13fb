use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{fill, scoring};
use crate::error::{Error, Result};

/// Runtime configuration, usually read from `doodle.toml`.
///
/// Every field has a default so a partial file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Root of the local raster store and document file.
    pub data_dir: PathBuf,
    /// Optional word bank JSON; the built-in bank is used otherwise.
    pub word_bank: Option<PathBuf>,
    pub classifier: ClassifierConfig,
    pub fill: FillDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillDefaults {
    pub tolerance: u8,
    pub diagonals: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".doodle"),
            word_bank: None,
            classifier: ClassifierConfig::default(),
            fill: FillDefaults::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: scoring::DEFAULT_MODEL.to_string(),
            api_base: scoring::DEFAULT_API_BASE.to_string(),
            timeout_secs: scoring::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FillDefaults {
    fn default() -> Self {
        Self {
            tolerance: fill::DEFAULT_TOLERANCE,
            diagonals: fill::DEFAULT_DIAGONALS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration if the file exists, falling back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.fill.tolerance, 35);
        assert!(config.fill.diagonals);
        assert_eq!(config.classifier.model, "gpt-4.1-mini");
    }

    #[test]
    fn test_parse_partial_config() {
        let content = r#"
data_dir = "/var/lib/doodle"

[classifier]
timeout_secs = 15

[fill]
diagonals = false
"#;
        let config = AppConfig::parse(content).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/doodle"));
        assert_eq!(config.classifier.timeout(), Duration::from_secs(15));
        assert_eq!(config.classifier.api_base, "https://api.openai.com/v1");
        assert!(!config.fill.diagonals);
        assert_eq!(config.fill.tolerance, 35);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = AppConfig::parse("colour = \"red\"");
        assert!(matches!(result, Err(Error::ConfigParseError(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("doodle.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
