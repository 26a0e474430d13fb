//! Common CLI utility functions shared across commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use doodle::{AppConfig, DateKey, FsRasterStore, JsonFileStore, WordBank};
use tracing::debug;

const DOCUMENTS_FILE: &str = "documents.json";
const RASTERS_DIR: &str = "rasters";

/// Load the config file (defaults if absent) and apply the data dir override.
pub fn load_config(path: &str, data_dir: Option<&str>) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config from {}", path))?;
    if let Some(dir) = data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    debug!("Data directory: {}", config.data_dir.display());
    Ok(config)
}

/// Document and raster stores rooted at the configured data directory.
pub fn open_stores(config: &AppConfig) -> (JsonFileStore, FsRasterStore) {
    (
        JsonFileStore::new(config.data_dir.join(DOCUMENTS_FILE)),
        FsRasterStore::new(config.data_dir.join(RASTERS_DIR)),
    )
}

/// Parse a date key, defaulting to today in UTC.
pub fn resolve_date(date: Option<&str>) -> Result<DateKey> {
    match date {
        Some(s) => Ok(DateKey::parse(s)?),
        None => Ok(DateKey::today_utc()),
    }
}

/// Word bank from the flag, then the config, then the built-in list.
pub fn load_word_bank(config: &AppConfig, bank: Option<&str>) -> Result<WordBank> {
    let path = bank.map(PathBuf::from).or_else(|| config.word_bank.clone());
    match path {
        Some(path) => WordBank::load(&path)
            .with_context(|| format!("Failed to load word bank from {}", path.display())),
        None => Ok(WordBank::builtin()),
    }
}
