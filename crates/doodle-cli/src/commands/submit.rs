//! Submit command: upload a doodle for the day's word.

use std::fs;

use anyhow::{Context, Result};
use doodle::{AppConfig, DocumentStore, Error, submit_doodle};

use crate::cli_utils;

pub fn run(config: &AppConfig, uid: &str, image: &str, date: Option<&str>) -> Result<()> {
    let date = cli_utils::resolve_date(date)?;
    let (documents, rasters) = cli_utils::open_stores(config);

    let daily = documents
        .daily_word(date)?
        .ok_or_else(|| Error::DailyWordNotFound(date.to_string()))?;
    let png = fs::read(image).with_context(|| format!("Failed to read {}", image))?;

    let submission = submit_doodle(&documents, &rasters, uid, &daily, &png)?;

    println!(
        "Submitted attempt {} ({})",
        submission.attempt_id, submission.attempt.storage_path
    );
    if submission.previous.is_some() {
        eprintln!("Replaced an earlier unscored submission");
    }
    Ok(())
}
