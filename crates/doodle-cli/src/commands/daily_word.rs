//! Daily word command: what a scheduler runs once per day.

use anyhow::Result;
use doodle::{AppConfig, Generated, generate_daily_word};

use crate::cli_utils;

pub fn run(config: &AppConfig, date: Option<&str>, bank: Option<&str>) -> Result<()> {
    let date = cli_utils::resolve_date(date)?;
    let bank = cli_utils::load_word_bank(config, bank)?;
    let (documents, _) = cli_utils::open_stores(config);

    let generated = generate_daily_word(&documents, &bank, date)?;
    let word = generated.word();
    let state = match generated {
        Generated::Created(_) => "created",
        Generated::Existing(_) => "existing",
    };
    println!(
        "{}: {} ({}, threshold {:.2}, mode {}) [{}]",
        word.date, word.word, word.difficulty, word.threshold, word.mode, state
    );
    Ok(())
}
