use chrono::Utc;
use tracing::info;

use super::bank::WordBank;
use super::select::select_word;
use super::word::DailyWord;
use crate::config::daily::DEFAULT_MODE;
use crate::date::DateKey;
use crate::error::Result;
use crate::store::DocumentStore;

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Created(DailyWord),
    /// A record for the date already existed and was left as is.
    Existing(DailyWord),
}

impl Generated {
    pub fn word(&self) -> &DailyWord {
        match self {
            Self::Created(w) | Self::Existing(w) => w,
        }
    }
}

/// Build the daily word record for `date` without storing it.
pub fn build_daily_word(bank: &WordBank, date: DateKey) -> Result<DailyWord> {
    let (difficulty, word) = select_word(bank, date)?;
    Ok(DailyWord {
        date,
        word,
        difficulty,
        threshold: difficulty.threshold(),
        mode: DEFAULT_MODE.to_string(),
        created_at: Some(Utc::now()),
    })
}

/// Generate and store the word for `date`. A no-op if one exists.
pub fn generate_daily_word(
    store: &dyn DocumentStore,
    bank: &WordBank,
    date: DateKey,
) -> Result<Generated> {
    if let Some(existing) = store.daily_word(date)? {
        return Ok(Generated::Existing(existing));
    }

    let word = build_daily_word(bank, date)?;
    if store.create_daily_word(&word)? {
        info!(
            "Daily word for {}: '{}' ({}, threshold {:.2})",
            date, word.word, word.difficulty, word.threshold
        );
        return Ok(Generated::Created(word));
    }

    // Lost a race with another generator; report what was stored.
    match store.daily_word(date)? {
        Some(existing) => Ok(Generated::Existing(existing)),
        None => Ok(Generated::Existing(word)),
    }
}
