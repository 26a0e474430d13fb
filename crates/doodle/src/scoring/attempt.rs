use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::{daily::DEFAULT_MODE, scoring::DEFAULT_THRESHOLD};
use crate::date::DateKey;

/// Deterministic attempt identifier: one attempt per user per day.
pub fn attempt_id(uid: &str, date: DateKey) -> String {
    format!("{}_{}", uid, date)
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttemptStatus {
    #[default]
    Pending,
    Scored,
    Error,
}

/// One scoring cycle for a submitted doodle.
///
/// Fields mirror the stored document; required fields may be empty on a
/// malformed record and are validated by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attempt {
    pub uid: String,
    pub word: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub threshold: Option<f64>,
    pub storage_path: String,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: AttemptStatus,
    pub openai_guess: Option<String>,
    pub confidence: Option<f64>,
    pub is_win: Option<bool>,
    pub scored_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_model_text: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Attempt {
    /// A freshly submitted attempt awaiting scoring.
    pub fn pending(
        uid: &str,
        date: DateKey,
        word: &str,
        storage_path: &str,
        threshold: f64,
    ) -> Self {
        Self {
            uid: uid.to_string(),
            word: word.to_string(),
            date: date.to_string(),
            mode: Some(DEFAULT_MODE.to_string()),
            threshold: Some(threshold),
            storage_path: storage_path.to_string(),
            created_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Win threshold, falling back to the default when absent or not finite.
    pub fn effective_threshold(&self) -> f64 {
        self.threshold
            .filter(|t| t.is_finite())
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn is_scored(&self) -> bool {
        self.scored_at.is_some()
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("uid", &self.uid),
            ("word", &self.word),
            ("date", &self.date),
            ("storagePath", &self.storage_path),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
