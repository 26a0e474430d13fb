use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::daily::THRESHOLDS;
use crate::date::DateKey;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy = 0,
    Medium = 1,
    Hard = 2,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Minimum classifier confidence for a win at this tier.
    pub fn threshold(&self) -> f64 {
        THRESHOLDS[*self as usize]
    }
}

/// The word of the day. Written once per date key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWord {
    pub date: DateKey,
    pub word: String,
    pub difficulty: Difficulty,
    pub threshold: f64,
    pub mode: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
