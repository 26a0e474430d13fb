use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::DateKey;

/// A player's running points and streak record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub points_total: u64,
    pub streak_current: u32,
    pub streak_best: u32,
    pub last_win_date: Option<DateKey>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a win on `date`.
    ///
    /// The streak continues only if the previous win was the day before
    /// `date` itself; any other gap restarts it at 1.
    pub fn record_win(&mut self, date: DateKey) {
        self.streak_current = if self.last_win_date == Some(date.previous_day()) {
            self.streak_current.saturating_add(1)
        } else {
            1
        };
        self.streak_best = self.streak_best.max(self.streak_current);
        self.points_total = self.points_total.saturating_add(1);
        self.last_win_date = Some(date);
    }
}
