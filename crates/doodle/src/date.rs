//! Calendar date keys (`yyyy-mm-dd`, UTC).

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const FORMAT: &str = "%Y-%m-%d";

/// A calendar day identifier in `yyyy-mm-dd` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Today's key in UTC.
    pub fn today_utc() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Parse a strict `yyyy-mm-dd` key.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if !is_valid_date_key(s) {
            return Err(Error::InvalidDateKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidDateKey(s.to_string()))
    }

    /// The calendar day before this one, rolling over months and years.
    pub fn previous_day(&self) -> Self {
        // NaiveDate::MIN has no predecessor; keep it rather than panic
        Self(self.0.checked_sub_days(Days::new(1)).unwrap_or(self.0))
    }
}

/// Shape check only: four digits, dash, two digits, dash, two digits.
pub fn is_valid_date_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
