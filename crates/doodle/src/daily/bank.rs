use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::word::Difficulty;
use crate::error::Result;

const BUILTIN_EASY: &[&str] = &[
    "cat", "dog", "house", "sun", "tree", "fish", "car", "apple", "star", "moon", "ball", "cup",
    "hat", "boat", "flower", "cloud", "heart", "book", "key", "egg",
];

const BUILTIN_MEDIUM: &[&str] = &[
    "bicycle", "guitar", "umbrella", "rocket", "castle", "snowman", "penguin", "glasses", "ladder",
    "butterfly", "anchor", "pizza", "kite", "camera", "turtle", "candle", "mushroom", "whale",
];

const BUILTIN_HARD: &[&str] = &[
    "lighthouse", "saxophone", "helicopter", "octopus", "windmill", "skateboard", "volcano",
    "telescope", "kangaroo", "hourglass", "submarine", "cactus", "dragon", "microscope",
];

/// Candidate words partitioned by difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordBank {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl WordBank {
    /// The bank shipped with the crate.
    pub fn builtin() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            easy: owned(BUILTIN_EASY),
            medium: owned(BUILTIN_MEDIUM),
            hard: owned(BUILTIN_HARD),
        }
    }

    /// Load a bank from JSON: `{"easy": [...], "medium": [...], "hard": [...]}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}
