//! Configuration and tuning constants.
//!
//! This module contains:
//! - `AppConfig` - runtime configuration loaded from `doodle.toml`
//! - Fill, edge-seal, scoring, history and daily-word constants

mod app;

pub use app::*;

/// Bucket fill configuration.
pub mod fill {
    /// Upper bound of the fill tolerance slider.
    pub const MAX_TOLERANCE: u8 = 160;

    /// Tolerance used by the drawing tool unless the player changes it.
    pub const DEFAULT_TOLERANCE: u8 = 35;

    /// Diagonal connectivity is on by default in the drawing tool.
    pub const DEFAULT_DIAGONALS: bool = true;

    /// Number of edge-seal passes run after the main fill.
    ///
    /// Two passes let a sealed fringe pixel seal one further neighbour.
    pub const SEAL_PASSES: usize = 2;

    /// Pixels with alpha below this (about 90% opaque) are sealed regardless of color.
    pub const SEAL_ALPHA_CUTOFF: u8 = 230;
}

/// Attempt scoring configuration.
pub mod scoring {
    /// Win threshold applied when an attempt carries none.
    pub const DEFAULT_THRESHOLD: f64 = 0.75;

    /// Maximum number of characters of raw model output kept on an error record.
    pub const RAW_TEXT_LIMIT: usize = 2000;

    /// Instructions sent with every classification request.
    pub const CLASSIFIER_INSTRUCTIONS: &str = "You are an image classifier for simple doodles. \
        Return ONLY valid JSON: {\"guess\":\"...\", \"confidence\":0..1}. \
        guess must be one short lowercase word. No extra text.";

    /// Default model for the OpenAI classifier.
    pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

    /// Default OpenAI API base URL.
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    /// Global timeout for one classification request, in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}

/// Canvas history configuration.
pub mod history {
    /// Maximum number of undo snapshots kept by a canvas.
    pub const MAX_UNDO: usize = 40;
}

/// Daily word configuration.
pub mod daily {
    /// Mode tag written on generated daily words.
    pub const DEFAULT_MODE: &str = "classic";

    /// Win thresholds per difficulty tier (easy, medium, hard).
    pub const THRESHOLDS: [f64; 3] = [0.7, 0.75, 0.8];
}
