//! CLI command implementations.

pub mod daily_word;
pub mod fill;
pub mod progress;
pub mod score;
pub mod submit;
