//! Daily word selection.
//!
//! This module contains:
//! - `Difficulty`, `DailyWord` - the stored record
//! - `WordBank` - candidate words per tier
//! - `select_word` - FNV-1a seeded deterministic choice
//! - `generate_daily_word` - idempotent create-if-absent

mod bank;
mod generator;
mod select;
mod word;

pub use bank::*;
pub use generator::*;
pub use select::*;
pub use word::*;
