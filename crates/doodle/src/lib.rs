//! # doodle
//!
//! Core library for the Daily Doodle game.
//!
//! This crate provides:
//! - The bucket fill engine and drawing canvas (`raster`)
//! - The attempt scoring state machine and its classifier seam (`scoring`)
//! - Deterministic daily word selection (`daily`)
//! - Storage collaborators for rasters and documents (`store`)
//! - Date keys and the submission flow

pub mod config;
pub mod daily;
pub mod date;
pub mod error;
pub mod raster;
pub mod scoring;
pub mod store;
pub mod submit;

// Re-export from config module
pub use config::{AppConfig, ClassifierConfig, FillDefaults};

// Re-export from daily module
pub use daily::{
    DailyWord, Difficulty, Generated, WordBank, build_daily_word, generate_daily_word, select_word,
};

pub use date::DateKey;

// Re-export from error module
pub use error::{Error, Result};

// Re-export from raster module
pub use raster::{Canvas, FillReport, FillRequest, flood_fill, parse_hex_color, to_hex};

// Re-export from scoring module
pub use scoring::{
    Attempt, AttemptScorer, AttemptStatus, Classifier, OpenAiClassifier, ScoreOutcome, SkipReason,
    UserProgress, Verdict, attempt_id, clamp_confidence, normalize_word, on_attempt_write,
};

// Re-export from store module
pub use store::{
    DocumentStore, FsRasterStore, JsonFileStore, MemoryDocumentStore, MemoryRasterStore,
    RasterStore,
};

pub use submit::{Submission, submit_doodle};
