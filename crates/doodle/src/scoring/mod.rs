//! Attempt scoring.
//!
//! This module contains:
//! - `Attempt`, `AttemptStatus` - the scored record
//! - `UserProgress` - points and streaks
//! - `Classifier`, `OpenAiClassifier` - the vision model seam and JSON extraction
//! - `AttemptScorer` - the `pending → scored | error` state machine
//! - `on_attempt_write` - the write-trigger adapter

mod attempt;
mod classifier;
mod normalize;
mod progress;
mod scorer;
mod trigger;

pub use attempt::*;
pub use classifier::*;
pub use normalize::*;
pub use progress::*;
pub use scorer::*;
pub use trigger::*;
