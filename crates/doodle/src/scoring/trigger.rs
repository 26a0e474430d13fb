//! Bridge from document write events to the scorer.

use tracing::debug;

use super::attempt::{Attempt, AttemptStatus};
use super::scorer::{AttemptScorer, ScoreOutcome};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Score,
    /// The attempt document was deleted.
    IgnoreDeleted,
    /// The write did not move the attempt into `pending`.
    IgnoreNotBecamePending,
    IgnoreAlreadyScored,
}

/// Decide whether a write to an attempt document should start scoring.
///
/// Only the transition into `pending` starts scoring, so the scorer's own
/// writes (to `scored` or `error`) never re-trigger it.
pub fn on_attempt_write(before: Option<&Attempt>, after: Option<&Attempt>) -> TriggerAction {
    let Some(after) = after else {
        return TriggerAction::IgnoreDeleted;
    };
    let was_pending = before.is_some_and(|b| b.status == AttemptStatus::Pending);
    if after.status != AttemptStatus::Pending || was_pending {
        return TriggerAction::IgnoreNotBecamePending;
    }
    if after.is_scored() {
        return TriggerAction::IgnoreAlreadyScored;
    }
    TriggerAction::Score
}

impl AttemptScorer<'_> {
    /// Handle a write event for `attempt_id`. Returns `None` when ignored.
    pub fn handle_write(
        &self,
        attempt_id: &str,
        before: Option<&Attempt>,
        after: Option<&Attempt>,
    ) -> Result<Option<ScoreOutcome>> {
        match on_attempt_write(before, after) {
            TriggerAction::Score => self.score(attempt_id).map(Some),
            action => {
                debug!("Ignoring write to {}: {:?}", attempt_id, action);
                Ok(None)
            }
        }
    }
}
