//! Attempt scoring state machine.
//!
//! `pending → scored` or `pending → error`, exactly once per attempt.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::attempt::{Attempt, AttemptStatus};
use super::classifier::{Classifier, parse_guess};
use super::normalize::normalize_word;
use super::progress::UserProgress;
use crate::config::scoring::{CLASSIFIER_INSTRUCTIONS, RAW_TEXT_LIMIT};
use crate::date::DateKey;
use crate::error::Result;
use crate::store::{DocumentStore, RasterStore, TxnWrite};

/// Final decision for a scored attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub guess: String,
    pub confidence: f64,
    pub threshold: f64,
    pub is_win: bool,
    /// The owner's progress after the transaction.
    pub progress: UserProgress,
}

/// Why a scoring request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    AlreadyScored,
    NotPending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Scored(Verdict),
    /// The attempt was moved to `error` with this message.
    Failed(String),
    Skipped(SkipReason),
}

/// Win rule: exact normalized match and confidence at or above the threshold.
pub fn is_win(guess: &str, target: &str, confidence: f64, threshold: f64) -> bool {
    normalize_word(guess) == normalize_word(target) && confidence >= threshold
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

/// Scores attempts against injected collaborators.
pub struct AttemptScorer<'a> {
    documents: &'a dyn DocumentStore,
    rasters: &'a dyn RasterStore,
    classifier: &'a dyn Classifier,
}

impl<'a> AttemptScorer<'a> {
    pub fn new(
        documents: &'a dyn DocumentStore,
        rasters: &'a dyn RasterStore,
        classifier: &'a dyn Classifier,
    ) -> Self {
        Self {
            documents,
            rasters,
            classifier,
        }
    }

    /// Score one attempt.
    ///
    /// Collaborator and validation failures are persisted on the attempt and
    /// reported as `ScoreOutcome::Failed`; only document store failures are
    /// returned as `Err`.
    pub fn score(&self, attempt_id: &str) -> Result<ScoreOutcome> {
        let Some(attempt) = self.documents.attempt(attempt_id)? else {
            debug!("Attempt {} not found", attempt_id);
            return Ok(ScoreOutcome::Skipped(SkipReason::NotFound));
        };
        if attempt.is_scored() {
            debug!("Attempt {} already scored", attempt_id);
            return Ok(ScoreOutcome::Skipped(SkipReason::AlreadyScored));
        }
        if attempt.status != AttemptStatus::Pending {
            debug!("Attempt {} is {}, not pending", attempt_id, attempt.status);
            return Ok(ScoreOutcome::Skipped(SkipReason::NotPending));
        }

        let missing = attempt.missing_fields();
        if !missing.is_empty() {
            return self.fail(attempt_id, "Missing uid/word/date/storagePath", None);
        }
        let date = match DateKey::parse(&attempt.date) {
            Ok(date) => date,
            Err(e) => return self.fail(attempt_id, &e.to_string(), None),
        };

        let image = match self.rasters.download(&attempt.storage_path) {
            Ok(bytes) => bytes,
            Err(e) => return self.fail(attempt_id, &e.to_string(), None),
        };

        let raw_text = match self
            .classifier
            .complete(CLASSIFIER_INSTRUCTIONS, &attempt.word, &image)
        {
            Ok(text) => text,
            Err(e) => return self.fail(attempt_id, &e.to_string(), None),
        };

        let Some(parsed) = parse_guess(&raw_text) else {
            return self.fail(
                attempt_id,
                "Model output was not valid JSON",
                Some(truncate_chars(&raw_text, RAW_TEXT_LIMIT)),
            );
        };

        let guess = normalize_word(&parsed.guess);
        let confidence = parsed.confidence;
        let threshold = attempt.effective_threshold();
        let win = is_win(&guess, &attempt.word, confidence, threshold);

        self.commit(attempt_id, &attempt.uid, date, guess, confidence, threshold, win)
    }

    #[allow(clippy::too_many_arguments)]
    fn commit(
        &self,
        attempt_id: &str,
        uid: &str,
        date: DateKey,
        guess: String,
        confidence: f64,
        threshold: f64,
        win: bool,
    ) -> Result<ScoreOutcome> {
        let mut applied: Option<UserProgress> = None;

        let committed = self
            .documents
            .transact(attempt_id, uid, &mut |current, progress| {
                // Compare-and-set on the idempotency marker.
                let Some(current) = current.filter(|a| !a.is_scored()) else {
                    return TxnWrite::Abort;
                };

                let now = Utc::now();
                let mut next = progress.cloned().unwrap_or_else(|| UserProgress {
                    created_at: Some(now),
                    ..UserProgress::default()
                });
                if win {
                    next.record_win(date);
                }
                next.updated_at = Some(now);

                let mut attempt = current.clone();
                attempt.status = AttemptStatus::Scored;
                attempt.openai_guess = Some(guess.clone());
                attempt.confidence = Some(confidence);
                attempt.is_win = Some(win);
                attempt.scored_at = Some(now);
                attempt.updated_at = Some(now);

                applied = Some(next.clone());
                TxnWrite::Commit {
                    attempt,
                    progress: Some(next),
                }
            })?;

        match applied.filter(|_| committed) {
            Some(progress) => {
                info!(
                    "Scored attempt {}: guess '{}' ({:.2} / {:.2}) {}",
                    attempt_id,
                    guess,
                    confidence,
                    threshold,
                    if win { "WIN" } else { "no win" }
                );
                Ok(ScoreOutcome::Scored(Verdict {
                    guess,
                    confidence,
                    threshold,
                    is_win: win,
                    progress,
                }))
            }
            None => {
                debug!("Attempt {} was scored concurrently", attempt_id);
                Ok(ScoreOutcome::Skipped(SkipReason::AlreadyScored))
            }
        }
    }

    /// Move the attempt to `error` unless it has been scored meanwhile.
    fn fail(
        &self,
        attempt_id: &str,
        message: &str,
        raw_text: Option<String>,
    ) -> Result<ScoreOutcome> {
        let committed = self.documents.transact(attempt_id, "", &mut |current, _| {
            let Some(current) = current.filter(|a| !a.is_scored()) else {
                return TxnWrite::Abort;
            };
            let mut attempt = current.clone();
            attempt.status = AttemptStatus::Error;
            attempt.error = Some(message.to_string());
            attempt.raw_model_text = raw_text.clone();
            attempt.updated_at = Some(Utc::now());
            TxnWrite::Commit {
                attempt,
                progress: None,
            }
        })?;

        if committed {
            warn!("Attempt {} failed: {}", attempt_id, message);
            Ok(ScoreOutcome::Failed(message.to_string()))
        } else {
            Ok(ScoreOutcome::Skipped(SkipReason::AlreadyScored))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::{MemoryDocumentStore, MemoryRasterStore};

    struct FixedClassifier(std::result::Result<String, String>);

    impl Classifier for FixedClassifier {
        fn complete(&self, _: &str, _: &str, _: &[u8]) -> Result<String> {
            self.0.clone().map_err(Error::Classifier)
        }
    }

    fn reply(text: &str) -> FixedClassifier {
        FixedClassifier(Ok(text.to_string()))
    }

    fn setup(date: &str) -> (MemoryDocumentStore, MemoryRasterStore, String) {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();
        let date = DateKey::parse(date).unwrap();
        let path = format!("doodles/u1/{}.png", date);
        rasters.upload(&path, b"png", "image/png").unwrap();
        let id = format!("u1_{}", date);
        documents
            .put_attempt(&id, &Attempt::pending("u1", date, "Cat", &path, 0.75))
            .unwrap();
        (documents, rasters, id)
    }

    #[test]
    fn test_is_win() {
        assert!(is_win("cat", "Cat ", 0.8, 0.75));
        assert!(is_win("cat", "cat", 0.75, 0.75));
        assert!(!is_win("cat", "cat", 0.74, 0.75));
        assert!(!is_win("dog", "cat", 1.0, 0.75));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_winning_attempt() {
        let (documents, rasters, id) = setup("2024-01-06");
        let classifier = reply(r#"{"guess":"CAT","confidence":0.9}"#);
        let scorer = AttemptScorer::new(&documents, &rasters, &classifier);

        let outcome = scorer.score(&id).unwrap();
        let ScoreOutcome::Scored(verdict) = outcome else {
            panic!("expected scored outcome, got {:?}", outcome);
        };
        assert!(verdict.is_win);
        assert_eq!(verdict.guess, "cat");
        assert_eq!(verdict.progress.points_total, 1);

        let attempt = documents.attempt(&id).unwrap().unwrap();
        assert_eq!(attempt.status, AttemptStatus::Scored);
        assert_eq!(attempt.openai_guess.as_deref(), Some("cat"));
        assert_eq!(attempt.is_win, Some(true));
        assert!(attempt.scored_at.is_some());

        let progress = documents.progress("u1").unwrap().unwrap();
        assert_eq!(progress.streak_current, 1);
        assert!(progress.created_at.is_some());
    }

    #[test]
    fn test_low_confidence_leaves_progress_untouched() {
        let (documents, rasters, id) = setup("2024-01-06");
        let classifier = reply(r#"{"guess":"cat","confidence":0.5}"#);
        let scorer = AttemptScorer::new(&documents, &rasters, &classifier);

        let ScoreOutcome::Scored(verdict) = scorer.score(&id).unwrap() else {
            panic!("expected scored outcome");
        };
        assert!(!verdict.is_win);
        let progress = documents.progress("u1").unwrap().unwrap();
        assert_eq!(progress.points_total, 0);
        assert_eq!(progress.streak_current, 0);
        assert_eq!(progress.last_win_date, None);
    }

    #[test]
    fn test_missing_fields_mark_error() {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();
        let classifier = reply("{}");
        documents
            .put_attempt(
                "bad",
                &Attempt {
                    uid: "u1".to_string(),
                    ..Attempt::default()
                },
            )
            .unwrap();

        let scorer = AttemptScorer::new(&documents, &rasters, &classifier);
        let outcome = scorer.score("bad").unwrap();
        assert_eq!(
            outcome,
            ScoreOutcome::Failed("Missing uid/word/date/storagePath".to_string())
        );
        let attempt = documents.attempt("bad").unwrap().unwrap();
        assert_eq!(attempt.status, AttemptStatus::Error);
        assert!(attempt.scored_at.is_none());
        assert!(documents.progress("u1").unwrap().is_none());
    }

    #[test]
    fn test_download_failure_marks_error() {
        let (documents, _, id) = setup("2024-01-06");
        let empty_rasters = MemoryRasterStore::new();
        let classifier = reply(r#"{"guess":"cat","confidence":0.9}"#);
        let scorer = AttemptScorer::new(&documents, &empty_rasters, &classifier);

        assert!(matches!(scorer.score(&id).unwrap(), ScoreOutcome::Failed(_)));
        assert_eq!(
            documents.attempt(&id).unwrap().unwrap().status,
            AttemptStatus::Error
        );
    }

    #[test]
    fn test_classifier_failure_marks_error() {
        let (documents, rasters, id) = setup("2024-01-06");
        let classifier = FixedClassifier(Err("quota exceeded".to_string()));
        let scorer = AttemptScorer::new(&documents, &rasters, &classifier);

        let ScoreOutcome::Failed(message) = scorer.score(&id).unwrap() else {
            panic!("expected failure");
        };
        assert!(message.contains("quota exceeded"));
        assert!(documents.progress("u1").unwrap().is_none());
    }

    #[test]
    fn test_malformed_output_keeps_truncated_raw_text() {
        let (documents, rasters, id) = setup("2024-01-06");
        let long = "x".repeat(RAW_TEXT_LIMIT + 500);
        let classifier = reply(&long);
        let scorer = AttemptScorer::new(&documents, &rasters, &classifier);

        assert_eq!(
            scorer.score(&id).unwrap(),
            ScoreOutcome::Failed("Model output was not valid JSON".to_string())
        );
        let attempt = documents.attempt(&id).unwrap().unwrap();
        assert_eq!(
            attempt.raw_model_text.map(|t| t.chars().count()),
            Some(RAW_TEXT_LIMIT)
        );
    }

    #[test]
    fn test_error_attempt_is_not_rescored() {
        let (documents, rasters, id) = setup("2024-01-06");
        let failing = FixedClassifier(Err("down".to_string()));
        AttemptScorer::new(&documents, &rasters, &failing)
            .score(&id)
            .unwrap();

        let working = reply(r#"{"guess":"cat","confidence":0.9}"#);
        let outcome = AttemptScorer::new(&documents, &rasters, &working)
            .score(&id)
            .unwrap();
        assert_eq!(outcome, ScoreOutcome::Skipped(SkipReason::NotPending));
    }

    #[test]
    fn test_unknown_attempt_is_skipped() {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();
        let classifier = reply("{}");
        let outcome = AttemptScorer::new(&documents, &rasters, &classifier)
            .score("missing")
            .unwrap();
        assert_eq!(outcome, ScoreOutcome::Skipped(SkipReason::NotFound));
    }
}
