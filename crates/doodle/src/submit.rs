//! Doodle submission: upload the PNG and open a pending attempt.

use tracing::info;

use crate::daily::DailyWord;
use crate::error::{Error, Result};
use crate::scoring::{Attempt, attempt_id};
use crate::store::{DocumentStore, RasterStore};

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Object path of a user's doodle for a day.
pub fn doodle_path(uid: &str, daily: &DailyWord) -> String {
    format!("doodles/{}/{}.png", uid, daily.date)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub attempt_id: String,
    pub attempt: Attempt,
    /// The document this submission replaced, for the write trigger.
    pub previous: Option<Attempt>,
}

/// Upload `png` and write a pending attempt for `daily`.
///
/// The attempt document is overwritten on every submission so an attempt
/// that ended in `error` can be scored again. A scored attempt is final.
pub fn submit_doodle(
    documents: &dyn DocumentStore,
    rasters: &dyn RasterStore,
    uid: &str,
    daily: &DailyWord,
    png: &[u8],
) -> Result<Submission> {
    if uid.trim().is_empty() {
        return Err(Error::MissingField("uid"));
    }
    if png.is_empty() {
        return Err(Error::MissingField("image"));
    }

    let id = attempt_id(uid, daily.date);
    let previous = documents.attempt(&id)?;
    if previous.as_ref().is_some_and(Attempt::is_scored) {
        return Err(Error::AttemptAlreadyScored(id));
    }

    let storage_path = rasters.upload(&doodle_path(uid, daily), png, PNG_CONTENT_TYPE)?;
    let mut attempt = Attempt::pending(uid, daily.date, &daily.word, &storage_path, daily.threshold);
    attempt.mode = Some(daily.mode.clone());
    documents.put_attempt(&id, &attempt)?;

    info!("Submitted {} ({} bytes)", id, png.len());
    Ok(Submission {
        attempt_id: id,
        attempt,
        previous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::Difficulty;
    use crate::date::DateKey;
    use crate::scoring::AttemptStatus;
    use crate::store::{MemoryDocumentStore, MemoryRasterStore};

    fn daily() -> DailyWord {
        DailyWord {
            date: DateKey::parse("2024-01-06").unwrap(),
            word: "cat".to_string(),
            difficulty: Difficulty::Hard,
            threshold: 0.8,
            mode: "classic".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_submit_creates_pending_attempt() {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();

        let submission = submit_doodle(&documents, &rasters, "u1", &daily(), b"png").unwrap();
        assert_eq!(submission.attempt_id, "u1_2024-01-06");
        assert!(submission.previous.is_none());

        let stored = documents.attempt("u1_2024-01-06").unwrap().unwrap();
        assert_eq!(stored.status, AttemptStatus::Pending);
        assert_eq!(stored.storage_path, "doodles/u1/2024-01-06.png");
        assert_eq!(stored.threshold, Some(0.8));
        assert_eq!(stored.word, "cat");
        assert_eq!(
            rasters.download("doodles/u1/2024-01-06.png").unwrap(),
            b"png"
        );
    }

    #[test]
    fn test_resubmit_reports_previous() {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();
        submit_doodle(&documents, &rasters, "u1", &daily(), b"one").unwrap();
        let second = submit_doodle(&documents, &rasters, "u1", &daily(), b"two").unwrap();
        assert!(second.previous.is_some());
        assert_eq!(
            rasters.download(&second.attempt.storage_path).unwrap(),
            b"two"
        );
    }

    #[test]
    fn test_resubmit_after_scoring_is_rejected() {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();
        let first = submit_doodle(&documents, &rasters, "u1", &daily(), b"one").unwrap();

        let mut scored = first.attempt.clone();
        scored.status = AttemptStatus::Scored;
        scored.scored_at = Some(chrono::Utc::now());
        documents.put_attempt(&first.attempt_id, &scored).unwrap();

        assert!(matches!(
            submit_doodle(&documents, &rasters, "u1", &daily(), b"two"),
            Err(Error::AttemptAlreadyScored(id)) if id == "u1_2024-01-06"
        ));
        assert_eq!(
            rasters.download("doodles/u1/2024-01-06.png").unwrap(),
            b"one"
        );
    }

    #[test]
    fn test_submit_requires_uid_and_image() {
        let documents = MemoryDocumentStore::new();
        let rasters = MemoryRasterStore::new();
        assert!(matches!(
            submit_doodle(&documents, &rasters, " ", &daily(), b"png"),
            Err(Error::MissingField("uid"))
        ));
        assert!(matches!(
            submit_doodle(&documents, &rasters, "u1", &daily(), b""),
            Err(Error::MissingField("image"))
        ));
    }
}
