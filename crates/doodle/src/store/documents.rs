use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::daily::DailyWord;
use crate::date::DateKey;
use crate::error::Result;
use crate::scoring::{Attempt, UserProgress};

/// Decision returned by a transaction body.
#[derive(Debug, Clone, PartialEq)]
pub enum TxnWrite {
    /// Leave both documents untouched.
    Abort,
    /// Replace the attempt, and the user's progress when given.
    Commit {
        attempt: Attempt,
        progress: Option<UserProgress>,
    },
}

/// Body of a transaction over one attempt and one user's progress.
pub type TxnBody<'a> = dyn FnMut(Option<&Attempt>, Option<&UserProgress>) -> TxnWrite + 'a;

/// Document database holding attempts, user progress and daily words.
pub trait DocumentStore: Send + Sync {
    fn attempt(&self, id: &str) -> Result<Option<Attempt>>;

    /// Create or overwrite an attempt (the submission path).
    fn put_attempt(&self, id: &str, attempt: &Attempt) -> Result<()>;

    fn progress(&self, uid: &str) -> Result<Option<UserProgress>>;

    fn daily_word(&self, date: DateKey) -> Result<Option<DailyWord>>;

    /// Store `word` unless a record for its date exists. Returns true if created.
    fn create_daily_word(&self, word: &DailyWord) -> Result<bool>;

    /// Atomic read-modify-write of an attempt and its owner's progress.
    ///
    /// `body` sees both documents as of the start of the transaction and no
    /// other write to the store interleaves. Returns true if it committed.
    fn transact(&self, attempt_id: &str, uid: &str, body: &mut TxnBody<'_>) -> Result<bool>;
}

/// The full document set, shared by the in-memory and JSON file stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documents {
    pub attempts: HashMap<String, Attempt>,
    pub users: HashMap<String, UserProgress>,
    pub daily_words: BTreeMap<DateKey, DailyWord>,
}

impl Documents {
    pub fn create_daily_word(&mut self, word: &DailyWord) -> bool {
        if self.daily_words.contains_key(&word.date) {
            return false;
        }
        self.daily_words.insert(word.date, word.clone());
        true
    }

    /// Run a transaction body and apply its writes. Returns true if committed.
    pub fn transact(&mut self, attempt_id: &str, uid: &str, body: &mut TxnBody<'_>) -> bool {
        let write = body(self.attempts.get(attempt_id), self.users.get(uid));
        match write {
            TxnWrite::Abort => false,
            TxnWrite::Commit { attempt, progress } => {
                self.attempts.insert(attempt_id.to_string(), attempt);
                if let Some(progress) = progress {
                    self.users.insert(uid.to_string(), progress);
                }
                true
            }
        }
    }
}
