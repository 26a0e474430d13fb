use std::sync::{Mutex, MutexGuard, PoisonError};

use super::documents::{DocumentStore, Documents, TxnBody};
use crate::daily::DailyWord;
use crate::date::DateKey;
use crate::error::Result;
use crate::scoring::{Attempt, UserProgress};

/// Process-local document store. One lock guards every collection.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<Documents>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(docs: Documents) -> Self {
        Self {
            docs: Mutex::new(docs),
        }
    }

    /// Copy of the current document set.
    pub fn snapshot(&self) -> Documents {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Documents> {
        // A panicking transaction body never leaves a partial write behind
        self.docs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn attempt(&self, id: &str) -> Result<Option<Attempt>> {
        Ok(self.lock().attempts.get(id).cloned())
    }

    fn put_attempt(&self, id: &str, attempt: &Attempt) -> Result<()> {
        self.lock().attempts.insert(id.to_string(), attempt.clone());
        Ok(())
    }

    fn progress(&self, uid: &str) -> Result<Option<UserProgress>> {
        Ok(self.lock().users.get(uid).cloned())
    }

    fn daily_word(&self, date: DateKey) -> Result<Option<DailyWord>> {
        Ok(self.lock().daily_words.get(&date).cloned())
    }

    fn create_daily_word(&self, word: &DailyWord) -> Result<bool> {
        Ok(self.lock().create_daily_word(word))
    }

    fn transact(&self, attempt_id: &str, uid: &str, body: &mut TxnBody<'_>) -> Result<bool> {
        Ok(self.lock().transact(attempt_id, uid, body))
    }
}
