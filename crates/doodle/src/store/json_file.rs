use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::documents::{DocumentStore, Documents, TxnBody};
use crate::daily::DailyWord;
use crate::date::DateKey;
use crate::error::Result;
use crate::scoring::{Attempt, UserProgress};

/// Document store persisted as one JSON file.
///
/// Every write rewrites the file through a temporary sibling and a rename,
/// so readers never observe a half-written document set. Transactions are
/// serialized within the process; separate processes sharing a file are not
/// coordinated.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Documents> {
        if !self.path.exists() {
            return Ok(Documents::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Documents::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, docs: &Documents) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(docs)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved documents to {:?}", self.path);
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Documents) -> T) -> Result<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&self.load()?))
    }

    /// Load, mutate and save under the lock. `f` returns (value, dirty).
    fn write<T>(&self, f: impl FnOnce(&mut Documents) -> (T, bool)) -> Result<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut docs = self.load()?;
        let (value, dirty) = f(&mut docs);
        if dirty {
            self.save(&docs)?;
        }
        Ok(value)
    }
}

impl DocumentStore for JsonFileStore {
    fn attempt(&self, id: &str) -> Result<Option<Attempt>> {
        self.read(|docs| docs.attempts.get(id).cloned())
    }

    fn put_attempt(&self, id: &str, attempt: &Attempt) -> Result<()> {
        self.write(|docs| {
            docs.attempts.insert(id.to_string(), attempt.clone());
            ((), true)
        })
    }

    fn progress(&self, uid: &str) -> Result<Option<UserProgress>> {
        self.read(|docs| docs.users.get(uid).cloned())
    }

    fn daily_word(&self, date: DateKey) -> Result<Option<DailyWord>> {
        self.read(|docs| docs.daily_words.get(&date).cloned())
    }

    fn create_daily_word(&self, word: &DailyWord) -> Result<bool> {
        self.write(|docs| {
            let created = docs.create_daily_word(word);
            (created, created)
        })
    }

    fn transact(&self, attempt_id: &str, uid: &str, body: &mut TxnBody<'_>) -> Result<bool> {
        self.write(|docs| {
            let committed = docs.transact(attempt_id, uid, body);
            (committed, committed)
        })
    }
}
