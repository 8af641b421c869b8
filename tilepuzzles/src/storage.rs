//! Key/value persistence for best scores.
//!
//! Values are short strings kept in a cookie-style store: each entry has a name, a value
//! and a maximum age after which it is forgotten. Scores are stored as `moves|time`.
use std::{collections::HashMap, io, path::PathBuf, time::Duration};

use thiserror::Error;
use tracing::warn;

use crate::{
    game::Variant,
    score::{BestScores, Score},
};

pub use self::{
    cookie::{parse_cookies, CookiePair},
    file::FileStore,
};

mod cookie;
mod file;

/// How long a stored record lives: twelve thirty-day months.
pub const MAX_AGE: Duration = Duration::from_secs(12 * 30 * 24 * 60 * 60);

/// Error reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid entry name {0:?}")]
    InvalidName(String),
    #[error("invalid value {0:?} for an entry")]
    InvalidValue(String),
}

/// A small string store with expiring entries.
pub trait KeyValueStore {
    /// Get the live value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, to be forgotten after `max_age`.
    fn set(&mut self, key: &str, value: &str, max_age: Duration) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str, max_age: Duration) -> Result<(), StoreError> {
        (**self).set(key, value, max_age)
    }
}

/// Reject names and values that would break the `name=value; ...` line format.
fn check_entry(key: &str, value: &str) -> Result<(), StoreError> {
    let bad = |s: &str| s.is_empty() || s.contains(|c: char| c == ';' || c == '\n' || c == '\r');
    if bad(key) || key.contains('=') || key.trim() != key {
        return Err(StoreError::InvalidName(key.to_owned()));
    }
    if bad(value) {
        return Err(StoreError::InvalidValue(value.to_owned()));
    }
    Ok(())
}

/// Store that lives only as long as the process. Entries never expire.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str, _max_age: Duration) -> Result<(), StoreError> {
        check_entry(key, value)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Read one stored score. Values that do not parse are logged and treated as missing.
fn load_score<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<Score>, StoreError> {
    Ok(store.get(key)?.and_then(|raw| match raw.parse() {
        Ok(score) => Some(score),
        Err(err) => {
            warn!(key, %err, "ignoring stored score");
            None
        }
    }))
}

/// Load the best scores for a variant.
pub fn load_best<S: KeyValueStore + ?Sized>(
    store: &S,
    variant: Variant,
) -> Result<BestScores, StoreError> {
    let (moves_key, time_key) = variant.best_keys();
    Ok(BestScores {
        by_moves: load_score(store, moves_key)?,
        by_time: load_score(store, time_key)?,
    })
}

/// Persist the best scores for a variant. Absent records are not written.
pub fn save_best<S: KeyValueStore + ?Sized>(
    store: &mut S,
    variant: Variant,
    best: &BestScores,
) -> Result<(), StoreError> {
    let (moves_key, time_key) = variant.best_keys();
    for (key, score) in [(moves_key, best.by_moves), (time_key, best.by_time)].iter() {
        if let Some(score) = score {
            store.set(key, &score.to_string(), MAX_AGE)?;
        }
    }
    Ok(())
}
