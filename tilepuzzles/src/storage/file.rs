//! Store kept in a plain text file, one entry per line:
//!
//! ```text
//! bestMoves=31|95; expires=1791000000
//! ```
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tracing::{debug, warn};

use crate::storage::{
    check_entry,
    cookie::{find, parse_cookies},
    KeyValueStore, StoreError,
};

/// Name of the file inside the data directory.
const FILE_NAME: &str = "scores";

#[derive(Debug, Clone, Eq, PartialEq)]
struct Entry {
    value: String,
    /// Unix seconds after which the entry is dropped.
    expires: u64,
}

/// [`KeyValueStore`] backed by a `scores` file in a data directory. The file is read once
/// on open and rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Entry>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl FileStore {
    /// Open the store in `dir`. A missing directory or file is an empty store; the
    /// directory is created on first write.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let path = dir.as_ref().join(FILE_NAME);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        let entries = Self::parse(&text, unix_now());
        debug!(path = %path.display(), entries = entries.len(), "opened score file");
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(text: &str, now: u64) -> BTreeMap<String, Entry> {
        let mut entries = BTreeMap::new();
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let pairs = parse_cookies(line);
            let (first, attrs) = match pairs.split_first() {
                Some(split) => split,
                None => {
                    warn!(line, "skipping malformed score file line");
                    continue;
                }
            };
            let expires = match find(attrs, "expires").map(str::parse::<u64>) {
                Some(Ok(expires)) => expires,
                _ => {
                    warn!(name = first.name, "skipping entry without a valid expiry");
                    continue;
                }
            };
            if expires <= now {
                debug!(name = first.name, "dropping expired entry");
                continue;
            }
            entries.insert(
                first.name.to_owned(),
                Entry {
                    value: first.value.to_owned(),
                    expires,
                },
            );
        }
        entries
    }

    fn write(&self) -> Result<(), StoreError> {
        let mut text = String::new();
        for (name, entry) in &self.entries {
            text.push_str(&format!("{}={}; expires={}\n", name, entry.value, entry.expires));
        }
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        fs::write(&self.path, text).map_err(write_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = unix_now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| entry.expires > now)
            .map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, max_age: Duration) -> Result<(), StoreError> {
        check_entry(key, value)?;
        let entry = Entry {
            value: value.to_owned(),
            expires: unix_now().saturating_add(max_age.as_secs()),
        };
        let previous = self.entries.insert(key.to_owned(), entry);
        if let Err(err) = self.write() {
            match previous {
                Some(previous) => self.entries.insert(key.to_owned(), previous),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        debug!(key, value, path = %self.path.display(), "stored entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::storage::MAX_AGE;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.get("bestMoves").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        let mut store = FileStore::open(&data).unwrap();
        assert_eq!(store.path(), data.join(FILE_NAME));
        store.set("bestMoves", "20|41", MAX_AGE).unwrap();
        store.set("bestTime", "25|33", MAX_AGE).unwrap();

        let text = fs::read_to_string(data.join(FILE_NAME)).unwrap();
        assert!(text.starts_with("bestMoves=20|41; expires="));
        assert_eq!(text.lines().count(), 2);

        let reopened = FileStore::open(&data).unwrap();
        assert_eq!(reopened.get("bestMoves").unwrap().as_deref(), Some("20|41"));
        assert_eq!(reopened.get("bestTime").unwrap().as_deref(), Some("25|33"));
    }

    #[test]
    fn expired_and_malformed_lines_are_dropped() {
        let far = unix_now() + 1000;
        let text = format!(
            "bestMoves=3|4; expires=1\nbestTime=5|6; expires={}\nnoexpiry=1|1\ngarbage\n\n",
            far
        );
        let entries = FileStore::parse(&text, unix_now());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["bestTime"].value, "5|6");
    }

    #[test]
    fn failed_write_keeps_old_value() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        let mut store = FileStore::open(&data).unwrap();
        store.set("bestMoves", "20|41", MAX_AGE).unwrap();

        // A plain file where the data directory should be makes every write fail.
        fs::remove_dir_all(&data).unwrap();
        fs::write(&data, "not a directory").unwrap();
        assert!(matches!(
            store.set("bestMoves", "9|12", MAX_AGE),
            Err(StoreError::Write { .. })
        ));
        assert!(matches!(
            store.set("bestTime", "9|12", MAX_AGE),
            Err(StoreError::Write { .. })
        ));
        assert_eq!(store.get("bestMoves").unwrap().as_deref(), Some("20|41"));
        assert_eq!(store.get("bestTime").unwrap(), None);
    }
}
