use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::model::Schedule;

/// File-backed history of rotated schedules, keyed by `YYYY-MM-DD`.
///
/// The whole mapping lives in memory and the file is rewritten wholesale on
/// every mutation — the dataset is tens of entries at most. Rewrites go
/// through a temp file and rename so a failed write never truncates the
/// existing history. The file is pretty-printed JSON, UTF-8, non-ASCII kept
/// unescaped.
pub struct HistoryStore {
    path: PathBuf,
    records: IndexMap<String, Schedule>,
}

impl HistoryStore {
    /// Open the store at `path`. A missing file is the valid empty state;
    /// an unreadable or corrupt file is an error.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => IndexMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, date_key: &str) -> Option<&Schedule> {
        self.records.get(date_key)
    }

    pub fn contains(&self, date_key: &str) -> bool {
        self.records.contains_key(date_key)
    }

    /// Stored date keys in insertion order.
    pub fn list_keys(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Insert or overwrite the record for `date_key`, then rewrite the file.
    pub fn put(&mut self, date_key: impl Into<String>, schedule: Schedule) -> io::Result<()> {
        self.records.insert(date_key.into(), schedule);
        self.rewrite()
    }

    /// Remove the record for `date_key` and rewrite the file. Removing an
    /// absent key is a no-op and returns `Ok(false)`.
    pub fn delete(&mut self, date_key: &str) -> io::Result<bool> {
        // shift_remove keeps the remaining keys in insertion order.
        if self.records.shift_remove(date_key).is_none() {
            return Ok(false);
        }
        self.rewrite()?;
        Ok(true)
    }

    fn rewrite(&self) -> io::Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.records)?;
        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)
    }
}
