use crate::{KeyValueStore, StorageError, StorageResult};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

type Record = BTreeMap<String, String>;

/// Key/value storage backed by one JSON object in one file.
///
/// Every mutation rewrites the whole file with the temp-file + fsync + rename
/// pattern, so a crash mid-write leaves the previous record intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Storage file for one portal inside `dir`.
    pub fn for_portal(dir: &Path, portal: lms_core::Portal) -> Self {
        Self::new(dir.join(format!("{}.json", portal.storage_namespace())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record; a missing file is an empty record.
    ///
    /// A corrupted file is moved aside and treated as empty.
    fn read_record(&self) -> StorageResult<Record> {
        if !self.path.exists() {
            return Ok(Record::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::file_read(self.path.clone(), e))?;

        match serde_json::from_str::<Record>(&contents) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!("Session file corrupted at {:?}: {e}", self.path);
                self.backup_corrupted()?;
                Ok(Record::new())
            }
        }
    }

    fn write_record(&self, record: &Record) -> StorageResult<()> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        fs::create_dir_all(&dir).map_err(|e| StorageError::dir_creation(dir.clone(), e))?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("session.json"));
        let temp_path = dir.join(format!("{file_name}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(record)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        debug!("Wrote session record to {:?}", self.path);
        Ok(())
    }

    /// Renames the file to `{file}.corrupted.{timestamp}`.
    fn backup_corrupted(&self) -> StorageResult<()> {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".corrupted.{timestamp}"));
        let backup_path = PathBuf::from(backup);

        fs::rename(&self.path, &backup_path).map_err(StorageError::backup_failed)?;

        warn!("Backed up corrupted session file to {backup_path:?}");
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_record()?.remove(key))
    }

    fn set_many(&self, entries: &[(String, String)]) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut record = self.read_record()?;
        for (key, value) in entries {
            record.insert(key.clone(), value.clone());
        }
        self.write_record(&record)
    }

    fn remove_many(&self, keys: &[String]) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.path.exists() {
            return Ok(());
        }
        let mut record = self.read_record()?;
        let before = record.len();
        for key in keys {
            record.remove(key);
        }
        if record.len() == before {
            return Ok(());
        }
        self.write_record(&record)
    }
}
