//! File-system record store.
//!
//! One JSON document per record:
//! `<root>/<hex(owner)[..2]>/<hex(owner) in 128-char segments>/<category id>.json`.
//! Owner ids are hex-encoded so any id maps to safe path components, and
//! long ids are split so no component exceeds the file name limit.

use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, error};

use super::{RecordStore, StoreError};
use crate::database::models::{Category, Record};

/// Longest hex segment used as one directory name.
const SEGMENT_LEN: usize = 128;

#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
    /// Held for the duration of one read, write or delete.
    io_lock: Mutex<()>,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding all records of one owner.
    pub fn owner_dir(&self, owner_id: &str) -> PathBuf {
        let encoded = hex::encode(owner_id.as_bytes());
        let mut dir = self.root.join(encoded.get(..2).unwrap_or("00"));

        // Hex is ASCII, so byte chunks are valid UTF-8.
        for segment in encoded.as_bytes().chunks(SEGMENT_LEN) {
            dir.push(String::from_utf8_lossy(segment).as_ref());
        }
        dir
    }

    pub fn record_path(&self, owner_id: &str, category: Category) -> PathBuf {
        self.owner_dir(owner_id).join(format!("{}.json", category.id()))
    }

    fn write_and_rename(record: &Record, tmp: &Path, path: &Path) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(fs::File::create(tmp)?);
        serde_json::to_writer(&mut writer, record)?;
        writer.flush()?;
        drop(writer);

        // Rename so a concurrent reader never sees a half-written file.
        fs::rename(tmp, path)?;
        Ok(())
    }
}

impl RecordStore for FsStore {
    fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError> {
        let path = self.record_path(owner_id, category);

        let _guard = self.io_lock.lock();
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Record not found. Owner: {}, path: {}", owner_id, path.display());
                return Err(StoreError::not_found(owner_id, category));
            }
            Err(e) => {
                error!("Failed to open {}: {}", path.display(), e);
                return Err(e.into());
            }
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            error!("Failed to decode {}: {}", path.display(), e);
            StoreError::from(e)
        })
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        let dir = self.owner_dir(&record.owner_id);
        let path = self.record_path(&record.owner_id, record.category);
        let tmp = path.with_extension("json.tmp");

        let _guard = self.io_lock.lock();
        fs::create_dir_all(&dir)?;

        if let Err(e) = Self::write_and_rename(record, &tmp, &path) {
            error!("Failed to write {}: {}", path.display(), e);
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError> {
        let path = self.record_path(owner_id, category);

        let _guard = self.io_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Deletion failed. Owner: {}, path: {}: {}", owner_id, path.display(), e);
                Err(e.into())
            }
        }
    }
}
