//! Store snapshots on local disk.
//!
//! A snapshot is the store's JSON form wrapped with a format version. Writes
//! go to a temp file that is renamed into place, so an interrupted save
//! never leaves a truncated snapshot behind. Decoding repairs the card
//! order, and in-flight loading flags are cleared on load since no request
//! survives a restart.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{FlashcardsError, Result};
use crate::store::Store;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    store: &'a Store,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    version: u32,
    store: Store,
}

/// Write `store` to `path`, creating parent directories as needed.
pub fn save_snapshot(store: &Store, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    let result = (|| -> Result<()> {
        let bytes = serde_json::to_vec(&SnapshotRef {
            version: config::SNAPSHOT_VERSION,
            store,
        })?;
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    match &result {
        Ok(()) => log::debug!("Saved snapshot of {} cards to {}", store.len(), path.display()),
        Err(_) => {
            let _ = fs::remove_file(&tmp_path);
        }
    }
    result
}

/// Read a snapshot from `path`.
///
/// Returns `Ok(None)` when there is no snapshot or it was written by another
/// format version (the stale file is removed). A file that cannot be parsed
/// is removed and reported as [`FlashcardsError::CorruptSnapshot`].
pub fn load_snapshot(path: &Path) -> Result<Option<Store>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let snapshot: SnapshotOwned = match serde_json::from_str(&contents) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("Corrupt snapshot {}: {} -- removing", path.display(), e);
            let _ = fs::remove_file(path);
            return Err(FlashcardsError::CorruptSnapshot(format!(
                "'{}' could not be parsed and has been removed: {}",
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown"),
                e
            )));
        }
    };

    if snapshot.version != config::SNAPSHOT_VERSION {
        log::info!(
            "Discarding snapshot {} with format version {} (expected {})",
            path.display(),
            snapshot.version,
            config::SNAPSHOT_VERSION
        );
        let _ = fs::remove_file(path);
        return Ok(None);
    }

    let mut store = snapshot.store;
    store.clear_in_flight();
    Ok(Some(store))
}

/// Remove a snapshot if present.
pub fn remove_snapshot(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
