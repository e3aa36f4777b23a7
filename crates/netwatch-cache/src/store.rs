//! File-backed known-device cache.
//!
//! The cache is a single pretty-printed JSON document:
//! ```text
//! { "devices": { "AA:BB:CC:DD:EE:FF": { "ip": "...", "mac": "...", ... } } }
//! ```
//! Loading never fails: a missing or unparseable file yields an empty set.
//! Writes go to a sibling temp file which is then renamed over the target.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::KnownDevices;

/// Errors that can occur while reading or writing the cache file.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Process-wide handle to the cache file.
///
/// `load` and `persist` hold the same lock for their whole duration so a
/// reader never observes a half-written file and two writers never
/// interleave. A load-mutate-persist sequence is not atomic as a whole.
pub struct DeviceCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DeviceCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the known-device set, substituting an empty one on any failure.
    pub fn load(&self) -> KnownDevices {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        match self.read() {
            Ok(known) => {
                tracing::debug!(
                    path = %self.path.display(),
                    devices = known.len(),
                    "Device cache loaded"
                );
                known
            }
            Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Cache file not found, starting with empty cache"
                );
                KnownDevices::new()
            }
            Err(CacheError::Io(e)) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read cache file, starting with empty cache"
                );
                KnownDevices::new()
            }
            Err(CacheError::Serialization(e)) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Invalid cache file format, starting fresh"
                );
                KnownDevices::new()
            }
        }
    }

    /// Write the full known-device set, creating the parent directory on demand.
    pub fn persist(&self, known: &KnownDevices) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let json = serde_json::to_string_pretty(known)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            devices = known.len(),
            "Device cache updated"
        );

        Ok(())
    }

    fn read(&self) -> Result<KnownDevices, CacheError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "known_devices.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
