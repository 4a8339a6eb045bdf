use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Single JSON state document on local durable storage.
///
/// Last writer wins. Writes go to a temporary file in the same directory and
/// are renamed into place, so a concurrent [`load`](StateStore::load) sees
/// either the old or the new document, never a torn one.
///
/// The reader usually runs under another uid, so the saved file gets an
/// explicit mode instead of the temporary file's owner-only one.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    mode: u32,
}

/// World-readable, owner-writable.
pub const DEFAULT_MODE: u32 = 0o644;

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: DEFAULT_MODE,
        }
    }

    /// Permission bits applied to the saved file on unix.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document.
    ///
    /// A missing, unreadable or unparseable file is `None`.
    pub fn load<T>(&self) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "state file not found");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state file unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state file malformed, ignoring");
                None
            }
        }
    }

    /// Replace the document atomically.
    pub fn save<T>(&self, doc: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let body = serde_json::to_vec(doc)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&body)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(self.mode))?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(
            path = %self.path.display(),
            bytes = body.len(),
            mode = format_args!("{:o}", self.mode),
            "state saved"
        );
        Ok(())
    }
}
