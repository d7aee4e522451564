//! Session snapshot persistence: a single JSON slot that survives
//! restarts. Not a versioned history; every save overwrites the slot with
//! a full, consistent projection of the in-memory state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contract::Style;
use crate::locator::RepoIdentity;

/// The persisted projection of session state. Field names on the wire are
/// camelCase (`repoUrl`, `repoDetails`, `readmeContent`, `logoDataUri`,
/// `style`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSnapshot {
    pub repo_url: Option<String>,
    pub repo_details: Option<RepoIdentity>,
    pub readme_content: String,
    pub logo_data_uri: Option<String>,
    pub style: Style,
}

/// Key-value store with a single slot, backed by one JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the full snapshot to the slot. The parent directory is
    /// created on demand.
    pub fn save(&self, snapshot: &SessionSnapshot) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "session snapshot saved");
        Ok(())
    }

    /// Reads the slot back. Missing or corrupt data is non-fatal: the
    /// caller proceeds from empty state.
    pub fn load(&self) -> Option<SessionSnapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved session");
                return None;
            }
            Err(e) => {
                warn!(error = ?e, path = %self.path.display(), "failed to read session snapshot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), "session snapshot restored");
                Some(snapshot)
            }
            Err(e) => {
                warn!(error = ?e, path = %self.path.display(), "failed to parse session snapshot; starting empty");
                None
            }
        }
    }
}
