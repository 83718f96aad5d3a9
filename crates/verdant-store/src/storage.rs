//! Local key-value persistence.
//!
//! [`Storage`] maps named slots to JSON files in a single directory, the
//! on-disk equivalent of the browser storage the UI was built against. Two
//! rules keep reloads sound: writes replace a slot atomically (temp file
//! then rename), and reads never fail hydration — an unreadable or
//! unparseable slot is logged and treated as absent so the owning store
//! falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Result, StoreError};

/// Handle to the slot directory. Cheap to clone; every store holds one.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open (or create) the default application storage directory:
    /// - Linux:   `~/.local/share/verdant/`
    /// - macOS:   `~/Library/Application Support/com.verdant.verdant/`
    /// - Windows: `{FOLDERID_RoamingAppData}\verdant\verdant\data\`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "verdant", "verdant").ok_or(StoreError::NoDataDir)?;
        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) storage at an explicit directory.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        tracing::debug!(root = %root.display(), "opening storage");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Filesystem directory holding the slot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{slot}.json"))
    }

    /// Read and deserialize a slot. Returns `None` when the slot is absent
    /// or its contents cannot be parsed; the latter is logged, never fatal.
    pub fn read_slot<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let path = self.slot_path(slot);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(slot, error = %e, "failed to read slot, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(slot, error = %e, "failed to parse slot, treating as absent");
                None
            }
        }
    }

    /// Serialize and write a slot atomically.
    pub fn write_slot<T: Serialize>(&self, slot: &str, value: &T) -> Result<()> {
        let path = self.slot_path(slot);
        let tmp = self.root.join(format!("{slot}.json.tmp"));

        let text = serde_json::to_string(value)?;
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Remove a slot. Removing an absent slot is a no-op.
    pub fn clear_slot(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
