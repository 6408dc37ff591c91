// src/prefs.rs

//! Client-side preferences that survive restarts: theme and table mode.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::{ResourceKind, Theme};

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub selected_theme: Theme,

    #[serde(default)]
    pub table_type: ResourceKind,
}

/// Reads and writes [`Preferences`] at `<state_dir>/preferences.toml`.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(fs: Arc<dyn FileSystem>, state_dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: state_dir.as_ref().join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable preferences fall back to defaults.
    pub fn load(&self) -> Preferences {
        if !self.fs.is_file(&self.path) {
            debug!(path = ?self.path, "no stored preferences; using defaults");
            return Preferences::default();
        }

        let parsed = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|s| toml::from_str::<Preferences>(&s).map_err(|e| e.to_string()));

        match parsed {
            Ok(prefs) => prefs,
            Err(error) => {
                warn!(path = ?self.path, %error, "ignoring unreadable preferences");
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        let contents = toml::to_string(prefs)?;
        self.fs.write(&self.path, contents.as_bytes())?;
        debug!(path = ?self.path, ?prefs, "preferences saved");
        Ok(())
    }

    /// Load, apply `change`, save, and return the new value.
    pub fn update(&self, change: impl FnOnce(&mut Preferences)) -> Result<Preferences> {
        let mut prefs = self.load();
        change(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }
}
