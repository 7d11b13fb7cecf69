//! The one user preference that outlives a process: colorblind mode.
//!
//! Stored as a small JSON object. The game engine never sees it; only the
//! presentation layer reads it at startup and writes it when toggled.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub colorblind: bool,
}

/// JSON file holding [`Preferences`]
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored preferences.
    ///
    /// A missing file is not an error. A file that cannot be parsed is.
    pub fn try_load(&self) -> Result<Preferences> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Preferences::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read preferences from {:?}", self.path));
            }
        };
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse preferences in {:?}", self.path))
    }

    /// Like [`PreferenceStore::try_load`], but falls back to defaults and logs
    /// instead of failing; a broken preference file should never stop a game.
    pub fn load(&self) -> Preferences {
        match self.try_load() {
            Ok(prefs) => {
                debug!("loaded preferences {:?} from {:?}", prefs, self.path);
                prefs
            }
            Err(e) => {
                warn!("{:#}; using defaults", e);
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {:?}", self.path))?;

        debug!("saved preferences {:?} to {:?}", prefs, self.path);
        Ok(())
    }
}
