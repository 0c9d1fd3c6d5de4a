//! User preferences persisted next to the config file.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bustrack_core::{AppConfig, Locale};
use serde::{Deserialize, Serialize};

const PREFERENCES_FILE: &str = "preferences.json";

/// Settings the user changes from inside the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Overrides the configured locale once the user picks a language.
    pub locale: Option<Locale>,
    /// Show the text-only arrivals list instead of the trip finder.
    pub low_bandwidth: bool,
    /// Route ids pinned to the top of the route list.
    pub favourites: BTreeSet<String>,
}

impl Preferences {
    /// Load preferences from `path`, returning `None` if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read preferences {}", path.display()))?;
        let prefs = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse preferences {}", path.display()))?;
        Ok(Some(prefs))
    }

    /// Persist preferences to `path`, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create preferences directory {}", parent.display())
            })?;
        }
        let serialized =
            serde_json::to_string_pretty(self).context("failed to serialize preferences")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write preferences {}", path.display()))
    }

    pub fn is_favourite(&self, route_id: &str) -> bool {
        self.favourites.contains(route_id)
    }

    /// Flip the favourite flag of a route, returning the new state.
    pub fn toggle_favourite(&mut self, route_id: &str) -> bool {
        if self.favourites.remove(route_id) {
            false
        } else {
            self.favourites.insert(route_id.to_string());
            true
        }
    }
}

/// Default preferences location inside the bustrack config directory.
pub fn preferences_path() -> PathBuf {
    AppConfig::config_dir().join(PREFERENCES_FILE)
}
