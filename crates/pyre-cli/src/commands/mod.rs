//! CLI command implementations

pub mod begin;
pub mod list;
pub mod presets;
pub mod settings;

use anyhow::{Context, Result};
use pyre_effects::{builtin, Effect};
use pyre_settings::{Settings, SettingsStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The settings store of all built-in effects, loaded from its file
pub struct Session {
    path: PathBuf,
    settings: Settings,
}

impl Session {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_settings_path()?,
        };
        let schema = builtin()
            .schema()
            .context("Failed to build the settings schema")?;
        let settings = SettingsStore::shared(schema);

        if path.exists() {
            settings
                .load_from_file(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
        }

        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        self.settings
            .save_to_file(&self.path)
            .with_context(|| format!("Failed to save settings to {}", self.path.display()))
    }
}

/// `<config dir>/pyre/settings.toml`
pub fn default_settings_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("pyre").join("settings.toml"))
        .context("Could not determine the user config directory")
}

/// Look up a built-in effect, listing the known nicks on failure
pub fn find_effect(nick: &str) -> Result<&'static dyn Effect> {
    builtin().get(nick).with_context(|| {
        let known: Vec<&str> = builtin().list().iter().map(|e| e.nick()).collect();
        format!("Unknown effect '{}'; available: {}", nick, known.join(", "))
    })
}
