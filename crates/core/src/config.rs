//! Application configuration.
//!
//! Settings come from `<config_dir>/bustrack/config.json`, overridden by
//! `BUSTRACK_`-prefixed environment variables (`__` separates nested keys,
//! e.g. `BUSTRACK_SIM__NORMAL_STEP=3`).

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::{
    models::Locale,
    sim::{FareTable, SimParams},
};

/// Directory under the user's config dir holding bustrack files.
pub const CONFIG_DIR: &str = "bustrack";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "BUSTRACK";

/// Runtime settings for the simulation and its frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language used for names and delay reasons.
    pub locale: Locale,
    /// Wall-clock time between simulation ticks.
    pub tick_interval_ms: u64,
    /// Fixed seed for reproducible runs. Drawn from OS entropy when unset.
    pub seed: Option<u64>,
    pub sim: SimParams,
    pub fares: FareTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            tick_interval_ms: 1000,
            seed: None,
            sim: SimParams::default(),
            fares: FareTable::default(),
        }
    }
}

impl AppConfig {
    /// Directory holding the config file and frontend preferences.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
    }

    /// Location of the config file.
    pub fn default_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Load from the default file and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load from `path` (missing files are fine) and the process environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), env_source())
    }

    fn load_layered(path: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Tick interval as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        let sim = &self.sim;
        for (name, step) in [("normal_step", sim.normal_step), ("slow_step", sim.slow_step)] {
            if step == 0 || step >= 100 {
                bail!("sim.{name} must be between 1 and 99, got {step}");
            }
        }
        for (name, p) in [
            ("delay_decay_probability", sim.delay_decay_probability),
            ("delay_onset_probability", sim.delay_onset_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("sim.{name} must be within [0, 1], got {p}");
            }
        }
        if sim.delay_minutes_min == 0 || sim.delay_minutes_min > sim.delay_minutes_max {
            bail!(
                "sim delay range {}..={} is empty or starts at zero",
                sim.delay_minutes_min,
                sim.delay_minutes_max
            );
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Write the default config file if none exists yet, returning its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = AppConfig::default_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path` unless a file is already there.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default config")?;
    fs::write(path, serialized).with_context(|| format!("failed to write config {}", path.display()))
}
