use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::CleanError;

/// Config file picked up from the working directory when present
pub const CONFIG_FILE_NAME: &str = "runclean.toml";

/// Every run directory the prover workflow writes into
const ALL_RUN_DIRS: &[&str] = &[
    "./_run_default",
    "./_run_register",
    "./_run_oneCoin",
    "./_run_F1",
    "./_run_2coin",
    "./_run_F2",
    "./_run_3coin",
    "./_run_F3",
    "./_run_draw",
];

/// Just the default setup directory
const DEFAULT_RUN_DIRS: &[&str] = &["./_run_default"];

/// Named built-in target lists
const PRESETS: &[(&str, &[&str])] = &[("all", ALL_RUN_DIRS), ("default", DEFAULT_RUN_DIRS)];

/// runclean configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directories to empty, in cleanup order
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    /// Refuse to empty the user's home directory
    #[serde(default = "default_protect_home")]
    pub protect_home: bool,
}

fn default_targets() -> Vec<String> {
    ALL_RUN_DIRS.iter().map(|s| s.to_string()).collect()
}
fn default_protect_home() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            protect_home: default_protect_home(),
        }
    }
}

impl Config {
    /// Load config from an explicit file, or `runclean.toml` in the working
    /// directory, or fall back to the built-in defaults.
    ///
    /// An explicit file must exist and parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = PathBuf::from(CONFIG_FILE_NAME);
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load and parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&contents).map_err(|e| CleanError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        tracing::debug!(path = %path.display(), targets = config.targets.len(), "loaded config");
        Ok(config)
    }

    /// Target list of a named preset
    pub fn preset(name: &str) -> Result<Vec<String>, CleanError> {
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, dirs)| dirs.iter().map(|s| s.to_string()).collect())
            .ok_or_else(|| CleanError::UnknownPreset {
                name: name.to_string(),
                expected: Self::preset_names().join(", "),
            })
    }

    /// Names of all built-in presets
    pub fn preset_names() -> Vec<&'static str> {
        PRESETS.iter().map(|(name, _)| *name).collect()
    }

    /// Replace the target list with a preset's
    pub fn apply_preset(&mut self, name: &str) -> Result<(), CleanError> {
        self.targets = Self::preset(name)?;
        Ok(())
    }

    /// Targets as paths, in order
    pub fn target_paths(&self) -> Vec<PathBuf> {
        self.targets.iter().map(PathBuf::from).collect()
    }
}
