//! User configuration loaded from `config.toml`.
//!
//! Every field is optional; anything left out falls back to the defaults
//! below. The file lives in the platform config directory
//! (`~/.config/seton/config.toml` on Linux) unless `--config` is given.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::session::SessionSettings;

const APP_NAME: &str = "seton";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Largest accepted `scroll_step`: 500 rows per key press.
pub const MAX_SCROLL_STEP: i32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preview scroll increment for `j`/`k`, in scroll units.
    pub scroll_step: i32,
    /// Delay before focus moves to the newly shown surface.
    pub focus_delay_ms: u64,
    /// Plain keys that switch from preview to editing.
    pub edit_keys: Vec<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_step: 100,
            focus_delay_ms: 10,
            edit_keys: vec!['i', 'a'],
        }
    }
}

impl Config {
    /// Platform default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        let text = std::fs::read_to_string(&path)?;
        let config = Self::parse(&text, &path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates config text. `path` is only used in errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_SCROLL_STEP).contains(&self.scroll_step) {
            return Err(Error::InvalidConfig(format!(
                "scroll_step must be between 1 and {}, got {}",
                MAX_SCROLL_STEP, self.scroll_step
            )));
        }
        if self.edit_keys.is_empty() {
            return Err(Error::InvalidConfig("edit_keys must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            scroll_step: self.scroll_step,
            focus_delay: Duration::from_millis(self.focus_delay_ms),
            edit_keys: self.edit_keys.clone(),
        }
    }
}
