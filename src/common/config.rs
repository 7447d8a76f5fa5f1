use crate::priority::{NICE_MAX, NICE_MIN};
use anyhow::{Context, Result, bail};
use log::{debug, error, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "procprio.toml";
const DEFAULT_ADJUSTMENT: i32 = 10;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub priority: PriorityConfig,

    /// Niceness adjustment per executable name (file stem)
    #[serde(default)]
    pub executables: HashMap<String, i32>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct PriorityConfig {
    #[serde(default = "default_adjustment")]
    pub default_adjustment: i32,

    /// Abort instead of launching when the adjustment is refused
    #[serde(default)]
    pub strict: bool,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            default_adjustment: DEFAULT_ADJUSTMENT,
            strict: false,
        }
    }
}

fn default_adjustment() -> i32 {
    DEFAULT_ADJUSTMENT
}

impl Config {
    /// Default location under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        debug!("Locating configuration directory");
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("Could not find config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {}", path.display());

        let config_str = std::fs::read_to_string(path).map_err(|e| {
            error!("Failed to read config file '{}': {}", path.display(), e);
            e
        })?;

        debug!("Configuration file size: {} bytes", config_str.len());
        let config = Self::parse(&config_str)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        debug!("Configuration parsed successfully");
        debug!(
            "  Default adjustment: {}",
            config.priority.default_adjustment
        );
        debug!("  Executable overrides: {}", config.executables.len());

        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_adjustment("priority.default_adjustment", self.priority.default_adjustment)?;
        for (exe, adjustment) in &self.executables {
            check_adjustment(&format!("executables.{}", exe), *adjustment)?;
        }
        Ok(())
    }

    /// Adjustment to apply when launching `exe_name`.
    pub fn adjustment_for(&self, exe_name: &str) -> i32 {
        match self.executables.get(exe_name) {
            Some(adjustment) => {
                debug!("Found adjustment override for '{}': {}", exe_name, adjustment);
                *adjustment
            }
            None => self.priority.default_adjustment,
        }
    }
}

fn check_adjustment(field: &str, value: i32) -> Result<()> {
    if !(NICE_MIN..=NICE_MAX).contains(&value) {
        bail!(
            "{} = {} is outside {}..={}",
            field,
            value,
            NICE_MIN,
            NICE_MAX
        );
    }
    Ok(())
}
