use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Measurement units requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    /// Fahrenheit, mph, inches.
    #[default]
    Us,
    /// Celsius, km/h, millimetres.
    Metric,
    /// Celsius, mph, millimetres.
    Uk,
    /// Kelvin, m/s, millimetres.
    Base,
}

impl UnitGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitGroup::Us => "us",
            UnitGroup::Metric => "metric",
            UnitGroup::Uk => "uk",
            UnitGroup::Base => "base",
        }
    }

    pub const fn all() -> &'static [UnitGroup] {
        &[UnitGroup::Us, UnitGroup::Metric, UnitGroup::Uk, UnitGroup::Base]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitGroup::Us => "°F",
            UnitGroup::Metric | UnitGroup::Uk => "°C",
            UnitGroup::Base => "K",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            UnitGroup::Us | UnitGroup::Uk => "mph",
            UnitGroup::Metric => "km/h",
            UnitGroup::Base => "m/s",
        }
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitGroup {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "us" => Ok(UnitGroup::Us),
            "metric" => Ok(UnitGroup::Metric),
            "uk" => Ok(UnitGroup::Uk),
            "base" => Ok(UnitGroup::Base),
            _ => Err(anyhow!("Unknown unit group '{value}'. Supported: us, metric, uk, base.")),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit_group = "metric"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visual Crossing API key.
    pub api_key: Option<String>,
    pub unit_group: UnitGroup,
    /// Upper bound for one fetch, connect to last body byte.
    pub timeout_secs: u64,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            unit_group: UnitGroup::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-whisper", "whisper")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, or a hint on how to configure one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `whisper configure` and enter your Visual Crossing API key."
            )
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
