//! Global calpad configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CalpadError, CalpadResult};

const DEFAULT_LEAD_TIME_MINUTES: i64 = 60;

fn default_lead_time() -> i64 {
    DEFAULT_LEAD_TIME_MINUTES
}

/// Global configuration at ~/.config/calpad/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct CalpadConfig {
    /// Where the event store file lives. Defaults to the platform data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Minutes before a timed event during which a reminder may fire.
    #[serde(default = "default_lead_time")]
    pub lead_time_minutes: i64,
}

impl Default for CalpadConfig {
    fn default() -> Self {
        CalpadConfig {
            data_file: None,
            lead_time_minutes: DEFAULT_LEAD_TIME_MINUTES,
        }
    }
}

impl CalpadConfig {
    pub fn config_dir() -> CalpadResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CalpadError::Config("Could not determine config directory".into()))?;
        Ok(dir.join("calpad"))
    }

    pub fn config_path() -> CalpadResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Where the assistant API key is stored.
    pub fn api_key_path() -> CalpadResult<PathBuf> {
        Ok(Self::config_dir()?.join("api_key"))
    }

    /// Load the config, writing a commented-out default file on first run.
    pub fn load() -> CalpadResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
            return Ok(CalpadConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| CalpadError::Config(format!("Could not read config file: {e}")))?;
        toml::from_str(&content).map_err(|e| CalpadError::Config(e.to_string()))
    }

    /// Resolved path of the event store file.
    pub fn data_path(&self) -> CalpadResult<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        let dir = dirs::data_dir()
            .ok_or_else(|| CalpadError::Config("Could not determine data directory".into()))?;
        Ok(dir.join("calpad").join("events.json"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalpadResult<()> {
        let contents = "\
# calpad configuration

# Where your events are stored:
# data_file = \"~/.local/share/calpad/events.json\"

# Minutes of warning before a timed event:
# lead_time_minutes = 60
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalpadError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalpadError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
