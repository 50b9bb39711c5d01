use crate::error::{MtgError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder replaced by the notification text in notifier arguments.
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

// ---------------------------------------------------------------------------
// CorruptBlobPolicy
// ---------------------------------------------------------------------------

/// What to do when the appointment blob exists but cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptBlobPolicy {
    /// Log a warning and start with an empty store. The next save overwrites
    /// the unreadable blob.
    #[default]
    TreatAsEmpty,
    /// Surface the error and refuse to run the command.
    Fail,
}

// ---------------------------------------------------------------------------
// NotifierConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default = "default_notifier_program")]
    pub program: String,
    #[serde(default = "default_notifier_args")]
    pub args: Vec<String>,
}

fn default_notifier_program() -> String {
    "terminal-notifier".to_string()
}

fn default_notifier_args() -> Vec<String> {
    ["-sound", "Glass", "-title", "my-mtg-alerter", "-message", MESSAGE_PLACEHOLDER]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            program: default_notifier_program(),
            args: default_notifier_args(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the default blob location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<PathBuf>,
    /// Half-width of the nowish window, in minutes.
    #[serde(default = "default_nowish_minutes")]
    pub nowish_minutes: u32,
    #[serde(default)]
    pub on_corrupt_blob: CorruptBlobPolicy,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

fn default_nowish_minutes() -> u32 {
    crate::window::NOWISH_RADIUS_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blob: None,
            nowish_minutes: default_nowish_minutes(),
            on_corrupt_blob: CorruptBlobPolicy::default(),
            notifier: NotifierConfig::default(),
        }
    }
}

impl Config {
    /// Read the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.nowish_minutes == 0 {
            return Err(MtgError::InvalidConfig(
                "nowish_minutes must be greater than zero".to_string(),
            ));
        }
        if self.notifier.program.trim().is_empty() {
            return Err(MtgError::InvalidConfig(
                "notifier.program must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn nowish_radius(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::minutes(i64::from(self.nowish_minutes))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
