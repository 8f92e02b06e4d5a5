use anyhow::{Context as _, Result, ensure};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

#[derive(Clone, Copy, Debug)]
pub enum ConfigReadOption {
    FromLocalFile,
    /// `clipkeep/config.toml` in the platform config directory.
    FromUserConfigDir,
}

impl ConfigReadOption {
    fn path(self) -> Result<PathBuf> {
        match self {
            ConfigReadOption::FromLocalFile => Ok(PathBuf::from("config.toml")),
            ConfigReadOption::FromUserConfigDir => Ok(dirs::config_dir()
                .context("no config directory")?
                .join("clipkeep/config.toml")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Capacity of the history; the oldest entries are evicted beyond it.
    pub max_items: usize,
    /// How often the clipboard is sampled.
    pub poll_interval_ms: u64,
    /// Settle time between hiding the picker and restoring focus. Empirical,
    /// raise it if pastes land in the picker instead of the target window.
    pub paste_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: 50,
            poll_interval_ms: 500,
            paste_delay_ms: 150,
        }
    }
}

impl Config {
    pub fn read(option: ConfigReadOption) -> Result<Self> {
        let path = option.path()?;
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Like [`Config::read`], but any problem falls back to the defaults.
    pub fn read_or_default(option: ConfigReadOption) -> Self {
        match Self::read(option) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default config: {err:?}");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid config format")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_items > 0, "max_items must be positive");
        ensure!(self.poll_interval_ms > 0, "poll_interval_ms must be positive");
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }
}
