use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

pub mod check;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: u64,
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_login_timeout() -> u64 {
    10
}
fn default_api_timeout() -> u64 {
    15
}
fn default_time_format() -> String {
    "%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            login_timeout_secs: default_login_timeout(),
            api_timeout_secs: default_api_timeout(),
            time_format: default_time_format(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rraid")
        } else {
            let home = dirs::home_dir()
                .or_else(|| env::var("HOME").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(".rraid")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rraid.conf")
    }

    /// Return the full path of the persisted session
    pub fn session_file() -> PathBuf {
        Self::config_dir().join("session.yaml")
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_url must start with http:// or https:// (got '{}')",
                self.api_url
            )));
        }
        if self.login_timeout_secs == 0 || self.api_timeout_secs == 0 {
            return Err(AppError::Config("timeouts must be at least 1 second".into()));
        }
        if StrftimeItems::new(&self.time_format).any(|i| matches!(i, Item::Error)) {
            return Err(AppError::Config(format!(
                "time_format '{}' is not a valid strftime pattern",
                self.time_format
            )));
        }
        Ok(())
    }

    /// Initialize the configuration directory and file
    pub fn init_all(api_url: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Config::default();
        if let Some(url) = api_url {
            config.api_url = url;
        }
        config.validate()?;

        let path = Self::config_file();
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(&path)?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(path)
    }
}
