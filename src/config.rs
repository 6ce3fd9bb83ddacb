//! Application Configuration
//!
//! Defaults, overridden by an optional TOML file, overridden by environment
//! variables:
//! - `WFH_APPLY_WEBHOOK_URL`: submission endpoint
//! - `GEMINI_API_KEY`: enables the summary feature
//! - `WFH_APPLY_SUMMARY_API_BASE`, `WFH_APPLY_SUMMARY_MODEL`
//! - `WFH_APPLY_PREFERENCES`: preference file location

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;

pub const APP_DIR_NAME: &str = "wfh-apply";
const CONFIG_FILE_NAME: &str = "config.toml";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

const DEFAULT_WEBHOOK_URL: &str = "https://hook.eu2.make.com/gua8l1hq3mvr9yk5792cekjjfan62bcy";
const DEFAULT_SUMMARY_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_SUMMARY_MODEL: &str = "gemini-2.0-flash";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub submission: SubmissionConfig,
    pub summary: SummaryConfig,
    pub alerts: AlertConfig,
    /// Where the theme preference lives; platform config dir when unset
    pub preferences_path: Option<PathBuf>,
}

/// Webhook that receives the finished application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub webhook_url: String,
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Text-generation endpoint used for the applicant summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_SUMMARY_API_BASE.to_string(),
            api_key: String::new(),
            model: DEFAULT_SUMMARY_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl SummaryConfig {
    /// The summary feature needs an API key
    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key with all but the first four characters hidden
    pub fn masked_api_key(&self) -> String {
        if self.api_key.is_empty() {
            return "(not set)".to_string();
        }
        let visible: String = self.api_key.chars().take(4).collect();
        let hidden = self.api_key.chars().count().saturating_sub(4).min(36);
        format!("{}{}", visible, "*".repeat(hidden))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// How long an alert stays visible
    pub display_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { display_ms: 3000 }
    }
}

impl AlertConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

/// Per-user directory holding config and preferences
pub fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match app_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Environment variables win over file values
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("WFH_APPLY_WEBHOOK_URL") {
            self.submission.webhook_url = url;
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.summary.api_key = key;
        }
        if let Ok(base) = std::env::var("WFH_APPLY_SUMMARY_API_BASE") {
            self.summary.api_base = base;
        }
        if let Ok(model) = std::env::var("WFH_APPLY_SUMMARY_MODEL") {
            self.summary.model = model;
        }
        if let Ok(path) = std::env::var("WFH_APPLY_PREFERENCES") {
            self.preferences_path = Some(PathBuf::from(path));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.submission.webhook_url).map_err(|e| ConfigError::Invalid {
            key: "submission.webhook_url",
            message: e.to_string(),
        })?;
        if self.submission.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "submission.timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.summary.is_enabled() {
            reqwest::Url::parse(&self.summary.api_base).map_err(|e| ConfigError::Invalid {
                key: "summary.api_base",
                message: e.to_string(),
            })?;
            if self.summary.timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "summary.timeout_secs",
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolved preference file location
    pub fn preferences_file(&self) -> PathBuf {
        self.preferences_path.clone().unwrap_or_else(|| {
            app_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(PREFERENCES_FILE_NAME)
        })
    }
}
