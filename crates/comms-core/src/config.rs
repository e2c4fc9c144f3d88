use crate::error::Result;
use crate::paths;
use crate::plan::DEFAULT_PLANNING_HORIZON;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROVIDER_ANTHROPIC: &str = "anthropic";
pub const PROVIDER_OFFLINE: &str = "offline";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the API key. The key itself
    /// is never stored in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider() -> String {
    PROVIDER_ANTHROPIC.to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout() -> u64 {
    60
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl LlmConfig {
    pub fn is_offline(&self) -> bool {
        self.provider == PROVIDER_OFFLINE
    }

    /// Value of the configured API key variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// ScheduleConfig / ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_due_window")]
    pub due_window_days: u32,
    #[serde(default = "default_horizon")]
    pub planning_horizon: String,
}

fn default_due_window() -> u32 {
    crate::due::DEFAULT_DUE_WINDOW_DAYS
}

fn default_horizon() -> String {
    DEFAULT_PLANNING_HORIZON.to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            due_window_days: default_due_window(),
            planning_horizon: default_horizon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

fn default_data_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_DATA_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_file: default_data_file(),
            llm: LlmConfig::default(),
            schedule: ScheduleConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Read `.comms/config.yaml` under `root`. A missing file yields the
    /// defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Absolute location of the project data file.
    pub fn data_path(&self, root: &Path) -> PathBuf {
        paths::data_path(root, &self.data_file)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut warn = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message })
        };

        if self.llm.provider != PROVIDER_ANTHROPIC && self.llm.provider != PROVIDER_OFFLINE {
            warn(
                WarnLevel::Error,
                format!(
                    "unknown llm.provider '{}' (expected '{PROVIDER_ANTHROPIC}' or '{PROVIDER_OFFLINE}')",
                    self.llm.provider
                ),
            );
        }

        if self.llm.model.trim().is_empty() {
            warn(WarnLevel::Error, "llm.model is empty".to_string());
        }

        if self.llm.max_tokens == 0 {
            warn(WarnLevel::Error, "llm.max_tokens must be greater than 0".to_string());
        }

        if self.schedule.due_window_days == 0 {
            warn(
                WarnLevel::Warning,
                "schedule.due_window_days is 0: only communications due today will be listed"
                    .to_string(),
            );
        }

        if self.llm.timeout_seconds == 0 {
            warn(
                WarnLevel::Warning,
                "llm.timeout_seconds is 0: every request will time out".to_string(),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
