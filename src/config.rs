use serde::Deserialize;
use std::time::Duration;

use crate::batch::{BatchPolicy, PollPolicy};
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub aps: ApsConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
    /// Page size used when listing projects and project users.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatchConfig {
    #[serde(default = "default_batch_size")]
    pub size: usize,
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
    /// Product keys that batch assignment forwards to ACC. Anything else is dropped.
    #[serde(default = "default_allowed_products")]
    pub allowed_products: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    /// 0 polls until the project is active, however long that takes.
    #[serde(default = "default_poll_max_attempts")]
    pub max_attempts: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://developer.api.autodesk.com".to_string()
}

fn default_userinfo_url() -> String {
    "https://api.userprofile.autodesk.com/userinfo".to_string()
}

fn default_page_size() -> u32 {
    200
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_delay_ms() -> u64 {
    1000
}

fn default_allowed_products() -> Vec<String> {
    ["docs", "designCollaboration", "modelCoordination", "insight"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_poll_max_attempts() -> u32 {
    300 // ~5 minutes at the default interval
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            userinfo_url: default_userinfo_url(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: default_batch_size(),
            delay_ms: default_batch_delay_ms(),
            allowed_products: default_allowed_products(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_attempts: default_poll_max_attempts(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("acc-admin").required(false));
        }

        // Environment variable overrides with ACC_ADMIN_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("ACC_ADMIN")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("batch.allowed_products"),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.batch.size == 0 {
            return Err(AppError::Config("batch.size must be at least 1".to_string()));
        }
        if self.aps.page_size == 0 {
            return Err(AppError::Config("aps.page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        BatchPolicy::new(self.batch.size, Duration::from_millis(self.batch.delay_ms))
    }

    pub fn poll_policy(&self) -> PollPolicy {
        let max_attempts = match self.poll.max_attempts {
            0 => None,
            n => Some(n),
        };
        PollPolicy::new(Duration::from_millis(self.poll.interval_ms), max_attempts)
    }
}
