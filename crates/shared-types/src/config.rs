use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default location of the case table, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/cases.csv";

/// Default listen address for the REST server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Feature flags controlling which optional integrations are active.
///
/// Every field defaults to `false` so that a missing or incomplete config
/// file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
}

/// `[dataset]` section of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    DEFAULT_DATASET_PATH.to_string()
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

/// Default idle time after which a dashboard session is dropped.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Default cap on live dashboard sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// `[sessions]` section: limits on the in-memory session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    #[serde(default = "default_session_idle_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_session_idle_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_idle_secs() -> u64 {
    DEFAULT_SESSION_IDLE_SECS
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

/// `[telemetry]` section: where OTLP traces and logs are shipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetrySettings {
    /// Collector gRPC address, e.g. `http://localhost:4317`.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Extra gRPC metadata sent with every export (collector API keys).
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            service_name: default_service_name(),
            environment: default_environment(),
            headers: HashMap::new(),
        }
    }
}

fn default_service_name() -> String {
    "casebook".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}
