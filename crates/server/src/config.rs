use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable naming an alternate config file.
pub const ENV_CONFIG_PATH: &str = "CASEBOOK_CONFIG";
pub const ENV_DATASET_PATH: &str = "CASEBOOK_DATASET_PATH";
pub const ENV_BIND_ADDR: &str = "CASEBOOK_BIND_ADDR";
pub const ENV_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Read `.env` and the config file, apply environment overrides, and store
/// the result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable config file falls back to defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();

        let path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| CONFIG_PATH.to_string());
        let mut config = read_config_file(&path);
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        tracing::info!(
            dataset = %config.dataset.path,
            bind_addr = %config.server.bind_addr,
            telemetry = config.features.telemetry,
            "configuration loaded"
        );
        config
    })
}

/// Get the loaded config. Returns defaults if `load_config()` hasn't run yet.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

fn read_config_file(path: &str) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
            tracing::warn!(path, error = %e, "failed to parse config file, using defaults");
            AppConfig::default()
        }),
        Err(e) => {
            tracing::warn!(path, error = %e, "config file not readable, using defaults");
            AppConfig::default()
        }
    }
}

/// Overlay environment variables onto `config`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = lookup(ENV_DATASET_PATH) {
        config.dataset.path = path;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDR) {
        config.server.bind_addr = addr;
    }
    if let Some(endpoint) = lookup(ENV_OTLP_ENDPOINT) {
        config.telemetry.endpoint = Some(endpoint);
    }
}
