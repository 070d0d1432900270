use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub scanner: ScannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// How long scan feedback stays on screen (fade in + hold + fade out)
    pub feedback_display_ms: u64,
}

impl ScannerConfig {
    pub fn feedback_display(&self) -> Duration {
        Duration::from_millis(self.feedback_display_ms)
    }
}

impl Config {
    /// Built-in defaults, before any file or environment source
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("api.base_url", "http://localhost:8080")?
            .set_default("api.timeout_ms", 30_000_i64)?
            .set_default("scanner.feedback_display_ms", 2_300_i64)
    }

    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `CAMPUSBUS__API__BASE_URL=https://...`
            .add_source(config::Environment::with_prefix("CAMPUSBUS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
