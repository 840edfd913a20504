//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `presencehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use presencehub_adapter_push_http::PushConfig;
use presencehub_adapter_push_http::sender::DEFAULT_TIMEOUT;
use presencehub_app::dispatcher::DEFAULT_SEND_TIMEOUT;
use presencehub_app::scheduler::SchedulerConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Evaluation pipeline tuning.
    pub engine: EngineConfig,
    /// Push delivery settings.
    pub push: PushSection,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Trigger scheduler and dispatcher tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pending evaluation requests kept before new ones are coalesced.
    pub queue_capacity: usize,
    /// Minimum delay between two evaluation passes.
    pub min_interval_ms: u64,
    /// Upper bound on a single notification delivery.
    pub send_timeout_secs: u64,
}

/// Push delivery configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PushSection {
    /// Send notifications over HTTP. When off, payloads are only logged.
    pub enabled: bool,
    /// Push service URL.
    pub endpoint: Option<String>,
    /// Bearer token sent with every request.
    pub access_token: Option<String>,
    /// HTTP client timeout.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from `presencehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("presencehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PRESENCEHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("PRESENCEHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PRESENCEHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("PRESENCEHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("PRESENCEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("PRESENCEHUB_PUSH_ENDPOINT") {
            self.push.enabled = true;
            self.push.endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("PRESENCEHUB_PUSH_TOKEN") {
            self.push.access_token = Some(val);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.engine.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "engine.queue_capacity must be non-zero".to_string(),
            ));
        }
        if self.engine.send_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "engine.send_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.push.enabled && self.push.endpoint.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::Validation(
                "push.endpoint is required when push is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    #[must_use]
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            queue_capacity: self.engine.queue_capacity,
            min_interval: Duration::from_millis(self.engine.min_interval_ms),
        }
    }

    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.engine.send_timeout_secs)
    }

    /// Push client settings, or `None` when push delivery is disabled.
    #[must_use]
    pub fn push(&self) -> Option<PushConfig> {
        if !self.push.enabled {
            return None;
        }
        let endpoint = self.push.endpoint.clone()?;
        Some(PushConfig {
            endpoint,
            access_token: self.push.access_token.clone(),
            timeout: self
                .push
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:presencehub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "presencehubd=info,presencehub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let scheduler = SchedulerConfig::default();
        Self {
            queue_capacity: scheduler.queue_capacity,
            min_interval_ms: u64::try_from(scheduler.min_interval.as_millis()).unwrap_or(u64::MAX),
            send_timeout_secs: DEFAULT_SEND_TIMEOUT.as_secs(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
