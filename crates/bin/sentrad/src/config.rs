//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `sentra.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use sentra_app::services::ingest_service::IngestMode;
use sentra_domain::variant::Variant;

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
    /// Ingestion pipeline settings.
    pub ingest: IngestConfig,
    /// Built-in simulator settings.
    pub simulator: SimulatorConfig,
    /// Server-side live view settings.
    pub live_view: LiveViewConfig,
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

/// Ingestion pipeline configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Where severity is decided; one mode per deployment.
    pub mode: IngestMode,
}

/// Built-in simulator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Run the simulator inside the server process.
    pub enabled: bool,
    /// Delay between ticks, in milliseconds.
    pub interval_ms: u64,
    /// Evaluate severity in the simulator instead of sending raw metrics.
    pub self_evaluate: bool,
    /// Variants to emit readings for.
    pub variants: Vec<Variant>,
}

/// Server-side live view configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LiveViewConfig {
    /// Follow a variant on the event bus and log its alerts.
    pub enabled: bool,
    /// The variant to follow.
    pub variant: Variant,
}

impl Config {
    /// Load configuration from `sentra.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("sentra.toml")?;
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
        if let Ok(val) = std::env::var("SENTRA_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SENTRA_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SENTRA_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SENTRA_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("SENTRA_INGEST_MODE") {
            match val.as_str() {
                "server_computed" => self.ingest.mode = IngestMode::ServerComputed,
                "trust_client" => self.ingest.mode = IngestMode::TrustClient,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("SENTRA_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.simulator.enabled && self.simulator.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "simulator interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
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
            url: "sqlite:sentra.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "sentrad=info,sentra=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 3000,
            self_evaluate: false,
            variants: Variant::ALL.to_vec(),
        }
    }
}

impl Default for LiveViewConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            variant: Variant::Home,
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
