//! Configuration
//!
//! `config.toml` in the config root, all sections optional:
//!
//! ```toml
//! [service]
//! endpoint = "https://ii.nlm.nih.gov/metamaplite/rest/annotate"
//! api_key = "env:UMLS_API_KEY"
//! key_placement = "body"
//! key_field = "apiKey"
//! timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! format = "text"
//! dir = "logs"
//! ```
//!
//! `CLINICAL_NER_API_KEY` and `CLINICAL_NER_ENDPOINT` override the file.

use crate::annotate::request::RESERVED_FIELDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name inside the config root
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default annotation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://ii.nlm.nih.gov/metamaplite/rest/annotate";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Env var overriding `service.api_key`
pub const ENV_API_KEY: &str = "CLINICAL_NER_API_KEY";
/// Env var overriding `service.endpoint`
pub const ENV_ENDPOINT: &str = "CLINICAL_NER_ENDPOINT";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Environment variable {0} referenced by api_key is not set")]
    MissingEnv(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where the API key travels in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPlacement {
    /// Form field in the request body
    #[default]
    Body,
    /// Query string parameter
    Query,
}

/// Annotation service settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    /// Literal key or `env:VAR` reference (resolved by [`AppConfig::resolve_with`])
    pub api_key: Option<String>,
    pub key_placement: KeyPlacement,
    /// Parameter name carrying the key
    pub key_field: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            key_placement: KeyPlacement::Body,
            key_field: "apiKey".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("key_placement", &self.key_placement)
            .field("key_field", &self.key_field)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ServiceConfig {
    /// Service config pointing at `endpoint` with a literal key (tests, embedding)
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Set key placement
    pub fn with_key_placement(mut self, placement: KeyPlacement) -> Self {
        self.key_placement = placement;
        self
    }

    /// Set timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check settings that would otherwise fail at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "service.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "service.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.key_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "service.key_field must not be empty".to_string(),
            ));
        }
        let key_field = self.key_field.trim();
        if RESERVED_FIELDS
            .iter()
            .any(|field| field.eq_ignore_ascii_case(key_field))
        {
            return Err(ConfigError::Invalid(format!(
                "service.key_field '{}' collides with a request field",
                self.key_field
            )));
        }
        Ok(())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (`info`, `clinical_ner=debug`, ...)
    pub level: String,
    pub format: LogFormat,
    /// Log directory; relative paths are joined to the config root
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Directory for file logs (default `<config_root>/logs`)
    pub fn log_dir(&self, config_root: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => config_root.join(dir),
            None => config_root.join("logs"),
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load `config.toml` from `config_root`, apply process env, validate
    pub fn load(config_root: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_file(&config_root.join(CONFIG_FILE_NAME))?;
        let config = config.resolve_with(|name| std::env::var(name).ok())?;
        config.service.validate()?;
        Ok(config)
    }

    /// Read a config file; a missing file yields defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve `env:` references and env overrides through `lookup`
    pub fn resolve_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.service.api_key.take() {
            let resolved = match key.strip_prefix("env:") {
                Some(var) => {
                    lookup(var).ok_or_else(|| ConfigError::MissingEnv(var.to_string()))?
                }
                None => key,
            };
            self.service.api_key = Some(resolved);
        }

        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.service.api_key = Some(key);
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|e| !e.trim().is_empty()) {
            self.service.endpoint = endpoint;
        }

        self.service.api_key = self.service.api_key.filter(|k| !k.trim().is_empty());
        Ok(self)
    }
}
