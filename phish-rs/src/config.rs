//! Configuration for phish-rs

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{PhishError, Result};

/// Environment variable naming the config file when none is passed on the command line
pub const CONFIG_ENV: &str = "PHISH_CONFIG";

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8501")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Model artifact locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: String,
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,
    /// Expected SHA-256 of the vectorizer artifact (hex)
    #[serde(default)]
    pub vectorizer_sha256: Option<String>,
    /// Expected SHA-256 of the classifier artifact (hex)
    #[serde(default)]
    pub classifier_sha256: Option<String>,
}

/// Page presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_page_title")]
    pub page_title: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8501".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_vectorizer_path() -> String {
    "models/vectorizer.json".to_string()
}

fn default_classifier_path() -> String {
    "models/classifier.json".to_string()
}

fn default_page_title() -> String {
    "Email Phishing Classifier".to_string()
}

fn default_image_url() -> String {
    "https://cdn.prod.website-files.com/6082ee0e95eb6459d78fac06/65282af97ae4be5ae1873a26_65282aca65ccd0bcf0af3995_Phishing-email-examples-lead-image.webp".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: default_vectorizer_path(),
            classifier_path: default_classifier_path(),
            vectorizer_sha256: None,
            classifier_sha256: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            image_url: default_image_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PhishError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PhishError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Resolve the configuration: explicit path, then `PHISH_CONFIG`, then
    /// `config.toml` in the working directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(path);
        }

        if Path::new("config.toml").exists() {
            return Self::from_file("config.toml");
        }

        Ok(Self::default())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.listen_addr.parse::<SocketAddr>().map_err(|e| {
            PhishError::Config(format!(
                "Invalid listen address '{}': {}",
                self.server.listen_addr, e
            ))
        })?;

        if self.server.max_body_bytes == 0 {
            return Err(PhishError::Config(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }

        if self.model.vectorizer_path.trim().is_empty()
            || self.model.classifier_path.trim().is_empty()
        {
            return Err(PhishError::Config("Model paths must not be empty".to_string()));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(PhishError::Config(format!(
                "Unknown log format '{}' (expected \"pretty\" or \"json\")",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8501");
        assert_eq!(config.model.vectorizer_path, "models/vectorizer.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
listen_addr = "127.0.0.1:9000"

[model]
vectorizer_path = "/srv/phish/tfidf.json"
classifier_path = "/srv/phish/logreg.json"
classifier_sha256 = "abc123"

[logging]
format = "json"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert_eq!(config.model.vectorizer_path, "/srv/phish/tfidf.json");
        assert_eq!(config.model.classifier_sha256.as_deref(), Some("abc123"));
        assert!(config.model.vectorizer_sha256.is_none());
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ui.page_title, "Email Phishing Classifier");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8501");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_listen_addr() {
        let mut config = Config::default();
        config.server.listen_addr = "not-an-address".to_string();
        assert!(matches!(config.validate(), Err(PhishError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let mut config = Config::default();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phish.toml");
        std::fs::write(&path, "[ui]\npage_title = \"Mail Check\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ui.page_title, "Mail Check");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/phish.toml").unwrap_err();
        assert!(matches!(err, PhishError::Config(_)));
    }
}
