use config::{Config as ConfigBuilder, ConfigError, Environment as EnvSource, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use wistia_client::{Environment, WistiaClient};

use crate::error::ProviderError;

/// Provider configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Wistia access token with read, update, delete and upload permissions.
    pub access_token: String,
    /// Wistia deployment (`production` or `staging`).
    #[serde(alias = "env")]
    pub environment: Environment,
    /// Overrides the environment's API endpoint.
    pub api_endpoint: Option<String>,
    /// Overrides the environment's upload endpoint.
    pub upload_endpoint: Option<String>,
    pub logging: LoggingConfig,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_token", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_endpoint", &self.api_endpoint)
            .field("upload_endpoint", &self.upload_endpoint)
            .field("logging", &self.logging)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl ProviderConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    ///
    /// Environment variables use the `WISTIA_` prefix, with `__` separating
    /// nested keys: `WISTIA_ACCESS_TOKEN`, `WISTIA_ENV`,
    /// `WISTIA_LOGGING__LEVEL`.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        builder = builder.add_source(
            EnvSource::with_prefix("WISTIA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check the settings that would otherwise only fail on first use.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.access_token.trim().is_empty() {
            errors.push(
                "access_token is required (set WISTIA_ACCESS_TOKEN or access_token in the config file)"
                    .to_string(),
            );
        }
        for (name, endpoint) in [
            ("api_endpoint", &self.api_endpoint),
            ("upload_endpoint", &self.upload_endpoint),
        ] {
            if let Some(endpoint) = endpoint {
                if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                    errors.push(format!("{name} must be an http(s) URL, got '{endpoint}'"));
                }
            }
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the API client this configuration describes.
    pub fn client(&self) -> Result<WistiaClient, ProviderError> {
        let mut builder = WistiaClient::builder(&self.access_token).environment(self.environment);
        if let Some(endpoint) = &self.api_endpoint {
            builder = builder.api_endpoint(endpoint);
        }
        if let Some(endpoint) = &self.upload_endpoint {
            builder = builder.upload_endpoint(endpoint);
        }
        builder
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> ProviderConfig {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.api_endpoint.is_none());
    }

    #[test]
    fn test_staging_from_file() {
        let config = from_toml(
            r#"
            access_token = "abc"
            environment = "staging"

            [logging]
            level = "trace"
            "#,
        );
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "pretty");

        let client = config.client().unwrap();
        assert_eq!(client.api_url("projects.json"), "https://api.wistia.st/v1/projects.json");
        assert_eq!(client.upload_url(), "https://upload-v2.wistia.st/");
    }

    #[test]
    fn test_env_alias() {
        let config = from_toml(
            r#"
            access_token = "abc"
            env = "staging"
            "#,
        );
        assert_eq!(config.environment, Environment::Staging);
    }

    #[test]
    fn test_environment_name_is_case_insensitive() {
        let config = from_toml(
            r#"
            access_token = "abc"
            env = "Staging"
            "#,
        );
        assert_eq!(config.environment, Environment::Staging);
    }

    #[test]
    fn test_endpoint_overrides() {
        let config = from_toml(
            r#"
            access_token = "abc"
            api_endpoint = "http://localhost:9000/v1/"
            "#,
        );
        let client = config.client().unwrap();
        assert_eq!(client.api_url("projects.json"), "http://localhost:9000/v1/projects.json");
        assert_eq!(client.upload_url(), "https://upload.wistia.com/");
    }

    #[test]
    fn test_validate() {
        let errors = ProviderConfig::default().validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("access_token"));

        let config = ProviderConfig {
            access_token: "abc".to_string(),
            api_endpoint: Some("ftp://nope".to_string()),
            logging: LoggingConfig {
                format: "xml".to_string(),
                ..LoggingConfig::default()
            },
            ..ProviderConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().len(), 2);

        let config = ProviderConfig {
            access_token: "abc".to_string(),
            ..ProviderConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_rejects_unusable_token() {
        let config = ProviderConfig {
            access_token: "abc\ndef".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(config.client(), Err(ProviderError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig {
            access_token: "super-secret".to_string(),
            ..ProviderConfig::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
