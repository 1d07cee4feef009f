//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::client::{Credentials, PenguinClient};

/// Connection settings for the Penguin API, merged from defaults,
/// configuration files, and `PENGUIN_*` environment variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "PENGUIN")]
pub struct PenguinConfig {
    /// Base URL of the API, including any path prefix. Required.
    #[ortho_config(default = String::new())]
    pub endpoint: String,
    /// Legacy bearer token.
    pub auth_token: Option<String>,
    /// JWT issued by the service. Sent alongside the legacy token when both
    /// are set.
    pub jwt: Option<String>,
    /// Overrides the `User-Agent` header.
    pub user_agent: Option<String>,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl PenguinConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to penguin.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags in
    /// that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("penguin")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation on required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the endpoint is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.endpoint,
            &FieldMetadata {
                description: "Penguin API endpoint",
                env_var: "PENGUIN_ENDPOINT",
                toml_key: "endpoint",
            },
        )
    }

    /// Credentials carried by this configuration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.auth_token.clone(), self.jwt.clone())
    }

    /// Validates the configuration and builds an API client from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when validation fails, or
    /// [`ConfigError::Client`] when the endpoint or credentials are rejected
    /// by the client.
    pub fn client(&self) -> Result<PenguinClient, ConfigError> {
        self.validate()?;
        let mut builder = PenguinClient::builder(self.endpoint.as_str()).credentials(self.credentials());
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        builder
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
    /// Raised when the configured values cannot produce a client.
    #[error("invalid client configuration: {0}")]
    Client(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
