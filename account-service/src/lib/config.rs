use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::models::Balance;
use crate::domain::user::service::AuthSettings;
use crate::user::errors::BalanceError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub accounts: AccountsConfig,
}

/// Where credentials are kept.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local; everything is lost on restart
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccountsConfig {
    pub default_balance: i64,
}

/// Error for configured values that parse but make no sense
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("jwt.expiration_hours must be positive, got {0}")]
    NonPositiveTokenLifetime(i64),

    #[error("jwt.expiration_hours is too large: {0}")]
    TokenLifetimeOutOfRange(i64),
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Account policy for the domain service.
    ///
    /// # Errors
    /// * `Negative` - Configured default balance is below zero
    pub fn auth_settings(&self) -> Result<AuthSettings, BalanceError> {
        Ok(AuthSettings {
            default_balance: Balance::new(self.accounts.default_balance)?,
        })
    }

    /// Validity window of issued session tokens.
    ///
    /// # Errors
    /// * `NonPositiveTokenLifetime` - Tokens would be born expired
    /// * `TokenLifetimeOutOfRange` - Expiry of a token issued now is not representable
    pub fn token_lifetime(&self) -> Result<chrono::Duration, SettingsError> {
        let hours = self.jwt.expiration_hours;
        if hours <= 0 {
            return Err(SettingsError::NonPositiveTokenLifetime(hours));
        }

        let lifetime = chrono::Duration::try_hours(hours)
            .ok_or(SettingsError::TokenLifetimeOutOfRange(hours))?;
        Utc::now()
            .checked_add_signed(lifetime)
            .ok_or(SettingsError::TokenLifetimeOutOfRange(hours))?;

        Ok(lifetime)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
