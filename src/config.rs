use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::domain::services::retry::RetryPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String, // HS256 secret shared with the identity provider
    pub jwt_audience: String,
    pub profile_poll_attempts: usize,
    pub profile_poll_initial_delay: Duration,
    pub profile_poll_max_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed("PORT", 3000)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string()),
            profile_poll_attempts: parsed("PROFILE_POLL_ATTEMPTS", 5)?,
            profile_poll_initial_delay: Duration::from_millis(parsed("PROFILE_POLL_INITIAL_DELAY_MS", 200)?),
            profile_poll_max_delay: Duration::from_millis(parsed("PROFILE_POLL_MAX_DELAY_MS", 2000)?),
        })
    }

    pub fn profile_poll_policy(&self) -> RetryPolicy {
        RetryPolicy::builder()
            .max_attempts(self.profile_poll_attempts)
            .initial_delay(self.profile_poll_initial_delay)
            .max_delay(self.profile_poll_max_delay)
            .build()
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn parsed<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
