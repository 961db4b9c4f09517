use std::{env, fmt::Display, str::FromStr};

use log::debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Loads a `.env` file if one exists. Variables already set in the
/// environment take precedence.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("ignoring unreadable .env file: {e}"),
    }
}

pub fn var(key: &'static str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

pub fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

pub fn size_var(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Some(value) = var(key) else {
        return Ok(default);
    };

    match parse_value::<usize>(key, &value)? {
        0 => Err(ConfigError::Invalid {
            key,
            value,
            reason: "must be at least 1".to_string(),
        }),
        size => Ok(size),
    }
}

pub fn flag_var(key: &'static str) -> Result<bool, ConfigError> {
    match var(key) {
        Some(value) => parse_flag(key, &value),
        None => Ok(false),
    }
}

pub fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
