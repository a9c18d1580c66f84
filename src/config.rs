use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

use crate::security::policy::PermissionPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(range(min = 1, max = 256))]
    pub workers: Option<usize>,

    // Logging
    pub log_format: LogFormat,

    // Permission hook
    pub multiply_permission: PermissionPolicy,

    // CORS preflight cache, seconds
    pub cors_max_age: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            workers: None,

            log_format: LogFormat::Text,

            multiply_permission: PermissionPolicy::Allow,

            cors_max_age: 3600,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("CALC_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("CALC_PORT") {
            config.port = port.parse().map_err(|e| format!("Invalid port: {}", e))?;
        }

        if let Some(workers) = lookup("CALC_WORKERS") {
            config.workers = Some(
                workers
                    .parse()
                    .map_err(|e| format!("Invalid workers: {}", e))?,
            );
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            config.log_format = match format.to_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(format!("Invalid log format: {}", format)),
            };
        }

        if let Some(permission) = lookup("MULTIPLY_PERMISSION") {
            config.multiply_permission = permission.parse()?;
        }

        if let Some(max_age) = lookup("CORS_MAX_AGE") {
            config.cors_max_age = max_age
                .parse()
                .map_err(|e| format!("Invalid cors_max_age: {}", e))?;
        }

        config
            .validate()
            .map_err(|e| format!("Invalid configuration: {}", e))?;

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
