//! Process configuration, read once at startup.
//!
//! Every value has a default so the binary runs with no environment at all.
//! Malformed values are logged and replaced by their default.

use std::time::Duration;

use fleetreg_infra::{DatabaseConfig, StoreTimeouts};

pub const ENV_HOST: &str = "FLEETREG_HOST";
pub const ENV_PORT: &str = "FLEETREG_PORT";
pub const ENV_DATABASE_PATH: &str = "FLEETREG_DATABASE_PATH";
pub const ENV_MAX_CONNECTIONS: &str = "FLEETREG_MAX_CONNECTIONS";
pub const ENV_TIMEOUT_SCALE: &str = "FLEETREG_TIMEOUT_SCALE";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "FLEETREG_REQUEST_TIMEOUT_MS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
/// Longer than the slowest storage deadline, so storage timeouts surface first.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub timeouts: StoreTimeouts,
    /// Deadline for a whole HTTP request, body read included.
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseConfig::default(),
            timeouts: StoreTimeouts::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = parsed(&lookup, ENV_PORT) {
            config.port = port;
        }

        if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|p| !p.trim().is_empty()) {
            config.database = if path.trim() == fleetreg_infra::db::IN_MEMORY_PATH {
                DatabaseConfig::in_memory()
            } else {
                DatabaseConfig::file(path.trim())
            };
        }

        if let Some(max) = parsed::<u32>(&lookup, ENV_MAX_CONNECTIONS) {
            if config.database.is_in_memory() {
                tracing::warn!("{ENV_MAX_CONNECTIONS} ignored for an in-memory database");
            } else {
                config.database.max_connections = max.max(1);
            }
        }

        if let Some(scale) = parsed::<f64>(&lookup, ENV_TIMEOUT_SCALE) {
            config.timeouts = StoreTimeouts::scaled(scale);
        }

        match parsed::<u64>(&lookup, ENV_REQUEST_TIMEOUT_MS) {
            Some(0) => tracing::warn!("{ENV_REQUEST_TIMEOUT_MS}=0 ignored; using the default"),
            Some(ms) => config.request_timeout = Duration::from_millis(ms),
            None => {}
        }

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("{key}={raw:?} is not valid; using the default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.database.path, "fleetreg.db");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            (ENV_HOST, "0.0.0.0"),
            (ENV_PORT, "9000"),
            (ENV_DATABASE_PATH, "/tmp/cars.db"),
            (ENV_MAX_CONNECTIONS, "8"),
            (ENV_TIMEOUT_SCALE, "2"),
            (ENV_REQUEST_TIMEOUT_MS, "1500"),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.database.path, "/tmp/cars.db");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.timeouts.create_user, Duration::from_secs(12));
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = config_from(&[
            (ENV_PORT, "eighty"),
            (ENV_TIMEOUT_SCALE, "fast"),
            (ENV_REQUEST_TIMEOUT_MS, "-5"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeouts, StoreTimeouts::default());
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);

        let zero = config_from(&[(ENV_REQUEST_TIMEOUT_MS, "0")]);
        assert_eq!(zero.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn in_memory_database_keeps_a_single_connection() {
        let config = config_from(&[(ENV_DATABASE_PATH, ":memory:"), (ENV_MAX_CONNECTIONS, "4")]);
        assert!(config.database.is_in_memory());
        assert_eq!(config.database.max_connections, 1);
    }
}
