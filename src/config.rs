//! Service configuration.
//!
//! Values come from the environment (see [`ApiConfigBuilder::from_env`]) and
//! may be overridden by CLI flags before [`ApiConfigBuilder::build`] validates
//! them.

use std::time::Duration;
use thiserror::Error;

use crate::db::{DB_MAX_CONNECTIONS, DEFAULT_SLOW_QUERY};

pub const DEFAULT_ROUTER_ENDPOINT: &str = "0.0.0.0:8080";

pub const ENV_DB_CONNECTION_STRING: &str = "DB_CONNECTION_STRING";
pub const ENV_ROUTER_ENDPOINT: &str = "ROUTER_ENDPOINT";
pub const ENV_DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_SLOW_QUERY_SECS: &str = "SLOW_QUERY_SECS";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error: {parameter} - {message}")]
pub struct ConfigError {
    pub parameter: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub db_conn_string: String,
    pub router_endpoint: String,
    pub db_max_connections: u32,
    pub slow_query: Duration,
}

impl ApiConfig {
    #[must_use]
    pub const fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfigBuilder {
    db_conn_string: Option<String>,
    router_endpoint: Option<String>,
    db_max_connections: u32,
    slow_query: Duration,
}

impl ApiConfigBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            db_conn_string: None,
            router_endpoint: None,
            db_max_connections: DB_MAX_CONNECTIONS,
            slow_query: DEFAULT_SLOW_QUERY,
        }
    }

    #[must_use]
    pub const fn development() -> Self {
        Self::new()
            .db_max_connections(5)
            .slow_query(Duration::from_secs(1))
    }

    #[must_use]
    pub const fn testing() -> Self {
        Self::new()
            .db_max_connections(2)
            .slow_query(Duration::from_secs(1))
    }

    #[must_use]
    pub const fn production() -> Self {
        Self::new()
            .db_max_connections(DB_MAX_CONNECTIONS)
            .slow_query(DEFAULT_SLOW_QUERY)
    }

    /// Reads the process environment on top of the production preset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::production();

        if let Some(conn) = lookup(ENV_DB_CONNECTION_STRING) {
            builder = builder.db_conn_string(conn);
        }
        if let Some(endpoint) = lookup(ENV_ROUTER_ENDPOINT) {
            builder = builder.router_endpoint(endpoint);
        }
        if let Some(raw) = lookup(ENV_DB_MAX_CONNECTIONS) {
            let value = raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::new(
                    ENV_DB_MAX_CONNECTIONS,
                    format!("'{raw}' is not a valid count: {e}"),
                )
            })?;
            builder = builder.db_max_connections(value);
        }
        if let Some(raw) = lookup(ENV_SLOW_QUERY_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::new(
                    ENV_SLOW_QUERY_SECS,
                    format!("'{raw}' is not a number of seconds: {e}"),
                )
            })?;
            builder = builder.slow_query(Duration::from_secs(secs));
        }

        Ok(builder)
    }

    #[must_use]
    pub fn db_conn_string<S: Into<String>>(mut self, db_conn_string: S) -> Self {
        self.db_conn_string = Some(db_conn_string.into());
        self
    }

    #[must_use]
    pub fn router_endpoint<S: Into<String>>(mut self, router_endpoint: S) -> Self {
        self.router_endpoint = Some(router_endpoint.into());
        self
    }

    #[must_use]
    pub const fn db_max_connections(mut self, db_max_connections: u32) -> Self {
        self.db_max_connections = db_max_connections;
        self
    }

    #[must_use]
    pub const fn slow_query(mut self, slow_query: Duration) -> Self {
        self.slow_query = slow_query;
        self
    }

    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let db_conn_string = self
            .db_conn_string
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new("db_conn_string", "Database connection string is required")
            })?;

        let router_endpoint = self
            .router_endpoint
            .unwrap_or_else(|| DEFAULT_ROUTER_ENDPOINT.to_string());
        if router_endpoint.trim().is_empty() {
            return Err(ConfigError::new(
                "router_endpoint",
                "Router endpoint must not be empty",
            ));
        }

        if self.db_max_connections == 0 {
            return Err(ConfigError::new(
                "db_max_connections",
                "Max connections must be greater than 0",
            ));
        }

        Ok(ApiConfig {
            db_conn_string,
            router_endpoint,
            db_max_connections: self.db_max_connections,
            slow_query: self.slow_query,
        })
    }
}

impl Default for ApiConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::builder()
            .db_conn_string("postgres://localhost/explorer")
            .build()
            .unwrap();
        assert_eq!(config.router_endpoint, DEFAULT_ROUTER_ENDPOINT);
        assert_eq!(config.db_max_connections, DB_MAX_CONNECTIONS);
        assert_eq!(config.slow_query, DEFAULT_SLOW_QUERY);
    }

    #[test]
    fn test_presets() {
        let dev = ApiConfigBuilder::development()
            .db_conn_string("postgres://dev")
            .build()
            .unwrap();
        assert_eq!(dev.db_max_connections, 5);

        let test = ApiConfigBuilder::testing()
            .db_conn_string("postgres://test")
            .build()
            .unwrap();
        assert_eq!(test.db_max_connections, 2);
        assert_eq!(test.slow_query, Duration::from_secs(1));
    }

    #[test]
    fn test_connection_string_required() {
        let err = ApiConfig::builder().build().unwrap_err();
        assert_eq!(err.parameter, "db_conn_string");

        let err = ApiConfig::builder().db_conn_string("  ").build().unwrap_err();
        assert_eq!(err.parameter, "db_conn_string");
    }

    #[test]
    fn test_zero_connections_rejected() {
        let err = ApiConfig::builder()
            .db_conn_string("postgres://x")
            .db_max_connections(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ApiConfigBuilder::from_lookup(lookup(&[
            (ENV_DB_CONNECTION_STRING, "postgres://env/db"),
            (ENV_ROUTER_ENDPOINT, "127.0.0.1:9000"),
            (ENV_DB_MAX_CONNECTIONS, "12"),
            (ENV_SLOW_QUERY_SECS, "3"),
        ]))
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(config.db_conn_string, "postgres://env/db");
        assert_eq!(config.router_endpoint, "127.0.0.1:9000");
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.slow_query, Duration::from_secs(3));
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let err = ApiConfigBuilder::from_lookup(lookup(&[(ENV_DB_MAX_CONNECTIONS, "many")]))
            .unwrap_err();
        assert_eq!(err.parameter, ENV_DB_MAX_CONNECTIONS);

        let err = ApiConfigBuilder::from_lookup(lookup(&[(ENV_SLOW_QUERY_SECS, "-1")]))
            .unwrap_err();
        assert_eq!(err.parameter, ENV_SLOW_QUERY_SECS);
    }

    #[test]
    fn test_cli_override_wins_over_environment() {
        let config = ApiConfigBuilder::from_lookup(lookup(&[
            (ENV_DB_CONNECTION_STRING, "postgres://env/db"),
            (ENV_ROUTER_ENDPOINT, "127.0.0.1:9000"),
        ]))
        .unwrap()
        .router_endpoint("127.0.0.1:7000")
        .build()
        .unwrap();
        assert_eq!(config.router_endpoint, "127.0.0.1:7000");
    }
}
