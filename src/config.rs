use dotenvy::dotenv;
use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// No URL means tasks live in memory for the lifetime of the process.
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;

        let database_url = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty());

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.addr(), "127.0.0.1:5000");
        assert_eq!(config.max_connections, 5);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/tarefas"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/tarefas"));
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(config_from(&[("PORT", "70000")]).is_err()); // out of u16 range
    }
}
