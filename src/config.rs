use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Postgres connection string. Without it the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub seed_foods: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 10,
            host: "0.0.0.0".into(),
            port: 8080,
            seed_foods: true,
        }
    }
}

fn env_parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has invalid value {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            db_max_connections: env_parsed("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            host: std::env::var("APP_HOST").unwrap_or(defaults.host),
            port: env_parsed("APP_PORT", defaults.port)?,
            seed_foods: env_parsed("SEED_FOODS", defaults.seed_foods)?,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_parses() {
        let addr = AppConfig::default().bind_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn malformed_numbers_are_errors() {
        std::env::set_var("NUTRIPLAN_TEST_PORT", "eighty");
        assert!(env_parsed::<u16>("NUTRIPLAN_TEST_PORT", 8080).is_err());
        std::env::remove_var("NUTRIPLAN_TEST_PORT");
        assert_eq!(env_parsed::<u16>("NUTRIPLAN_TEST_PORT", 8080).unwrap(), 8080);
    }
}
