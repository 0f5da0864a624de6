//! Runtime configuration and logging setup.

use crate::error::AppError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "./tutorial.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

pub const ENV_DATABASE_PATH: &str = "TUTORIAL_DATABASE_PATH";
pub const ENV_BIND_ADDR: &str = "TUTORIAL_BIND_ADDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|v| !v.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup(ENV_BIND_ADDR).filter(|v| !v.trim().is_empty()) {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{}={:?}: {}", ENV_BIND_ADDR, addr, e)))?;
        }
        Ok(config)
    }
}

/// Install the `env_logger` backend; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn overrides_apply() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DATABASE_PATH, "/tmp/other.db"),
            (ENV_BIND_ADDR, "0.0.0.0:9000"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn bad_bind_addr_is_config_error() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_BIND_ADDR, "not-an-addr")])).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
