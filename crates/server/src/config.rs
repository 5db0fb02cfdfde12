use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE_VAR: &str = "BB_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("pool_size must be at least 1")]
    EmptyPool,
}

/// Service settings. Values come from an optional YAML file named by `BB_CONFIG`,
/// then `BB_*` environment variables override them one by one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub storage_dir: PathBuf,
    pub pool_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            storage_dir: PathBuf::from("data"),
            pool_size: 10,
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = match lookup(CONFIG_FILE_VAR) {
            Some(path) => {
                info!("Reading config file {path}");
                let path = PathBuf::from(path);
                let raw = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_yaml_str(&raw)?
            }
            None => Self::default(),
        };

        let config = Self {
            bind: try_override(&lookup, "BB_BIND", base.bind),
            port: try_override(&lookup, "BB_PORT", base.port),
            storage_dir: try_override(&lookup, "BB_STORAGE_DIR", base.storage_dir.display().to_string())
                .into(),
            pool_size: try_override(&lookup, "BB_POOL_SIZE", base.pool_size),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(())
    }
}

fn try_override<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, current: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using {current}");
        return current;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using {current}");
        current
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.address(), "0.0.0.0:3000");
        assert_eq!(config.pool_size, 10);
    }

    #[test]
    fn environment_overrides_and_bad_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("BB_PORT", "8080"),
            ("BB_BIND", "127.0.0.1"),
            ("BB_POOL_SIZE", "many"),
            ("BB_STORAGE_DIR", "/var/lib/board"),
        ]))
        .expect("config");
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/board"));
    }

    #[test]
    fn zero_pool_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("BB_POOL_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPool));
    }

    #[test]
    fn yaml_fills_missing_keys_with_defaults() {
        let config = ServerConfig::from_yaml_str("port: 4000\npool_size: 4\n").expect("yaml");
        assert_eq!(config.port, 4000);
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.bind, "0.0.0.0");

        assert!(matches!(
            ServerConfig::from_yaml_str("colour: blue\n").unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = ServerConfig::from_lookup(lookup_from(&[(
            CONFIG_FILE_VAR,
            "/nonexistent/bb_server.yaml",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
