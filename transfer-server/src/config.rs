//! Server configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use crate::transfer::TransferSearchConfig;

/// Address the server listens on when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Error reading the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {name}={value}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// JSON data set to load (`TRANSIT_DATA`).
    pub data_path: PathBuf,

    /// Listen address (`BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Boarding search settings (`DEFINITIVE_MIN_TRANSFER_TIME`,
    /// `ABORT_AFTER_NORMAL_TRIPS`).
    pub search: TransferSearchConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_path = lookup("TRANSIT_DATA")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("TRANSIT_DATA"))?;

        let bind_addr = parse_var(&lookup, "BIND_ADDR")?.unwrap_or(DEFAULT_BIND_ADDR);

        let defaults = TransferSearchConfig::default();
        let search = TransferSearchConfig::new(
            parse_var(&lookup, "DEFINITIVE_MIN_TRANSFER_TIME")?
                .unwrap_or(defaults.definitive_min_time),
            parse_var(&lookup, "ABORT_AFTER_NORMAL_TRIPS")?
                .unwrap_or(defaults.abort_after_normal_trips),
        );

        Ok(Self {
            data_path,
            bind_addr,
            search,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::from_lookup(lookup(&[("TRANSIT_DATA", "data.json")])).unwrap();

        assert_eq!(config.data_path, PathBuf::from("data.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.search, TransferSearchConfig::default());
    }

    #[test]
    fn custom_config() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_DATA", "/srv/data.json"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DEFINITIVE_MIN_TRANSFER_TIME", "true"),
            ("ABORT_AFTER_NORMAL_TRIPS", "8"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.search.definitive_min_time);
        assert_eq!(config.search.abort_after_normal_trips, 8);
    }

    #[test]
    fn missing_data_path() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("TRANSIT_DATA"))
        );
    }

    #[test]
    fn invalid_values() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_DATA", "data.json"),
            ("ABORT_AFTER_NORMAL_TRIPS", "many"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "ABORT_AFTER_NORMAL_TRIPS", .. })
        ));

        let result = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_DATA", "data.json"),
            ("BIND_ADDR", "localhost"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "BIND_ADDR", .. })));
    }
}
