use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::validation::TextRules;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://notes.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub text_rules: TextRules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            text_rules: TextRules::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.database_url);

        let allow_empty = lookup("NOTES_ALLOW_EMPTY")
            .map(|s| s.trim().to_lowercase() == "true")
            .unwrap_or(defaults.text_rules.allow_empty);

        Self {
            host: parse_or(&lookup, "NOTES_HOST", defaults.host),
            port: parse_or(&lookup, "NOTES_PORT", defaults.port),
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            text_rules: TextRules {
                allow_empty,
                max_length: lookup("NOTES_MAX_LENGTH")
                    .and_then(|raw| parse_value("NOTES_MAX_LENGTH", &raw)),
            },
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn log_configuration(&self) {
        log::info!("Server configuration:");
        log::info!("  NOTES_HOST: {}", self.host);
        log::info!("  NOTES_PORT: {}", self.port);
        log::info!("  DATABASE_URL: {}", self.database_url);
        log::info!("  DATABASE_MAX_CONNECTIONS: {}", self.max_connections);
        log::info!("  NOTES_ALLOW_EMPTY: {}", self.text_rules.allow_empty);
        match self.text_rules.max_length {
            Some(max) => log::info!("  NOTES_MAX_LENGTH: {}", max),
            None => log::info!("  NOTES_MAX_LENGTH: unlimited"),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|raw| parse_value(key, &raw))
        .unwrap_or(default)
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid value {:?} for {}, using the default", raw, key);
            None
        }
    }
}
