use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/events";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" | "inmemory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageKind,
    pub database_url: String,
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            storage: parse_var("STORAGE_BACKEND", StorageKind::Postgres),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            host: parse_var("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_var("PORT", DEFAULT_PORT),
            api_prefix: normalize_prefix(&env::var("API_PREFIX").unwrap_or_default()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Config: invalid {}='{}' ({}), using default", name, raw, e);
                default
            }
        },
        _ => default,
    }
}

/// `"api/"` becomes `"/api"`; blank or `"/"` means no prefix.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/"), "/api");
        assert_eq!(normalize_prefix(" /api/v1 "), "/api/v1");
    }

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("postgres".parse::<StorageKind>(), Ok(StorageKind::Postgres));
        assert_eq!("Memory".parse::<StorageKind>(), Ok(StorageKind::Memory));
        assert!("sqlite".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        std::env::set_var("EVENTS_TEST_PORT", "not-a-port");
        assert_eq!(parse_var("EVENTS_TEST_PORT", 8000u16), 8000);

        std::env::set_var("EVENTS_TEST_PORT", "9001");
        assert_eq!(parse_var("EVENTS_TEST_PORT", 8000u16), 9001);

        std::env::remove_var("EVENTS_TEST_PORT");
        assert_eq!(parse_var("EVENTS_TEST_PORT", 8000u16), 8000);
    }
}
