//! Server configuration
//!
//! Read from the environment (after `dotenvy` has loaded any `.env` file).
//! Every setting has a default, so an empty environment is a valid config.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalogue: CatalogueConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    /// Upper bound on an uploaded catalogue, in bytes
    pub max_upload_bytes: usize,
    /// Budget for parsing and indexing one document
    pub parse_timeout: Duration,
    /// Budget for rasterizing one page
    pub render_timeout: Duration,
    /// Rendered pages kept per loaded catalogue (0 disables the cache)
    pub render_cache_pages: usize,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                port: 8000,
            },
            catalogue: CatalogueConfig::default(),
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
        }
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 256 * 1024 * 1024,
            parse_timeout: Duration::from_secs(120),
            render_timeout: Duration::from_secs(30),
            render_cache_pages: 32,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = parse_var(&lookup, "CATALOGUE_HOST")?.unwrap_or(defaults.server.host);
        let port = parse_var(&lookup, "CATALOGUE_PORT")?.unwrap_or(defaults.server.port);

        let max_upload_bytes = match parse_var::<usize, _>(&lookup, "CATALOGUE_MAX_UPLOAD_MB")? {
            Some(mb) => mb.checked_mul(1024 * 1024).ok_or_else(|| ConfigError::Invalid {
                key: "CATALOGUE_MAX_UPLOAD_MB",
                value: mb.to_string(),
                reason: "too large to express in bytes".to_string(),
            })?,
            None => defaults.catalogue.max_upload_bytes,
        };
        let parse_timeout = parse_var(&lookup, "CATALOGUE_PARSE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.catalogue.parse_timeout);
        let render_timeout = parse_var(&lookup, "CATALOGUE_RENDER_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.catalogue.render_timeout);
        let render_cache_pages = parse_var(&lookup, "CATALOGUE_RENDER_CACHE_PAGES")?
            .unwrap_or(defaults.catalogue.render_cache_pages);

        let allowed_origins = lookup("CATALOGUE_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            server: ServerConfig { host, port },
            catalogue: CatalogueConfig {
                max_upload_bytes,
                parse_timeout,
                render_timeout,
                render_cache_pages,
            },
            cors: CorsConfig { allowed_origins },
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map(Some).map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

/// Comma separated origins; `*` anywhere means any origin
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_from_empty_env() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.catalogue.max_upload_bytes, 256 * 1024 * 1024);
        assert_eq!(config.catalogue.render_cache_pages, 32);
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CATALOGUE_HOST", "127.0.0.1"),
            ("CATALOGUE_PORT", "9090"),
            ("CATALOGUE_MAX_UPLOAD_MB", "10"),
            ("CATALOGUE_RENDER_TIMEOUT_SECS", "5"),
            ("CATALOGUE_RENDER_CACHE_PAGES", "0"),
            ("CATALOGUE_ALLOWED_ORIGINS", "http://localhost:3000, https://shop.example"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.catalogue.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.catalogue.render_timeout, Duration::from_secs(5));
        assert_eq!(config.catalogue.render_cache_pages, 0);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:3000", "https://shop.example"]
        );
    }

    #[test]
    fn test_wildcard_origin() {
        let config = Config::from_lookup(lookup(&[(
            "CATALOGUE_ALLOWED_ORIGINS",
            "http://a.test,*",
        )]))
        .unwrap();
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_upload_limit_overflow_is_rejected() {
        let huge = usize::MAX.to_string();
        let err = Config::from_lookup(lookup(&[("CATALOGUE_MAX_UPLOAD_MB", huge.as_str())]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "CATALOGUE_MAX_UPLOAD_MB",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("CATALOGUE_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("CATALOGUE_PORT"));
    }
}
