use std::net::IpAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use chrono_tz::Tz;
use setlist_core::dates::DEFAULT_TIMEZONE;

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 1 MiB).
    pub max_body_bytes: usize,
    /// Zone used for "tonight", "this weekend" and bare dates.
    pub timezone: Tz,
    /// Upper bound on pooled database connections (default: `25`).
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection (default: `5`).
    pub db_acquire_timeout_secs: u64,
    /// Application log level (default: `info`).
    pub log_level: String,
    pub log_format: LogFormat,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                      |
    /// |---------------------------|----------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                    |
    /// | `PORT`                    | `8080`                                       |
    /// | `DATABASE_URL`            | required                                     |
    /// | `CORS_ORIGINS`            | `http://localhost:3000,http://localhost:8080`|
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                         |
    /// | `MAX_BODY_BYTES`          | `1048576`                                    |
    /// | `DIRECTORY_TIMEZONE`      | `America/New_York`                           |
    /// | `DB_MAX_CONNECTIONS`      | `25`                                         |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                                          |
    /// | `LOG_LEVEL`               | `info`                                       |
    /// | `LOG_FORMAT`              | `pretty` (or `json`)                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| invalid("CORS_ORIGINS", origin, e))?;
        }

        let timezone = match get("DIRECTORY_TIMEZONE") {
            None => DEFAULT_TIMEZONE,
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| invalid("DIRECTORY_TIMEZONE", &raw, e))?,
        };

        let log_level = get("LOG_LEVEL")
            .unwrap_or_else(|| "info".into())
            .to_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(invalid(
                "LOG_LEVEL",
                &log_level,
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid("LOG_FORMAT", other, "expected pretty or json")),
        };

        Ok(Self {
            host: parse_or(&get, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&get, "PORT", 8080)?,
            database_url,
            cors_origins,
            request_timeout_secs: parse_or(&get, "REQUEST_TIMEOUT_SECS", 30)?,
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", 1024 * 1024)?,
            timezone,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 25)?,
            db_acquire_timeout_secs: parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            log_level,
            log_format,
        })
    }
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| invalid(var, &raw, e)),
    }
}

fn invalid(var: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/setlist")]).unwrap();
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:8080"]
        );
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.db_max_connections, 25);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn database_url_is_required() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/setlist"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "https://a.example, https://b.example ,"),
            ("DIRECTORY_TIMEZONE", "America/Chicago"),
            ("LOG_FORMAT", "json"),
            ("LOG_LEVEL", "WARN"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.timezone, chrono_tz::America::Chicago);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        assert_matches!(
            load(&[("DATABASE_URL", "x"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("DATABASE_URL", "x"), ("DIRECTORY_TIMEZONE", "Mars/Olympus")]),
            Err(ConfigError::Invalid { var: "DIRECTORY_TIMEZONE", .. })
        );
        assert_matches!(
            load(&[("DATABASE_URL", "x"), ("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { var: "LOG_FORMAT", .. })
        );
        assert_matches!(
            load(&[("DATABASE_URL", "x"), ("HOST", "not-an-ip")]),
            Err(ConfigError::Invalid { var: "HOST", .. })
        );
    }
}
