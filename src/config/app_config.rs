use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub cache: CacheSettings,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Persistence backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    /// Falls back to `DATABASE_URL` when unset
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub max_capacity: u64,
    /// Entries never expire when unset
    pub time_to_live_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Falls back to `JWT_SECRET` when unset
    pub jwt_secret: Option<String>,
    pub issuer: String,
    pub audience: String,
    pub expiration_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub requests_per_second: u32,
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
    /// Key clients by proxy headers; only safe behind a trusted reverse proxy
    pub trust_proxy_headers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl StorageSettings {
    /// Configured database URL, or `DATABASE_URL` from the environment
    pub fn resolve_database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .filter(|url| !url.is_empty())
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_live_secs: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: "mos-eisley-cantina".to_string(),
            audience: "mos-eisley-cantina-clients".to_string(),
            expiration_hours: 24,
        }
    }
}

impl AuthConfig {
    /// Configured signing secret, or `JWT_SECRET` from the environment
    pub fn resolve_secret(&self) -> Option<String> {
        self.jwt_secret
            .clone()
            .filter(|secret| !secret.is_empty())
            .or_else(|| std::env::var("JWT_SECRET").ok())
            .filter(|secret| !secret.is_empty())
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: 10,
            requests_per_minute: 100,
            requests_per_hour: 1000,
            trust_proxy_headers: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.cache.max_capacity, 10_000);
        assert!(config.cache.time_to_live_secs.is_none());
        assert_eq!(config.auth.issuer, "mos-eisley-cantina");
        assert_eq!(config.auth.expiration_hours, 24);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.requests_per_minute, 100);
        assert!(!config.rate_limit.trust_proxy_headers);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 9000

                [logging]
                format = "json"

                [rate_limit]
                requests_per_second = 2
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.rate_limit.requests_per_second, 2);
        assert_eq!(config.rate_limit.requests_per_hour, 1000);
    }

    #[test]
    fn test_configured_secret_wins() {
        let auth = AuthConfig {
            jwt_secret: Some("configured".to_string()),
            ..Default::default()
        };

        assert_eq!(auth.resolve_secret(), Some("configured".to_string()));
    }

    #[test]
    fn test_configured_database_url_wins() {
        let storage = StorageSettings {
            database_url: Some("postgres://db/cantina".to_string()),
            ..Default::default()
        };

        assert_eq!(
            storage.resolve_database_url(),
            Some("postgres://db/cantina".to_string())
        );
    }
}
