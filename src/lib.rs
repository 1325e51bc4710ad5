//! Mos Eisley Cantina API
//!
//! Menu of dishes and drinks served over HTTP with:
//! - A lookaside cache in front of the store
//! - In-memory or PostgreSQL persistence
//! - Bearer token authentication and per-client rate limiting

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::{AppState, MenuServiceTrait};
use config::{AuthConfig, CacheSettings, RateLimitSettings, StorageSettings};
use domain::{Cache, MenuCategory};
use infrastructure::{
    auth::{JwtConfig, JwtGenerator, JwtService},
    cache::{InMemoryCache, InMemoryCacheConfig},
    rate_limit::{RateLimitConfig, RateLimiter},
    services::MenuService,
    storage::{PostgresConfig, StorageFactory, StorageType},
};
use rand::Rng;
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = create_cache(&config.cache);

    let (dish_service, drink_service) = create_menu_services(&config.storage, cache).await?;

    let secret = config.auth.resolve_secret().unwrap_or_else(|| {
        warn!(
            "No JWT secret configured. Generating random secret. \
             Tokens will not survive a restart; set JWT_SECRET to keep them valid."
        );
        generate_random_secret()
    });
    let jwt_service: Arc<dyn JwtGenerator> =
        Arc::new(JwtService::new(jwt_config(&config.auth, secret)));

    let rate_limiter = create_rate_limiter(&config.rate_limit);

    Ok(AppState {
        dish_service,
        drink_service,
        jwt_service,
        rate_limiter,
    })
}

/// Build the JWT settings from the auth section and a resolved secret
pub fn jwt_config(auth: &AuthConfig, secret: String) -> JwtConfig {
    JwtConfig::new(secret, auth.expiration_hours)
        .with_issuer(auth.issuer.clone())
        .with_audience(auth.audience.clone())
}

fn create_cache(settings: &CacheSettings) -> Arc<dyn Cache> {
    let mut cache_config = InMemoryCacheConfig::default().with_max_capacity(settings.max_capacity);

    if let Some(ttl) = settings.time_to_live_secs {
        cache_config = cache_config.with_time_to_live(Duration::from_secs(ttl));
    }

    info!(
        max_capacity = cache_config.max_capacity,
        time_to_live = ?cache_config.time_to_live,
        "Using in-memory cache"
    );

    Arc::new(InMemoryCache::with_config(cache_config))
}

async fn create_menu_services(
    settings: &StorageSettings,
    cache: Arc<dyn Cache>,
) -> anyhow::Result<(Arc<dyn MenuServiceTrait>, Arc<dyn MenuServiceTrait>)> {
    let backend = StorageType::from_str(&settings.backend)
        .ok_or_else(|| anyhow::anyhow!("Unknown storage backend '{}'", settings.backend))?;

    info!("Storage backend: {:?}", backend);

    match backend {
        StorageType::InMemory => {
            let service = |category: MenuCategory| -> Arc<dyn MenuServiceTrait> {
                Arc::new(MenuService::new(
                    category,
                    StorageFactory::create_in_memory(category),
                    cache.clone(),
                ))
            };

            Ok((service(MenuCategory::Dish), service(MenuCategory::Drink)))
        }
        StorageType::Postgres => {
            let database_url = settings.resolve_database_url().ok_or_else(|| {
                anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
            })?;

            let pg_config = PostgresConfig::new(database_url)
                .with_max_connections(settings.max_connections)
                .with_min_connections(settings.min_connections)
                .with_connect_timeout(settings.connect_timeout_secs);

            let pool = StorageFactory::connect_postgres(&pg_config).await?;

            let dishes =
                StorageFactory::create_postgres_with_pool(pool.clone(), MenuCategory::Dish).await?;
            let drinks =
                StorageFactory::create_postgres_with_pool(pool, MenuCategory::Drink).await?;

            Ok((
                Arc::new(MenuService::new(MenuCategory::Dish, dishes, cache.clone())),
                Arc::new(MenuService::new(MenuCategory::Drink, drinks, cache)),
            ))
        }
    }
}

fn create_rate_limiter(settings: &RateLimitSettings) -> Option<Arc<RateLimiter>> {
    if !settings.enabled {
        info!("Rate limiting disabled");
        return None;
    }

    let config = RateLimitConfig::new(
        settings.requests_per_second,
        settings.requests_per_minute,
        settings.requests_per_hour,
    )
    .with_trusted_proxy_headers(settings.trust_proxy_headers);

    info!(
        per_second = config.requests_per_second,
        per_minute = config.requests_per_minute,
        per_hour = config.requests_per_hour,
        trust_proxy_headers = config.trust_proxy_headers,
        "Rate limiting enabled"
    );

    Some(Arc::new(RateLimiter::new(config)))
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, MenuItemDraft};

    #[tokio::test]
    async fn test_default_state_uses_memory() {
        let state = create_app_state().await.unwrap();

        let item = state
            .dish_service
            .create(MenuItemDraft::new("Bantha Burger", Amount::from_hundredths(1250)))
            .await
            .unwrap();

        assert_eq!(item.id().value(), 1);
        assert!(state.drink_service.list().await.unwrap().is_empty());
        assert!(state.rate_limiter.is_some());
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "cassandra".to_string();

        let result = create_app_state_with_config(&config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rate_limiting_can_be_disabled() {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;

        let state = create_app_state_with_config(&config).await.unwrap();
        assert!(state.rate_limiter.is_none());
    }

    #[test]
    fn test_jwt_config_from_auth_section() {
        let mut auth = AuthConfig::default();
        auth.issuer = "tatooine".to_string();
        auth.expiration_hours = 2;

        let config = jwt_config(&auth, "s3cret".to_string());

        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.issuer, "tatooine");
        assert_eq!(config.audience, auth.audience);
        assert_eq!(config.expiration_hours, 2);
    }

    #[test]
    fn test_generate_random_secret() {
        let a = generate_random_secret();
        let b = generate_random_secret();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
