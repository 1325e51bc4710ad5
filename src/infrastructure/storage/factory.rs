//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::domain::menu::MenuCategory;
use crate::domain::DomainError;

use super::in_memory::InMemoryMenuRepository;
use super::postgres::{PostgresConfig, PostgresMenuRepository};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Factory for creating menu repositories
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates an empty in-memory repository
    pub fn create_in_memory(category: MenuCategory) -> Arc<InMemoryMenuRepository> {
        Arc::new(InMemoryMenuRepository::new(category))
    }

    /// Opens a PostgreSQL pool shared by every collection
    pub async fn connect_postgres(config: &PostgresConfig) -> Result<PgPool, DomainError> {
        info!(
            max_connections = config.max_connections,
            "Connecting to PostgreSQL..."
        );
        let pool = config.connect().await?;
        info!("PostgreSQL connection established");
        Ok(pool)
    }

    /// Creates a PostgreSQL repository and makes sure its table exists
    pub async fn create_postgres_with_pool(
        pool: PgPool,
        category: MenuCategory,
    ) -> Result<Arc<PostgresMenuRepository>, DomainError> {
        let repository = PostgresMenuRepository::new(pool, category);
        repository.ensure_schema().await?;
        info!(table = category.collection(), "PostgreSQL schema ready");
        Ok(Arc::new(repository))
    }
}
