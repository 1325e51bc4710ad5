//! PostgreSQL menu repository with connection pooling

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::menu::{Amount, ItemId, MenuCategory, MenuItem, MenuItemDraft, MenuRepository};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/mos_eisley_cantina".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Opens a connection pool
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// PostgreSQL repository for one menu collection
///
/// Each category has its own table (`dishes`, `drinks`). Prices and ratings
/// are `NUMERIC(18, 2)` columns exchanged with the database as hundredths.
#[derive(Debug, Clone)]
pub struct PostgresMenuRepository {
    pool: PgPool,
    category: MenuCategory,
}

impl PostgresMenuRepository {
    /// Creates a repository over an existing pool
    pub fn new(pool: PgPool, category: MenuCategory) -> Self {
        Self { pool, category }
    }

    fn table(&self) -> &'static str {
        self.category.collection()
    }

    /// Creates the table and its case-insensitive unique name index if missing
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                description VARCHAR(500) NOT NULL DEFAULT '',
                price NUMERIC(18, 2) NOT NULL,
                image_url VARCHAR(2083) NOT NULL DEFAULT '',
                rating NUMERIC(18, 2),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table()
        );

        sqlx::query(&table)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        let index = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {table}_name_lower_idx ON {table} (LOWER(name))",
            table = self.table()
        );

        sqlx::query(&index)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create index: {}", e)))?;

        Ok(())
    }

    fn select_columns() -> &'static str {
        "id, name, description, (price * 100)::BIGINT AS price, image_url, \
         (rating * 100)::BIGINT AS rating"
    }

    fn row_to_item(row: &PgRow) -> Result<MenuItem, DomainError> {
        let decode = |e: sqlx::Error| DomainError::storage(format!("Failed to decode row: {}", e));

        let id: i64 = row.try_get("id").map_err(decode)?;
        let price: i64 = row.try_get("price").map_err(decode)?;
        let rating: Option<i64> = row.try_get("rating").map_err(decode)?;

        let draft = MenuItemDraft {
            name: row.try_get("name").map_err(decode)?,
            description: row.try_get("description").map_err(decode)?,
            price: Amount::from_hundredths(price),
            image_url: row.try_get("image_url").map_err(decode)?,
            rating: rating.map(Amount::from_hundredths),
        };

        Ok(MenuItem::new(ItemId::new(id), draft))
    }

    fn map_write_error(&self, e: sqlx::Error, name: &str, action: &str) -> DomainError {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::conflict(self.category.duplicate_name_message(name))
            }
            _ => DomainError::storage(format!(
                "Failed to {} {}: {}",
                action,
                self.category.singular().to_lowercase(),
                e
            )),
        }
    }
}

#[async_trait]
impl MenuRepository for PostgresMenuRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY id",
            Self::select_columns(),
            self.table()
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list {}: {}", self.table(), e)))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn get(&self, id: ItemId) -> Result<Option<MenuItem>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            Self::select_columns(),
            self.table()
        );

        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to get {}: {}",
                    self.category.singular().to_lowercase(),
                    e
                ))
            })?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        let query = format!(
            r#"
            INSERT INTO {} (name, description, price, image_url, rating)
            VALUES ($1, $2, $3::NUMERIC / 100, $4, $5::NUMERIC / 100)
            RETURNING id
            "#,
            self.table()
        );

        let row = sqlx::query(&query)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price.hundredths())
            .bind(&draft.image_url)
            .bind(draft.rating.map(Amount::hundredths))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.map_write_error(e, &draft.name, "create"))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to decode row: {}", e)))?;

        Ok(MenuItem::new(ItemId::new(id), draft))
    }

    async fn update(&self, item: MenuItem) -> Result<MenuItem, DomainError> {
        let query = format!(
            r#"
            UPDATE {}
            SET name = $2,
                description = $3,
                price = $4::NUMERIC / 100,
                image_url = $5,
                rating = $6::NUMERIC / 100,
                updated_at = NOW()
            WHERE id = $1
            "#,
            self.table()
        );

        let result = sqlx::query(&query)
            .bind(item.id().value())
            .bind(item.name())
            .bind(item.description())
            .bind(item.price().hundredths())
            .bind(item.image_url())
            .bind(item.rating().map(Amount::hundredths))
            .execute(&self.pool)
            .await
            .map_err(|e| self.map_write_error(e, item.name(), "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                self.category.not_found_message(item.id()),
            ));
        }

        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<(), DomainError> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.table());

        let result = sqlx::query(&query)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to delete {}: {}",
                    self.category.singular().to_lowercase(),
                    e
                ))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(self.category.not_found_message(id)));
        }

        Ok(())
    }
}
