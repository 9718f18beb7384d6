//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresItemRepository` - listings, with version-checked updates
//! - `PostgresMessageRepository` - chat messages and drafts
//! - `PostgresNegotiationLogRepository` - append-only decision log

mod item_repository;
mod message_repository;
mod negotiation_log_repository;

pub use item_repository::PostgresItemRepository;
pub use message_repository::PostgresMessageRepository;
pub use negotiation_log_repository::PostgresNegotiationLogRepository;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow, Postgres};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, Price, UserId};

/// Open a connection pool.
pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(url)
        .await
        .map_err(|e| DomainError::database("Failed to connect to database", e))
}

/// Apply pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database("Failed to run migrations", e))
}

// ════════════════════════════════════════════════════════════════════════════
// Row helpers
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

fn price_column(row: &PgRow, name: &str) -> Result<Price, DomainError> {
    Ok(Price::new(column::<i64>(row, name)?)?)
}

fn optional_price_column(row: &PgRow, name: &str) -> Result<Option<Price>, DomainError> {
    column::<Option<i64>>(row, name)?
        .map(Price::new)
        .transpose()
        .map_err(DomainError::from)
}

fn user_column(row: &PgRow, name: &str) -> Result<UserId, DomainError> {
    Ok(UserId::new(column::<String>(row, name)?)?)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
