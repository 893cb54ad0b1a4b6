//! # SQLite adapter
//!
//! Implements the domain ports on top of `sqlx` and SQLite. Schema lives in
//! `migrations/` and is applied on connect.

mod boards;
mod tags;
mod users;

pub use boards::SqliteBoardRepo;
pub use tags::SqliteTagRepo;
pub use users::SqliteUserRepo;

use std::str::FromStr;

use domains::errors::DomainError;
use sqlx::error::ErrorKind;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a pool, enables foreign keys and runs pending migrations.
///
/// An in-memory database exists per connection, so it gets exactly one
/// connection that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    tracing::info!(in_memory = is_in_memory(database_url), "database ready");
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Classifies store failures into the domain taxonomy.
pub(crate) fn db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        let message = db.message().to_string();
        match db.kind() {
            ErrorKind::UniqueViolation => return DomainError::Conflict(message),
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return DomainError::ValidationError(message)
            }
            ErrorKind::ForeignKeyViolation => {
                return DomainError::NotFound("Referenced row".to_string(), message)
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "database failure");
    DomainError::Internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_are_detected() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:tagboard.db?mode=rwc"));
    }

    #[tokio::test]
    async fn unique_violation_is_conflict() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        let insert = "INSERT INTO users (id, name) VALUES (?, ?)";
        sqlx::query(insert)
            .bind(uuid::Uuid::now_v7())
            .bind("alice")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query(insert)
            .bind(uuid::Uuid::now_v7())
            .bind("alice")
            .execute(&pool)
            .await
            .map_err(db_error)
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn check_violation_is_validation() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();

        let err = sqlx::query("INSERT INTO users (id, name) VALUES (?, ?)")
            .bind(uuid::Uuid::now_v7())
            .bind("x".repeat(256))
            .execute(&pool)
            .await
            .map_err(db_error)
            .unwrap_err();

        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
