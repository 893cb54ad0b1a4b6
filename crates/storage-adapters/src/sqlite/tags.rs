use async_trait::async_trait;
use domains::errors::Result;
use domains::models::Tag;
use domains::ports::TagRepository;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

use super::db_error;

pub struct SqliteTagRepo {
    pool: SqlitePool,
}

impl SqliteTagRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqliteTagRepo {
    async fn find_by_key_and_value(&self, key: &str, value: &str) -> Result<Option<Tag>> {
        let row = sqlx::query(r#"SELECT id, "key", "value" FROM tags WHERE "key" = ? AND "value" = ?"#)
            .bind(key)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(|row| {
            Ok(Tag::restore(
                row.try_get("id").map_err(db_error)?,
                row.try_get("key").map_err(db_error)?,
                row.try_get("value").map_err(db_error)?,
            ))
        })
        .transpose()
    }
}
