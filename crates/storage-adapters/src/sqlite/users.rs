use async_trait::async_trait;
use domains::errors::Result;
use domains::models::User;
use domains::ports::UserRepository;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use uuid::Uuid;

use super::db_error;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    /// The owned-boards list is derived from `boards.writer_id`.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;

        let Some(row) = sqlx::query("SELECT name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let boards = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM boards WHERE writer_id = ? ORDER BY created_at, rowid",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)?;

        Ok(Some(User::restore(
            id,
            row.try_get("name").map_err(db_error)?,
            boards,
        )))
    }

    async fn save(&self, user: &User) -> Result<()> {
        sqlx::query("INSERT INTO users (id, name) VALUES (?, ?)")
            .bind(user.id())
            .bind(user.name())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    /// Boards go with the user through `ON DELETE CASCADE`.
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
