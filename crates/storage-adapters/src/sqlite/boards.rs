//! Data mapping between the relational tables and the `Board` aggregate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::errors::Result;
use domains::models::{Author, Board, BoardChange, BoardInformation, Comment, Tag};
use domains::ports::BoardRepository;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use super::db_error;

pub struct SqliteBoardRepo {
    pool: SqlitePool,
}

impl SqliteBoardRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn tag_from_row(row: &SqliteRow) -> sqlx::Result<Tag> {
    Ok(Tag::restore(
        row.try_get("id")?,
        row.try_get("key")?,
        row.try_get("value")?,
    ))
}

fn comment_from_row(row: &SqliteRow) -> sqlx::Result<Comment> {
    Ok(Comment::restore(
        row.try_get("content")?,
        Author {
            id: row.try_get("writer_id")?,
            name: row.try_get("writer_name")?,
        },
    ))
}

/// Reads a board on whatever connection or transaction the caller holds.
async fn load(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Board>> {
    let Some(row) = sqlx::query(
        r#"SELECT b.created_at, b.title, b.content, b.link, b."rank", b.writer_id, u.name AS writer_name
           FROM boards b
           JOIN users u ON u.id = b.writer_id
           WHERE b.id = ?"#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error)?
    else {
        return Ok(None);
    };

    let tags = sqlx::query(
        r#"SELECT t.id, t."key", t."value"
           FROM board_tag_assoc a
           JOIN tags t ON t.id = a.tag_id
           WHERE a.board_id = ?
           ORDER BY a.rowid"#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?
    .iter()
    .map(tag_from_row)
    .collect::<sqlx::Result<Vec<_>>>()
    .map_err(db_error)?;

    // LEFT JOIN: the writer of a comment may have been deleted.
    let comments = sqlx::query(
        r#"SELECT c.content, c.writer_id, COALESCE(u.name, '') AS writer_name
           FROM board_comment c
           LEFT JOIN users u ON u.id = c.writer_id
           WHERE c.board_id = ?
           ORDER BY c.ordinal"#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?
    .iter()
    .map(comment_from_row)
    .collect::<sqlx::Result<Vec<_>>>()
    .map_err(db_error)?;

    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_error)?;
    let writer = Author {
        id: row.try_get("writer_id").map_err(db_error)?,
        name: row.try_get("writer_name").map_err(db_error)?,
    };
    let information = BoardInformation::new(
        row.try_get("link").map_err(db_error)?,
        row.try_get("rank").map_err(db_error)?,
    );

    Ok(Some(Board::restore(
        id,
        created_at,
        row.try_get("title").map_err(db_error)?,
        row.try_get("content").map_err(db_error)?,
        information,
        writer,
        tags,
        comments,
    )))
}

/// Inserts the tag row if its id is new, then links it to the board.
/// A new id carrying an existing (key, value) pair trips `tag_key_value_uk`.
async fn link_tag(conn: &mut SqliteConnection, board_id: Uuid, tag: &Tag) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO tags (id, "key", "value") VALUES (?, ?, ?)
           ON CONFLICT (id) DO NOTHING"#,
    )
    .bind(tag.id())
    .bind(tag.key())
    .bind(tag.value())
    .execute(&mut *conn)
    .await
    .map_err(db_error)?;

    sqlx::query(
        "INSERT INTO board_tag_assoc (board_id, tag_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(board_id)
    .bind(tag.id())
    .execute(&mut *conn)
    .await
    .map_err(db_error)?;
    Ok(())
}

/// Appends after the highest stored ordinal of the board.
async fn append_comment(
    conn: &mut SqliteConnection,
    board_id: Uuid,
    comment: &Comment,
) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO board_comment (board_id, ordinal, content, writer_id)
           SELECT ?, COALESCE(MAX(ordinal), -1) + 1, ?, ?
           FROM board_comment
           WHERE board_id = ?"#,
    )
    .bind(board_id)
    .bind(comment.content())
    .bind(comment.writer().id)
    .bind(board_id)
    .execute(&mut *conn)
    .await
    .map_err(db_error)?;
    Ok(())
}

#[async_trait]
impl BoardRepository for SqliteBoardRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        load(&mut conn, id).await
    }

    async fn insert(&self, board: &Board) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            r#"INSERT INTO boards (id, created_at, title, content, link, "rank", writer_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(board.id())
        .bind(board.created_at())
        .bind(board.title())
        .bind(board.content())
        .bind(board.information().link.as_deref())
        .bind(board.information().rank)
        .bind(board.writer().id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        for tag in board.tags() {
            link_tag(&mut tx, board.id(), tag).await?;
        }
        for comment in board.comments() {
            append_comment(&mut tx, board.id(), comment).await?;
        }

        tx.commit().await.map_err(db_error)?;
        tracing::debug!(board_id = %board.id(), tags = board.tags().len(), "board inserted");
        Ok(())
    }

    async fn apply(&self, id: Uuid, change: &BoardChange) -> Result<Option<Board>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // A write that changes nothing takes the database write lock before
        // the read, so changes to the same board queue up behind each other.
        let locked = sqlx::query("UPDATE boards SET title = title WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected();
        if locked == 0 {
            return Ok(None);
        }
        let Some(mut board) = load(&mut tx, id).await? else {
            return Ok(None);
        };

        match change {
            BoardChange::Update(data) => {
                sqlx::query(
                    r#"UPDATE boards SET title = ?, content = ?, link = ?, "rank" = ?
                       WHERE id = ?"#,
                )
                .bind(&data.title)
                .bind(&data.content)
                .bind(data.information.link.as_deref())
                .bind(data.information.rank)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            }
            BoardChange::AddTag(tag) => link_tag(&mut tx, id, tag).await?,
            BoardChange::RemoveTag(tag_id) => {
                sqlx::query("DELETE FROM board_tag_assoc WHERE board_id = ? AND tag_id = ?")
                    .bind(id)
                    .bind(*tag_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(db_error)?;
            }
            BoardChange::AddComment(comment) => append_comment(&mut tx, id, comment).await?,
        }

        board.apply(change.clone());
        tx.commit().await.map_err(db_error)?;
        tracing::debug!(board_id = %id, "board change committed");
        Ok(Some(board))
    }
}
