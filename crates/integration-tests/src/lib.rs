//! Shared fixtures for the end-to-end tests.
//!
//! Every fixture gets its own SQLite database, migrated and wired to real
//! repositories. `new` keeps it in memory; `on_disk` uses a temporary file
//! with several pooled connections so requests really overlap.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use services::{BoardService, UserService};
use sqlx::SqlitePool;
use storage_adapters::sqlite::{self, SqliteBoardRepo, SqliteTagRepo, SqliteUserRepo};
use tower::ServiceExt;

pub struct Fixture {
    pub pool: SqlitePool,
    pub users: UserService,
    pub boards: BoardService,
    file: Option<PathBuf>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::connect("sqlite::memory:", 1, None).await
    }

    pub async fn on_disk() -> Self {
        let file = std::env::temp_dir().join(format!("tagboard-{}.db", uuid::Uuid::now_v7()));
        let url = format!("sqlite://{}", file.display());
        Self::connect(&url, 4, Some(file)).await
    }

    async fn connect(url: &str, max_connections: u32, file: Option<PathBuf>) -> Self {
        let pool = sqlite::connect(url, max_connections)
            .await
            .expect("test database");
        let users = Arc::new(SqliteUserRepo::new(pool.clone()));
        Self {
            users: UserService::new(users.clone()),
            boards: BoardService::new(
                users,
                Arc::new(SqliteBoardRepo::new(pool.clone())),
                Arc::new(SqliteTagRepo::new(pool.clone())),
            ),
            pool,
            file,
        }
    }

    pub async fn tag_rows(&self, key: &str, value: &str) -> i64 {
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM tags WHERE "key" = ? AND "value" = ?"#)
            .bind(key)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .expect("count tags")
    }

    #[cfg(feature = "web-axum")]
    pub fn router(&self) -> Router {
        use api_adapters::web::{router, AppState};
        router(AppState::new(self.users.clone(), self.boards.clone()))
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            for suffix in ["", "-wal", "-shm"] {
                let _ = std::fs::remove_file(format!("{}{suffix}", file.display()));
            }
        }
    }
}

/// Sends one request through the router and returns status and JSON body.
///
/// An empty body decodes to `Value::Null`, a non-JSON body to a string.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("infallible router");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
