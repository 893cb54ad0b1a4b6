//! # Axum web layer
//!
//! Routes, handlers and error mapping for the JSON API.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::routing::{delete, get, post};
use axum::Router;
use services::{BoardService, UserService};
use tower::ServiceBuilder;

pub use error::ApiError;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub boards: BoardService,
}

impl AppState {
    pub fn new(users: UserService, boards: BoardService) -> Self {
        Self { users, boards }
    }
}

/// Builds the application router.
///
/// The binary mounts this at `/`; tests drive it directly with `oneshot`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/{id}", delete(handlers::delete_user))
        .route("/boards", post(handlers::create_board))
        .route(
            "/boards/{id}",
            get(handlers::get_board).put(handlers::update_board),
        )
        .route("/boards/{id}/tags", post(handlers::add_tag))
        .route("/boards/{id}/tags/{tag_id}", delete(handlers::remove_tag))
        .route("/boards/{id}/comments", post(handlers::add_comment))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::trace_layer())
                .layer(middleware::cors_policy()),
        )
        .with_state(state)
}
