//! # Handlers
//!
//! Each endpoint extracts its input, calls one service operation and
//! projects the result into a DTO.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use services::commands::{BoardUpdate, CreateBoard, CreateUser, NewComment, TagSpec};
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::dto::{BoardDto, UserDto};

type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub async fn create_user(
    State(state): State<AppState>,
    body: JsonBody<CreateUser>,
) -> Result<Json<UserDto>, ApiError> {
    let Json(command) = body?;
    let user = state.users.create_user(command).await?;
    Ok(Json(UserDto::from(&user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::OK)
}

pub async fn create_board(
    State(state): State<AppState>,
    body: JsonBody<CreateBoard>,
) -> Result<Json<BoardDto>, ApiError> {
    let Json(command) = body?;
    let board = state.boards.create_board(command).await?;
    Ok(Json(BoardDto::from(&board)))
}

pub async fn update_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: JsonBody<BoardUpdate>,
) -> Result<Json<BoardDto>, ApiError> {
    let Json(data) = body?;
    let board = state.boards.update_board(id, data).await?;
    Ok(Json(BoardDto::from(&board)))
}

pub async fn add_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: JsonBody<TagSpec>,
) -> Result<Json<BoardDto>, ApiError> {
    let Json(spec) = body?;
    let board = state.boards.add_tag(id, spec).await?;
    Ok(Json(BoardDto::from(&board)))
}

/// Removing a tag the board does not carry still answers 200.
pub async fn remove_tag(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BoardDto>, ApiError> {
    let board = state.boards.remove_tag(id, tag_id).await?;
    Ok(Json(BoardDto::from(&board)))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: JsonBody<NewComment>,
) -> Result<Json<BoardDto>, ApiError> {
    let Json(command) = body?;
    let board = state.boards.add_comment(id, command).await?;
    Ok(Json(BoardDto::from(&board)))
}

pub async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BoardDto>, ApiError> {
    let board = state.boards.get_board(id).await?;
    Ok(Json(BoardDto::from(&board)))
}
