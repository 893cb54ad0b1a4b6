//! Transport representations of the entity graph.
//!
//! Every projection is deep: a board carries its writer, all of its tags
//! and all of its comments together with each comment's writer.

use chrono::{DateTime, Utc};
use domains::models::{Author, Board, BoardInformation, Comment, Tag, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
        }
    }
}

impl From<&Author> for UserDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagDto {
    pub id: Uuid,
    pub key: String,
    pub value: String,
}

impl From<&Tag> for TagDto {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id(),
            key: tag.key().to_string(),
            value: tag.value().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInformationDto {
    pub link: Option<String>,
    pub rank: i32,
}

impl From<&BoardInformation> for BoardInformationDto {
    fn from(info: &BoardInformation) -> Self {
        Self {
            link: info.link.clone(),
            rank: info.rank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    pub content: String,
    pub writer: UserDto,
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            content: comment.content().to_string(),
            writer: comment.writer().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub information: BoardInformationDto,
    pub writer: UserDto,
    /// Unique by tag id
    pub tags: Vec<TagDto>,
    pub comments: Vec<CommentDto>,
}

impl From<&Board> for BoardDto {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id(),
            created_at: board.created_at(),
            title: board.title().to_string(),
            content: board.content().to_string(),
            information: board.information().into(),
            writer: board.writer().into(),
            tags: board.tags().iter().map(TagDto::from).collect(),
            comments: board.comments().iter().map(CommentDto::from).collect(),
        }
    }
}
