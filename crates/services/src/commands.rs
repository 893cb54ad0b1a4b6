//! Request payloads accepted by the orchestration services.
//!
//! They deserialize straight from the JSON bodies of the HTTP API.

use domains::models::{BoardInformation, Tag};
use serde::Deserialize;
use uuid::Uuid;

pub use domains::models::BoardUpdate;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
}

/// A tag identified by its natural key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct TagSpec {
    pub key: String,
    pub value: String,
}

impl TagSpec {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn to_tag(&self) -> Tag {
        Tag::new(self.key.clone(), self.value.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    pub title: String,
    pub content: String,
    pub information: BoardInformation,
    pub writer_id: Uuid,
    #[serde(default)]
    pub tags: Vec<TagSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub writer_id: Uuid,
}
