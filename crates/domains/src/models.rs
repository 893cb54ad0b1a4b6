//! # Domain Models
//!
//! These structs represent the core entities of the board service.
//! We use UUID v7 for time-ordered, globally unique identification.
//!
//! Aggregates (`User`, `Board`) keep their fields private. Every change goes
//! through a named method so the invariants below live in one place:
//!
//! - a board's tag set never holds two tags with the same id
//! - comments are append-only and keep call order
//! - `created_at` is fixed when the board is constructed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account that writes boards and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    name: String,
    /// Ids of the boards this user authored, in creation order
    boards: Vec<Uuid>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            boards: Vec::new(),
        }
    }

    /// Rebuilds a user from persisted state.
    pub fn restore(id: Uuid, name: String, boards: Vec<Uuid>) -> Self {
        Self { id, name, boards }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boards(&self) -> &[Uuid] {
        &self.boards
    }

    /// Registers a freshly constructed board on its writer.
    ///
    /// Only the board creation workflow calls this, right after
    /// `Board::new`, so `board.writer()` and `user.boards()` always agree.
    /// A board written by someone else is ignored.
    pub fn write_board(&mut self, board: &Board) {
        if board.writer().id != self.id {
            return;
        }
        if !self.boards.contains(&board.id()) {
            self.boards.push(board.id());
        }
    }

    /// The reference other aggregates keep to this user.
    pub fn author(&self) -> Author {
        Author {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// A read-only reference to a User held by boards and comments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

/// A shared (key, value) label. No two tags share the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    id: Uuid,
    key: String,
    value: String,
}

impl Tag {
    /// Builds a tag that has not been persisted yet.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn restore(id: Uuid, key: String, value: String) -> Self {
        Self { id, key, value }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, key: &str, value: &str) -> bool {
        self.key == key && self.value == value
    }
}

/// Embedded board metadata. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInformation {
    pub link: Option<String>,
    pub rank: i32,
}

impl BoardInformation {
    pub fn new(link: Option<String>, rank: i32) -> Self {
        Self { link, rank }
    }
}

/// An embedded remark on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    content: String,
    writer: Author,
}

impl Comment {
    pub fn new(content: impl Into<String>, writer: &User) -> Self {
        Self {
            content: content.into(),
            writer: writer.author(),
        }
    }

    pub fn restore(content: String, writer: Author) -> Self {
        Self { content, writer }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn writer(&self) -> &Author {
        &self.writer
    }
}

/// The three fields `Board::update` replaces together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    pub title: String,
    pub content: String,
    pub information: BoardInformation,
}

/// One mutation of an existing board.
///
/// Repositories persist a change as a delta, so two changes to the same
/// board never overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardChange {
    Update(BoardUpdate),
    AddTag(Tag),
    RemoveTag(Uuid),
    AddComment(Comment),
}

/// A posted item with its tags and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: Uuid,
    created_at: DateTime<Utc>,
    title: String,
    content: String,
    information: BoardInformation,
    writer: Author,
    /// Set semantics by tag id; insertion order is kept for stable output
    tags: Vec<Tag>,
    comments: Vec<Comment>,
}

impl Board {
    /// Builds a new board.
    ///
    /// This does not touch the writer; the caller registers the board with
    /// `User::write_board` in the same unit of work.
    pub fn new(
        writer: &User,
        title: impl Into<String>,
        content: impl Into<String>,
        information: BoardInformation,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        let mut board = Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            title: title.into(),
            content: content.into(),
            information,
            writer: writer.author(),
            tags: Vec::new(),
            comments: Vec::new(),
        };
        for tag in tags {
            board.add_tag(tag);
        }
        board
    }

    /// Rebuilds a board from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        created_at: DateTime<Utc>,
        title: String,
        content: String,
        information: BoardInformation,
        writer: Author,
        tags: Vec<Tag>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id,
            created_at,
            title,
            content,
            information,
            writer,
            tags,
            comments,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn information(&self) -> &BoardInformation {
        &self.information
    }

    pub fn writer(&self) -> &Author {
        &self.writer
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Replaces title, content and information in one step.
    pub fn update(&mut self, data: BoardUpdate) {
        self.title = data.title;
        self.content = data.content;
        self.information = data.information;
    }

    /// Adding a tag that is already present is a no-op.
    pub fn add_tag(&mut self, tag: Tag) {
        if !self.tags.iter().any(|t| t.id() == tag.id()) {
            self.tags.push(tag);
        }
    }

    /// Removing an absent tag is a no-op.
    pub fn remove_tag(&mut self, tag_id: Uuid) {
        self.tags.retain(|t| t.id() != tag_id);
    }

    pub fn find_tag(&self, key: &str, value: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.matches(key, value))
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Routes a change through the matching mutator.
    pub fn apply(&mut self, change: BoardChange) {
        match change {
            BoardChange::Update(data) => self.update(data),
            BoardChange::AddTag(tag) => self.add_tag(tag),
            BoardChange::RemoveTag(tag_id) => self.remove_tag(tag_id),
            BoardChange::AddComment(comment) => self.add_comment(comment),
        }
    }
}
