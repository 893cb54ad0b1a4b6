//! Board orchestration: create, update, tag, comment and fetch workflows.
//!
//! Lookups happen first; each mutating operation then hands a single
//! `BoardChange` to the repository, which locks, reads, writes and commits
//! it as one transaction and returns the board as committed.

use std::sync::Arc;

use domains::errors::{DomainError, Result};
use domains::models::{Board, BoardChange, BoardUpdate, Comment, User};
use domains::ports::{BoardRepository, TagRepository, UserRepository};
use uuid::Uuid;

use crate::commands::{CreateBoard, NewComment, TagSpec};
use crate::tags::{resolve_tag, resolve_tags};

#[derive(Clone)]
pub struct BoardService {
    users: Arc<dyn UserRepository>,
    boards: Arc<dyn BoardRepository>,
    tags: Arc<dyn TagRepository>,
}

impl BoardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        boards: Arc<dyn BoardRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self { users, boards, tags }
    }

    #[tracing::instrument(skip(self, command), fields(writer_id = %command.writer_id))]
    pub async fn create_board(&self, command: CreateBoard) -> Result<Board> {
        let mut writer = self.get_user(command.writer_id).await?;
        let tags = resolve_tags(self.tags.as_ref(), &command.tags).await?;

        let board = Board::new(
            &writer,
            command.title,
            command.content,
            command.information,
            tags,
        );
        writer.write_board(&board);

        self.boards.insert(&board).await?;
        tracing::info!(board_id = %board.id(), "board created");
        Ok(board)
    }

    #[tracing::instrument(skip(self, data))]
    pub async fn update_board(&self, id: Uuid, data: BoardUpdate) -> Result<Board> {
        let board = self.commit(id, BoardChange::Update(data)).await?;
        tracing::info!("board updated");
        Ok(board)
    }

    #[tracing::instrument(skip(self, spec), fields(key = %spec.key, value = %spec.value))]
    pub async fn add_tag(&self, id: Uuid, spec: TagSpec) -> Result<Board> {
        let board = self.get_board(id).await?;
        if board.find_tag(&spec.key, &spec.value).is_some() {
            return Ok(board);
        }

        let tag = resolve_tag(self.tags.as_ref(), &spec).await?;
        let board = self.commit(id, BoardChange::AddTag(tag)).await?;
        tracing::info!("tag added");
        Ok(board)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_tag(&self, id: Uuid, tag_id: Uuid) -> Result<Board> {
        let board = self.commit(id, BoardChange::RemoveTag(tag_id)).await?;
        tracing::info!("tag removed");
        Ok(board)
    }

    #[tracing::instrument(skip(self, command), fields(writer_id = %command.writer_id))]
    pub async fn add_comment(&self, id: Uuid, command: NewComment) -> Result<Board> {
        self.get_board(id).await?;
        let writer = self.get_user(command.writer_id).await?;

        let comment = Comment::new(command.content, &writer);
        let board = self.commit(id, BoardChange::AddComment(comment)).await?;
        tracing::info!(comments = board.comments().len(), "comment added");
        Ok(board)
    }

    pub async fn get_board(&self, id: Uuid) -> Result<Board> {
        self.boards
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", id))
    }

    /// A board deleted since the lookups surfaces as `NotFound`.
    async fn commit(&self, id: Uuid, change: BoardChange) -> Result<Board> {
        self.boards
            .apply(id, &change)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", id))
    }

    async fn get_user(&self, id: Uuid) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::models::{BoardInformation, Tag};
    use domains::ports::{MockBoardRepository, MockTagRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn service(
        users: MockUserRepository,
        boards: MockBoardRepository,
        tags: MockTagRepository,
    ) -> BoardService {
        BoardService::new(Arc::new(users), Arc::new(boards), Arc::new(tags))
    }

    fn stored_board(writer: &User) -> Board {
        Board::new(
            writer,
            "T",
            "C",
            BoardInformation::new(None, 1),
            vec![Tag::new("cat", "free")],
        )
    }

    #[tokio::test]
    async fn create_board_with_unknown_writer_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut boards = MockBoardRepository::new();
        boards.expect_insert().never();

        let svc = service(users, boards, MockTagRepository::new());
        let err = svc
            .create_board(CreateBoard {
                title: "T".into(),
                content: "C".into(),
                information: BoardInformation::new(None, 1),
                writer_id: Uuid::now_v7(),
                tags: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(ref entity, _) if entity == "User"));
    }

    #[tokio::test]
    async fn create_board_persists_once_with_resolved_tags() {
        let writer = User::new("alice");
        let writer_id = writer.id();
        let existing = Tag::new("cat", "free");
        let existing_id = existing.id();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(writer_id))
            .returning(move |_| Ok(Some(writer.clone())));
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_key_and_value()
            .returning(move |key, _| Ok((key == "cat").then(|| existing.clone())));
        let mut boards = MockBoardRepository::new();
        boards.expect_insert().times(1).returning(|_| Ok(()));

        let svc = service(users, boards, tags);
        let board = svc
            .create_board(CreateBoard {
                title: "T".into(),
                content: "C".into(),
                information: BoardInformation::new(None, 1),
                writer_id,
                tags: vec![TagSpec::new("cat", "free"), TagSpec::new("type", "IT")],
            })
            .await
            .unwrap();

        assert_eq!(board.writer().id, writer_id);
        assert_eq!(board.tags().len(), 2);
        assert_eq!(board.tags()[0].id(), existing_id);
    }

    #[tokio::test]
    async fn update_missing_board_is_not_found() {
        let mut boards = MockBoardRepository::new();
        boards.expect_apply().returning(|_, _| Ok(None));

        let svc = service(MockUserRepository::new(), boards, MockTagRepository::new());
        let err = svc
            .update_board(
                Uuid::now_v7(),
                BoardUpdate {
                    title: "T2".into(),
                    content: "C2".into(),
                    information: BoardInformation::new(None, 2),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(ref entity, _) if entity == "Board"));
    }

    #[tokio::test]
    async fn add_existing_pair_skips_lookup_and_write() {
        let writer = User::new("alice");
        let board = stored_board(&writer);
        let mut boards = MockBoardRepository::new();
        boards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(board.clone())));
        boards.expect_apply().never();
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_key_and_value().never();

        let svc = service(MockUserRepository::new(), boards, tags);
        let board = svc
            .add_tag(Uuid::now_v7(), TagSpec::new("cat", "free"))
            .await
            .unwrap();

        assert_eq!(board.tags().len(), 1);
    }

    #[tokio::test]
    async fn remove_unknown_tag_keeps_tag_set() {
        let writer = User::new("alice");
        let board = stored_board(&writer);
        let before = board.tags().to_vec();
        let mut boards = MockBoardRepository::new();
        boards.expect_apply().times(1).returning(move |_, change| {
            let mut board = board.clone();
            board.apply(change.clone());
            Ok(Some(board))
        });

        let svc = service(MockUserRepository::new(), boards, MockTagRepository::new());
        let board = svc.remove_tag(Uuid::now_v7(), Uuid::now_v7()).await.unwrap();

        assert_eq!(board.tags(), before.as_slice());
    }

    #[tokio::test]
    async fn add_comment_with_unknown_writer_is_not_found() {
        let writer = User::new("alice");
        let board = stored_board(&writer);
        let mut boards = MockBoardRepository::new();
        boards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(board.clone())));
        boards.expect_apply().never();
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(users, boards, MockTagRepository::new());
        let err = svc
            .add_comment(
                Uuid::now_v7(),
                NewComment {
                    content: "hi".into(),
                    writer_id: Uuid::now_v7(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(ref entity, _) if entity == "User"));
    }

    #[tokio::test]
    async fn store_conflict_propagates() {
        let writer = User::new("alice");
        let writer_id = writer.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(writer.clone())));
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_key_and_value().returning(|_, _| Ok(None));
        let mut boards = MockBoardRepository::new();
        boards
            .expect_insert()
            .returning(|_| Err(DomainError::Conflict("tag_key_value_uk".into())));

        let svc = service(users, boards, tags);
        let err = svc
            .create_board(CreateBoard {
                title: "T".into(),
                content: "C".into(),
                information: BoardInformation::new(None, 1),
                writer_id,
                tags: vec![TagSpec::new("cat", "free")],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn add_comment_commits_one_change_by_the_writer() {
        let writer = User::new("bob");
        let writer_id = writer.id();
        let board = stored_board(&User::new("alice"));
        let committed = board.clone();
        let mut boards = MockBoardRepository::new();
        boards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(board.clone())));
        boards
            .expect_apply()
            .withf(move |_, change| {
                matches!(change, BoardChange::AddComment(c) if c.writer().id == writer_id)
            })
            .times(1)
            .returning(move |_, change| {
                let mut board = committed.clone();
                board.apply(change.clone());
                Ok(Some(board))
            });
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(writer.clone())));

        let svc = service(users, boards, MockTagRepository::new());
        let board = svc
            .add_comment(
                Uuid::now_v7(),
                NewComment {
                    content: "hi".into(),
                    writer_id,
                },
            )
            .await
            .unwrap();

        assert_eq!(board.comments().len(), 1);
        assert_eq!(board.comments()[0].writer().name, "bob");
    }
}
