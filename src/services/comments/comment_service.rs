//! 댓글 비즈니스 로직 서비스
//!
//! 댓글은 항상 작성자(`author`)를 포함해 투영됩니다.

use chrono::Utc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::CreateCommentRequest;
use crate::domain::entities::Comment;
use crate::projection::{paginate, IncludeSet, PageEnvelope, Projection, Related, WireObject};
use crate::repositories::comments::CommentRepository;
use crate::repositories::users::UserRepository;
use crate::repositories::PageRequest;

#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    users: UserRepository,
}

impl CommentService {
    pub fn new(comments: CommentRepository, users: UserRepository) -> Self {
        Self { comments, users }
    }

    /// 게시글의 댓글 (최신 순)
    pub async fn by_post(&self, post_id: i64, page: PageRequest, includes: &IncludeSet) -> AppResult<PageEnvelope> {
        let raw = self.comments.by_post(post_id, page).await?;
        let includes = IncludeSet::from("author").union(includes);
        paginate(raw, |comment| Projection::of(comment).include(&includes).to_wire())
    }

    /// 게시글 존재 여부는 `create_comment` 규칙이 이미 확인했습니다.
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - 요청 주체가 존재하지 않는 사용자인 경우
    pub async fn create(&self, actor: AuthenticatedUser, request: CreateCommentRequest) -> AppResult<WireObject> {
        if self.users.find_by_id(actor.user_id).await?.is_none() {
            log::warn!("댓글 생성 거부: 존재하지 않는 사용자 {}", actor.user_id);
            return Err(AppError::AuthenticationError("Não autenticado".to_string()));
        }

        let now = Utc::now().naive_utc();
        let comment = self
            .comments
            .create(Comment {
                id: 0,
                user_id: actor.user_id,
                post_id: request.post_id,
                content: request.content,
                created_at: now,
                updated_at: now,
                author: Related::Unbound,
            })
            .await?;
        log::debug!("댓글 생성: {} on post {}", comment.id, comment.post_id);

        Projection::of(&comment).include("author").to_wire()
    }

    /// 작성자가 아니거나 댓글이 없으면 `false`.
    pub async fn delete(&self, id: i64, actor: AuthenticatedUser) -> AppResult<bool> {
        match self.comments.find_by_id(id).await? {
            Some(comment) if actor.owns(comment.user_id) => self.comments.delete(id).await,
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use std::sync::Arc;

    fn service() -> CommentService {
        let db = Arc::new(Database::new());
        db.seed_demo("$2b$04$hash").unwrap();
        CommentService::new(CommentRepository::new(db.clone()), UserRepository::new(db))
    }

    #[actix_web::test]
    async fn test_created_comment_carries_author() {
        let comments = service();

        let wire = comments
            .create(
                AuthenticatedUser::new(1),
                CreateCommentRequest {
                    content: "Muito útil!".into(),
                    post_id: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(wire.get("post_id").unwrap().as_scalar().unwrap(), 2);
        let author = wire.get("author").unwrap().as_object().unwrap();
        assert_eq!(author.get("name").unwrap().as_scalar().unwrap(), "Ana Silva");
    }

    #[actix_web::test]
    async fn test_unknown_actor_cannot_comment() {
        let comments = service();

        let result = comments
            .create(
                AuthenticatedUser::new(999),
                CreateCommentRequest {
                    content: "Comentário fantasma".into(),
                    post_id: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        let page = comments.by_post(1, PageRequest::new(1, 15), &IncludeSet::new()).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[actix_web::test]
    async fn test_only_the_author_can_delete() {
        let comments = service();

        assert!(!comments.delete(1, AuthenticatedUser::new(1)).await.unwrap());
        assert!(comments.delete(1, AuthenticatedUser::new(2)).await.unwrap());
        assert!(!comments.delete(1, AuthenticatedUser::new(2)).await.unwrap());
    }

    #[actix_web::test]
    async fn test_empty_page_keeps_metadata() {
        let comments = service();

        let page = comments.by_post(3, PageRequest::new(1, 15), &IncludeSet::new()).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.from, None);
    }
}
