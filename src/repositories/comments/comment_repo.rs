//! # 댓글 리포지토리 구현
//!
//! 댓글은 항상 작성자(`author`)와 함께 조회됩니다.

use std::sync::Arc;

use crate::core::errors::AppResult;
use crate::db::hydrate::bind_comment;
use crate::db::Database;
use crate::domain::entities::Comment;
use crate::projection::RawPage;
use crate::repositories::page::PageRequest;

#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<Database>,
}

impl CommentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Comment>> {
        let comment = self.db.read(|t| t.comments.get(&id).cloned())?;
        comment.map(|c| self.with_author(&c)).transpose()
    }

    /// 게시글의 댓글 (최신 순)
    pub async fn by_post(&self, post_id: i64, page: PageRequest) -> AppResult<RawPage<Comment>> {
        let comments = self.db.read(|t| t.comments_of_post(post_id))?;
        let mut raw = page.slice(comments);
        raw.items = raw
            .items
            .iter()
            .map(|c| self.with_author(c))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(raw)
    }

    pub async fn create(&self, comment: Comment) -> AppResult<Comment> {
        let stored = self.db.write(|t| {
            let mut comment = comment.detached();
            comment.id = t.next_id("comments");
            t.comments.insert(comment.id, comment.clone());
            Ok(comment)
        })?;
        self.with_author(&stored)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.write(|t| Ok(t.comments.remove(&id).is_some()))
    }

    fn with_author(&self, comment: &Comment) -> AppResult<Comment> {
        let mut comment = bind_comment(&self.db, comment);
        comment.author.preload()?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_by_post_returns_latest_first_with_author() {
        let db = Arc::new(Database::new());
        db.seed_demo("$2b$04$hash").unwrap();
        let comments = CommentRepository::new(db);

        let page = comments.by_post(1, PageRequest::new(1, 15)).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].content, "Obrigada pela leitura, João.");
        assert!(page.items.iter().all(|c| c.author.is_loaded()));
    }
}
