//! # 게시글 리포지토리 구현
//!
//! 목록 조회는 모두 최근 발행 순(미발행은 마지막)이며 `comments_count`를
//! 미리 로드합니다. 단건 조회는 호출 측이 `with`로 미리 읽을 관계를 고릅니다.

use std::sync::Arc;

use log::debug;

use crate::core::errors::{AppError, AppResult};
use crate::db::hydrate::bind_post;
use crate::db::tables::latest_published;
use crate::db::Database;
use crate::domain::entities::Post;
use crate::projection::RawPage;
use crate::repositories::page::PageRequest;

#[derive(Clone)]
pub struct PostRepository {
    db: Arc<Database>,
}

impl PostRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i64, with: &[&str]) -> AppResult<Option<Post>> {
        let post = self.db.read(|t| t.posts.get(&id).cloned())?;
        post.map(|p| self.hydrate(&p, with)).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str, with: &[&str]) -> AppResult<Option<Post>> {
        let post = self.db.read(|t| t.posts.values().find(|p| p.slug == slug).cloned())?;
        post.map(|p| self.hydrate(&p, with)).transpose()
    }

    /// 전체 게시글
    pub async fn paginate(&self, page: PageRequest, with: &[&str]) -> AppResult<RawPage<Post>> {
        let posts = self.db.read(|t| {
            let mut posts: Vec<Post> = t.posts.values().cloned().collect();
            latest_published(&mut posts);
            posts
        })?;
        self.page_with_count(page, posts, with)
    }

    /// 작성자별 게시글
    pub async fn by_user(&self, user_id: i64, page: PageRequest) -> AppResult<RawPage<Post>> {
        let posts = self.db.read(|t| t.posts_by_user(user_id))?;
        self.page_with_count(page, posts, &[])
    }

    /// 카테고리별 게시글
    pub async fn by_category(&self, category_id: i64, page: PageRequest) -> AppResult<RawPage<Post>> {
        let posts = self.db.read(|t| t.posts_in_category(category_id))?;
        self.page_with_count(page, posts, &[])
    }

    /// 같은 slug를 가진 다른 게시글이 있는지 확인합니다.
    pub async fn slug_taken(&self, slug: &str, except: Option<i64>) -> AppResult<bool> {
        self.db
            .read(|t| t.posts.values().any(|p| p.slug == slug && Some(p.id) != except))
    }

    pub async fn create(&self, post: Post) -> AppResult<Post> {
        let stored = self.db.write(|t| {
            let mut post = post.detached();
            post.id = t.next_id("posts");
            t.posts.insert(post.id, post.clone());
            Ok(post)
        })?;
        debug!("게시글 생성: {} ({})", stored.id, stored.slug);
        Ok(bind_post(&self.db, &stored))
    }

    pub async fn update(&self, post: &Post) -> AppResult<Option<Post>> {
        let stored = self.db.write(|t| {
            Ok(t.posts.get_mut(&post.id).map(|slot| {
                *slot = post.detached();
                slot.clone()
            }))
        })?;
        Ok(stored.map(|p| bind_post(&self.db, &p)))
    }

    /// 게시글과 댓글, 카테고리 연결을 삭제합니다.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.write(|t| Ok(t.remove_post(id)))
    }

    /// 게시글의 카테고리를 주어진 목록으로 교체합니다.
    pub async fn sync_categories(&self, post_id: i64, category_ids: &[i64]) -> AppResult<()> {
        self.db.write(|t| {
            t.sync_categories(post_id, category_ids);
            Ok(())
        })
    }

    fn page_with_count(&self, page: PageRequest, posts: Vec<Post>, with: &[&str]) -> AppResult<RawPage<Post>> {
        let mut raw = page.slice(posts);
        raw.items = raw
            .items
            .iter()
            .map(|p| {
                let mut post = self.hydrate(p, with)?;
                post.comments_count.preload()?;
                Ok(post)
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(raw)
    }

    /// 로더를 바인딩하고 `with`에 지정된 관계를 미리 로드합니다.
    fn hydrate(&self, post: &Post, with: &[&str]) -> AppResult<Post> {
        let mut post = bind_post(&self.db, post);
        for relation in with {
            match *relation {
                "author" => post.author.preload()?,
                "categories" => post.categories.preload()?,
                "comments" => post.comments.preload()?,
                "comments_count" => post.comments_count.preload()?,
                other => {
                    return Err(AppError::SchemaError(format!("post has no relation '{}'", other)));
                }
            }
        }
        Ok(post)
    }
}
