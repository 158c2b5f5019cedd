//! 게시글 비즈니스 로직 서비스
//!
//! 엔드포인트마다 기본 include가 있으며, 클라이언트의 include 지시자는
//! 기본값과 합쳐집니다.
//!
//! | 작업 | 기본 include |
//! |------|--------------|
//! | 목록 / 작성자별 / 카테고리별 | `author`, `comments_count` |
//! | 단건 (slug) | `author`, `categories`, `comments.author`, `comments_count` |
//! | 생성 / 수정 | `author`, `categories` |

use chrono::Utc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{CreatePostRequest, UpdatePostRequest};
use crate::domain::entities::Post;
use crate::projection::{paginate, IncludeSet, PageEnvelope, Projection, RawPage, Related, WireObject};
use crate::repositories::categories::CategoryRepository;
use crate::repositories::posts::PostRepository;
use crate::repositories::users::UserRepository;
use crate::repositories::PageRequest;
use crate::utils::string_utils::slugify;

const LIST_INCLUDES: [&str; 2] = ["author", "comments_count"];
const DETAIL_INCLUDES: [&str; 4] = ["author", "categories", "comments.author", "comments_count"];
const WRITE_INCLUDES: [&str; 2] = ["author", "categories"];

#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    users: UserRepository,
    categories: CategoryRepository,
}

impl PostService {
    pub fn new(posts: PostRepository, users: UserRepository, categories: CategoryRepository) -> Self {
        Self { posts, users, categories }
    }

    /// 최근 발행 순 게시글 목록
    pub async fn list(&self, page: PageRequest, includes: &IncludeSet) -> AppResult<PageEnvelope> {
        let raw = self.posts.paginate(page, &["author"]).await?;
        project_page(raw, includes)
    }

    pub async fn find_by_slug(&self, slug: &str, includes: &IncludeSet) -> AppResult<Option<WireObject>> {
        let Some(post) = self.posts.find_by_slug(slug, &["author", "categories"]).await? else {
            return Ok(None);
        };
        let includes = IncludeSet::from(DETAIL_INCLUDES).union(includes);
        Ok(Some(Projection::of(&post).include(&includes).to_wire()?))
    }

    /// 작성자의 게시글. 작성자가 없으면 `None`.
    pub async fn by_user(&self, user_id: i64, page: PageRequest, includes: &IncludeSet) -> AppResult<Option<PageEnvelope>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Ok(None);
        }
        let raw = self.posts.by_user(user_id, page).await?;
        project_page(raw, includes).map(Some)
    }

    /// 카테고리의 게시글. 카테고리가 없으면 `None`.
    pub async fn by_category(
        &self,
        category_id: i64,
        page: PageRequest,
        includes: &IncludeSet,
    ) -> AppResult<Option<PageEnvelope>> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Ok(None);
        }
        let raw = self.posts.by_category(category_id, page).await?;
        project_page(raw, includes).map(Some)
    }

    /// 요청 주체를 작성자로 게시글을 만들고 바로 발행합니다.
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - 요청 주체가 존재하지 않는 사용자인 경우
    pub async fn create(&self, actor: AuthenticatedUser, request: CreatePostRequest) -> AppResult<WireObject> {
        if self.users.find_by_id(actor.user_id).await?.is_none() {
            log::warn!("게시글 생성 거부: 존재하지 않는 사용자 {}", actor.user_id);
            return Err(AppError::AuthenticationError("Não autenticado".to_string()));
        }

        let now = Utc::now().naive_utc();
        let title = request.title.trim().to_string();
        let slug = self.unique_slug(&title, None).await?;

        let post = self
            .posts
            .create(Post {
                id: 0,
                user_id: actor.user_id,
                title,
                slug,
                content: request.content,
                excerpt: request.excerpt,
                published_at: Some(now),
                created_at: now,
                updated_at: now,
                author: Related::Unbound,
                categories: Related::Unbound,
                comments: Related::Unbound,
                comments_count: Related::Unbound,
            })
            .await?;

        if let Some(category_ids) = request.category_ids {
            self.posts.sync_categories(post.id, &category_ids).await?;
        }
        log::info!("게시글 생성: {} by {}", post.slug, actor.user_id);

        Projection::of(&post).include(WRITE_INCLUDES).to_wire()
    }

    /// 설정된 필드만 변경합니다. slug는 바뀌지 않습니다.
    /// 작성자가 아니거나 게시글이 없으면 `None`.
    pub async fn update(
        &self,
        id: i64,
        actor: AuthenticatedUser,
        request: UpdatePostRequest,
    ) -> AppResult<Option<WireObject>> {
        let Some(mut post) = self.posts.find_by_id(id, &[]).await? else {
            return Ok(None);
        };
        if !actor.owns(post.user_id) {
            return Ok(None);
        }

        if let Some(title) = request.title {
            post.title = title.trim().to_string();
        }
        if let Some(content) = request.content {
            post.content = content;
        }
        if let Some(excerpt) = request.excerpt {
            post.excerpt = excerpt;
        }
        post.updated_at = Utc::now().naive_utc();

        let Some(post) = self.posts.update(&post).await? else {
            return Ok(None);
        };
        if let Some(category_ids) = request.category_ids {
            self.posts.sync_categories(post.id, &category_ids).await?;
        }

        Ok(Some(Projection::of(&post).include(WRITE_INCLUDES).to_wire()?))
    }

    /// 작성자가 아니거나 게시글이 없으면 `false`.
    pub async fn delete(&self, id: i64, actor: AuthenticatedUser) -> AppResult<bool> {
        match self.posts.find_by_id(id, &[]).await? {
            Some(post) if actor.owns(post.user_id) => self.posts.delete(id).await,
            _ => Ok(false),
        }
    }

    /// 제목에서 slug를 만들고, 이미 쓰이면 `-2`, `-3`, ... 을 붙입니다.
    async fn unique_slug(&self, title: &str, except: Option<i64>) -> AppResult<String> {
        let base = match slugify(title) {
            slug if slug.is_empty() => "post".to_string(),
            slug => slug,
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.posts.slug_taken(&candidate, except).await? {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        Ok(candidate)
    }
}

fn project_page(raw: RawPage<Post>, includes: &IncludeSet) -> AppResult<PageEnvelope> {
    let includes = IncludeSet::from(LIST_INCLUDES).union(includes);
    paginate(raw, |post| Projection::of(post).include(&includes).to_wire())
}
