//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리를 조합하고, 결과를 디스크립터로 투영한 wire 객체나
//! 페이지 봉투로 돌려줍니다. 찾을 수 없거나 소유자가 아닌 경우는 에러 대신
//! `Option`/`bool`로 표현되며 HTTP 매핑은 핸들러가 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let services = Services::new(Arc::new(Database::new()));
//!
//! App::new()
//!     .configure(|cfg| services.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod categories;
pub mod comments;
pub mod posts;
pub mod users;

use std::sync::Arc;

use actix_web::web;

use crate::config::PaginationConfig;
use crate::db::Database;
use crate::domain::auth::{HeaderPrincipalResolver, PrincipalResolver};
use crate::repositories::categories::CategoryRepository;
use crate::repositories::comments::CommentRepository;
use crate::repositories::posts::PostRepository;
use crate::repositories::users::UserRepository;
use crate::validation::RecordLookup;

use categories::CategoryService;
use comments::CommentService;
use posts::PostService;
use users::UserService;

/// 애플리케이션 서비스 묶음
///
/// 하나의 [`Database`]를 공유하며, 워커마다 `web::Data`로 등록됩니다.
#[derive(Clone)]
pub struct Services {
    pub db: Arc<Database>,
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
    pub categories: CategoryService,
    pub pagination: PaginationConfig,
}

impl Services {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_users(db.clone(), UserService::new(UserRepository::new(db)))
    }

    /// 사용자 서비스를 직접 지정합니다. 테스트에서 낮은 bcrypt cost를 쓸 때 사용합니다.
    pub fn with_users(db: Arc<Database>, users: UserService) -> Self {
        let user_repo = UserRepository::new(db.clone());
        let post_repo = PostRepository::new(db.clone());
        let category_repo = CategoryRepository::new(db.clone());

        Self {
            users,
            posts: PostService::new(post_repo, user_repo.clone(), category_repo.clone()),
            comments: CommentService::new(CommentRepository::new(db.clone()), user_repo),
            categories: CategoryService::new(category_repo),
            pagination: PaginationConfig::from_env(),
            db,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// 핸들러가 추출하는 모든 `web::Data`를 등록합니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let lookup: Arc<dyn RecordLookup> = self.db.clone();
        let resolver: Arc<dyn PrincipalResolver> = Arc::new(HeaderPrincipalResolver);

        cfg.app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.posts.clone()))
            .app_data(web::Data::new(self.comments.clone()))
            .app_data(web::Data::new(self.categories.clone()))
            .app_data(web::Data::new(self.pagination))
            .app_data(web::Data::from(lookup))
            .app_data(web::Data::from(resolver));
    }
}
