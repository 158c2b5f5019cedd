//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 얇게 유지됩니다. 요청 본문은 레지스트리에 등록된 입력 디스크립터로
//! 검증하고, `include` 쿼리는 각 엔드포인트의 기본 관계와 합쳐 서비스에 넘깁니다.
//! 서비스가 돌려준 `Option`/`bool` 실패는 여기서 404로 변환됩니다.
//!
//! | 모듈 | 경로 |
//! |------|------|
//! | [`auth`] | `/api/v1/auth/*` |
//! | [`users`] | `/api/v1/users/*` |
//! | [`posts`] | `/api/v1/posts/*` |
//! | [`comments`] | `/api/v1/comments/*`, `/api/v1/posts/{post_id}/comments` |
//! | [`categories`] | `/api/v1/categories/*` |

pub mod auth;
pub mod categories;
pub mod comments;
pub mod posts;
pub mod users;

use actix_web::HttpRequest;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::PaginationConfig;
use crate::core::errors::AppResult;
use crate::core::registry::SchemaRegistry;
use crate::projection::IncludeSet;
use crate::repositories::PageRequest;
use crate::validation::RecordLookup;

/// `?page=&per_page=` 쿼리
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageQuery {
    pub fn resolve(&self, config: &PaginationConfig) -> PageRequest {
        config.resolve(self.page, self.per_page)
    }
}

/// 요청 쿼리의 `include` 지시어
pub fn requested_includes(req: &HttpRequest) -> IncludeSet {
    IncludeSet::from_query(req.query_string())
}

/// 입력 디스크립터 `entity`로 페이로드를 검증하고 타입 구조체로 변환합니다.
///
/// # Errors
///
/// * `ValidationError` - 규칙 위반 (422, 필드별 메시지)
/// * `SchemaError` - 등록되지 않은 입력 디스크립터
pub async fn validated<T: DeserializeOwned>(entity: &str, payload: &Value, lookup: &dyn RecordLookup) -> AppResult<T> {
    let rules = SchemaRegistry::global().rules(entity)?;
    let payload = rules.validate(payload, lookup).await?.into_result()?;
    payload.into_typed()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::config::PaginationConfig;
    use crate::db::Database;
    use crate::repositories::users::UserRepository;
    use crate::services::users::UserService;
    use crate::services::Services;

    /// 데모 데이터가 채워진 서비스 묶음 (낮은 bcrypt cost)
    pub fn seeded_services() -> Services {
        let db = Arc::new(Database::new());
        db.seed_demo("$2b$04$hash").unwrap();
        let users = UserService::with_cost(UserRepository::new(db.clone()), 4);
        Services::with_users(db, users).with_pagination(PaginationConfig::default())
    }
}
