//! 사용자 관리 비즈니스 로직 서비스
//!
//! 등록, 조회, 부분 업데이트, 삭제를 담당합니다. 모든 응답은 `user`
//! 디스크립터로 투영된 wire 객체이며 비밀번호 해시는 노출되지 않습니다.
//!
//! ## 보안
//!
//! - **bcrypt 해싱**: 환경별 cost ([`PasswordConfig::bcrypt_cost`])
//! - **소유권**: 수정/삭제는 본인만 가능하며, 실패는 에러 대신 `None`/`false`

use bcrypt::hash;
use chrono::Utc;

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{CreateUserRequest, UpdateUserRequest};
use crate::domain::entities::User;
use crate::projection::{paginate, IncludeSet, PageEnvelope, Projection, WireObject};
use crate::repositories::users::UserRepository;
use crate::repositories::PageRequest;

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self::with_cost(users, PasswordConfig::bcrypt_cost())
    }

    pub fn with_cost(users: UserRepository, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// 새 사용자를 등록합니다.
    ///
    /// 입력은 `create_user` 규칙(이메일 중복 포함)으로 이미 검증된 상태입니다.
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<WireObject> {
        let start_time = std::time::Instant::now();

        let password_hash = self.hash_password(&request.password)?;
        let user = User::new(
            request.name.trim().to_string(),
            request.email.trim().to_lowercase(),
            password_hash,
            Utc::now().naive_utc(),
        );

        let user = self.users.create(user).await?;
        log::info!("사용자 등록: {} ({:?})", user.id, start_time.elapsed());

        Projection::of(&user).to_wire()
    }

    pub async fn list(&self, page: PageRequest, includes: &IncludeSet) -> AppResult<PageEnvelope> {
        let raw = self.users.paginate(page).await?;
        paginate(raw, |user| Projection::of(user).include(includes).to_wire())
    }

    pub async fn find(&self, id: i64, includes: &IncludeSet) -> AppResult<Option<WireObject>> {
        match self.users.find_by_id(id).await? {
            Some(user) => Ok(Some(Projection::of(&user).include(includes).to_wire()?)),
            None => Ok(None),
        }
    }

    /// 요청 주체 자신의 정보
    pub async fn current(&self, principal: AuthenticatedUser, includes: &IncludeSet) -> AppResult<Option<WireObject>> {
        self.find(principal.user_id, includes).await
    }

    /// 설정된 필드만 변경합니다. 본인이 아니거나 없으면 `None`.
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 다른 사용자가 이미 쓰는 이메일로 변경하는 경우
    pub async fn update(
        &self,
        id: i64,
        actor: AuthenticatedUser,
        request: UpdateUserRequest,
    ) -> AppResult<Option<WireObject>> {
        if !actor.owns(id) {
            return Ok(None);
        }
        let Some(mut user) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if let Some(other) = self.users.find_by_email(&email).await? {
                if other.id != id {
                    return Err(AppError::ConflictError("Este email já está registado".to_string()));
                }
            }
            user.email = email;
        }
        if let Some(password) = request.password {
            user.password_hash = self.hash_password(&password)?;
        }
        user.updated_at = Utc::now().naive_utc();

        match self.users.update(&user).await? {
            Some(user) => Ok(Some(Projection::of(&user).to_wire()?)),
            None => Ok(None),
        }
    }

    /// 본인 계정을 삭제합니다. 본인이 아니거나 없으면 `false`.
    pub async fn delete(&self, id: i64, actor: AuthenticatedUser) -> AppResult<bool> {
        if !actor.owns(id) {
            log::warn!("사용자 삭제 거부: 대상 {} (요청자 {})", id, actor.user_id);
            return Ok(false);
        }
        self.users.delete(id).await
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use std::sync::Arc;

    fn service() -> (Arc<Database>, UserService) {
        let db = Arc::new(Database::new());
        db.seed_demo("$2b$04$hash").unwrap();
        (db.clone(), UserService::with_cost(UserRepository::new(db), 4))
    }

    #[actix_web::test]
    async fn test_register_hashes_password_and_hides_it() {
        let (db, users) = service();

        let wire = users
            .register(CreateUserRequest {
                name: " Maria ".into(),
                email: "Maria@Example.com".into(),
                password: "secret123".into(),
            })
            .await
            .unwrap();

        assert_eq!(wire.get("name").unwrap().as_scalar().unwrap(), "Maria");
        assert_eq!(wire.get("email").unwrap().as_scalar().unwrap(), "maria@example.com");
        assert!(!wire.contains_key("password"));
        let stored = db.read(|t| t.user(3)).unwrap().unwrap();
        assert!(bcrypt::verify("secret123", &stored.password_hash).unwrap());
    }

    #[actix_web::test]
    async fn test_update_changes_only_set_fields() {
        let (_, users) = service();

        let wire = users
            .update(
                1,
                AuthenticatedUser::new(1),
                UpdateUserRequest {
                    name: Some("Ana S.".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(wire.get("name").unwrap().as_scalar().unwrap(), "Ana S.");
        assert_eq!(wire.get("email").unwrap().as_scalar().unwrap(), "ana@example.com");
    }

    #[actix_web::test]
    async fn test_update_of_someone_else_is_refused() {
        let (_, users) = service();

        let result = users
            .update(1, AuthenticatedUser::new(2), UpdateUserRequest::default())
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(!users.delete(1, AuthenticatedUser::new(2)).await.unwrap());
    }

    #[actix_web::test]
    async fn test_update_to_taken_email_conflicts() {
        let (_, users) = service();

        let result = users
            .update(
                1,
                AuthenticatedUser::new(1),
                UpdateUserRequest {
                    email: Some("joao@example.com".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }
}
