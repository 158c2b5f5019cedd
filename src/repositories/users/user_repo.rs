//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.

use std::sync::Arc;

use log::debug;

use crate::core::errors::AppResult;
use crate::db::hydrate::bind_user;
use crate::db::Database;
use crate::domain::entities::User;
use crate::projection::RawPage;
use crate::repositories::page::PageRequest;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>` 타입을 반환하며, 저장소 잠금이
/// 오염된 경우 `DatabaseError`를 반환합니다. 존재하지 않는 사용자는 에러가
/// 아니라 `None`/`false`로 표현됩니다.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = self.db.read(|t| t.user(id))?;
        Ok(user.map(|u| bind_user(&self.db, &u)))
    }

    /// 이메일 주소로 사용자 조회 (대소문자 무시)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.db.read(|t| {
            t.users
                .values()
                .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
                .cloned()
        })?;
        Ok(user.map(|u| bind_user(&self.db, &u)))
    }

    /// 사용자 목록 (id 순). 각 사용자의 게시글을 미리 로드합니다.
    pub async fn paginate(&self, page: PageRequest) -> AppResult<RawPage<User>> {
        let users: Vec<User> = self.db.read(|t| t.users.values().cloned().collect())?;
        let mut raw = page.slice(users);

        raw.items = raw
            .items
            .iter()
            .map(|u| {
                let mut user = bind_user(&self.db, u);
                user.posts.preload()?;
                Ok(user)
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(raw)
    }

    /// 새 사용자 저장. id는 저장소가 부여합니다.
    pub async fn create(&self, user: User) -> AppResult<User> {
        let stored = self.db.write(|t| {
            let mut user = user.detached();
            user.id = t.next_id("users");
            t.users.insert(user.id, user.clone());
            Ok(user)
        })?;
        debug!("사용자 생성: {}", stored.id);
        Ok(bind_user(&self.db, &stored))
    }

    /// 기존 사용자를 덮어씁니다. 없으면 `None`.
    pub async fn update(&self, user: &User) -> AppResult<Option<User>> {
        let stored = self.db.write(|t| {
            Ok(t.users.get_mut(&user.id).map(|slot| {
                *slot = user.detached();
                slot.clone()
            }))
        })?;
        Ok(stored.map(|u| bind_user(&self.db, &u)))
    }

    /// 사용자와 작성한 게시글, 댓글을 삭제합니다.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.write(|t| {
            if t.users.remove(&id).is_none() {
                return Ok(false);
            }
            let owned: Vec<i64> = t.posts.values().filter(|p| p.user_id == id).map(|p| p.id).collect();
            for post_id in owned {
                t.remove_post(post_id);
            }
            t.comments.retain(|_, c| c.user_id != id);
            Ok(true)
        })
    }
}
