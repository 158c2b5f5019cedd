//! 요청 주체 확인 협력자
//!
//! 토큰이나 세션은 이 서비스의 관심사가 아닙니다. 앞단 게이트웨이가 인증을
//! 끝낸 뒤 전달한 정보를 [`PrincipalResolver`]가 [`AuthenticatedUser`]로
//! 바꿔 줄 뿐입니다.

use actix_web::http::header::HeaderMap;

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

/// 게이트웨이가 설정하는 사용자 식별 헤더
pub const USER_ID_HEADER: &str = "X-User-Id";

/// 요청 헤더에서 주체를 확인합니다.
///
/// * `Ok(Some(_))`: 확인된 주체
/// * `Ok(None)`: 익명 요청
/// * `Err(_)`: 주체 정보가 있으나 유효하지 않음
pub trait PrincipalResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> AppResult<Option<AuthenticatedUser>>;
}

/// `X-User-Id` 헤더를 신뢰하는 기본 resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPrincipalResolver;

impl PrincipalResolver for HeaderPrincipalResolver {
    fn resolve(&self, headers: &HeaderMap) -> AppResult<Option<AuthenticatedUser>> {
        let Some(raw) = headers.get(USER_ID_HEADER) else {
            return Ok(None);
        };

        raw.to_str()
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(|id| Some(AuthenticatedUser::new(id)))
            .ok_or_else(|| AppError::AuthenticationError(format!("{} inválido", USER_ID_HEADER)))
    }
}
