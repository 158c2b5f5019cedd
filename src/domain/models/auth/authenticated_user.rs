use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// 인가 협력자가 확인한 요청 주체
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: i64,
}

impl AuthenticatedUser {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    /// 리소스 소유자인지 확인
    pub fn owns(&self, owner_id: i64) -> bool {
        self.user_id == owner_id
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어가 request extension에 넣어 둔 주체를 꺼냅니다.
/// 없으면 401 응답이 됩니다.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(*user)),
            None => ready(Err(AppError::AuthenticationError(
                "Não autenticado".to_string(),
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone, Copy)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().copied();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_user_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthenticatedUser::new(3));

        let user = AuthenticatedUser::extract(&req).await.unwrap();

        assert_eq!(user.user_id, 3);
        assert!(user.owns(3));
        assert!(!user.owns(4));
    }

    #[actix_web::test]
    async fn test_missing_user_is_an_authentication_error() {
        let req = TestRequest::default().to_http_request();

        let result = AuthenticatedUser::extract(&req).await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        assert!(OptionalUser::extract(&req).await.unwrap().0.is_none());
    }
}
