//! # Domain Models
//!
//! 엔티티도 DTO도 아닌 도메인 보조 모델입니다.
//!
//! * [`auth`]: 요청 주체([`AuthenticatedUser`](auth::AuthenticatedUser)),
//!   인증 모드, 그리고 주체를 확인하는 [`PrincipalResolver`](auth::PrincipalResolver) 협력자.
//!
//! 인증 방식 자체(토큰, 세션)는 이 서비스 밖에 있습니다. 핸들러는
//! `AuthenticatedUser` 추출자만 사용합니다.
//!
//! ```rust,ignore
//! async fn delete_comment(user: AuthenticatedUser, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
//!     // user.user_id 로 소유권 확인
//! }
//! ```

pub mod auth;
