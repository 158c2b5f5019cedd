//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - [`PrincipalResolver`](crate::domain::auth::PrincipalResolver)로 요청 주체 확인
//! - 주체를 request extension에 저장
//! - 선택적/강제 인증 모드 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1")
//!             .wrap(AuthMiddleware::optional()) // 주체가 있으면 저장, 없으면 익명
//!             .configure(configure_api)
//!     )
//! ```
//!
//! 주체가 반드시 필요한 핸들러는 `AuthenticatedUser` 추출자를 인자로 받습니다.

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
