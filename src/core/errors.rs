//! # Application Error Handling System
//!
//! 블로그 백엔드 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 한 번으로 일관된 JSON 응답으로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | AppError | HTTP Status | 발생 위치 |
//! |----------|-------------|-----------|
//! | `SchemaError` | 500 | 디스크립터 구성 오류 (등록 시점 또는 첫 접근) |
//! | `CastError` | 500 | 프로젝션 중 잘못된 스칼라 (상위 데이터 무결성 결함) |
//! | `ValidationError` | 422 | 입력 페이로드 검증 실패 (필드별 메시지) |
//! | `NotFound` | 404 | 리소스 없음 |
//! | `AuthenticationError` | 401 | 주체(principal) 확인 실패 |
//! | `AuthorizationError` | 403 | 권한 부족 |
//! | `ConflictError` | 409 | 비즈니스 규칙 충돌 |
//! | `DatabaseError` | 500 | 저장소 협력자 오류 |
//! | `InternalError` | 500 | 예상치 못한 오류 |
//!
//! `SchemaError`와 `CastError`는 엔진 내부에서 잡지 않고 최상위 핸들러까지
//! 그대로 전파됩니다. `ValidationError`는 요청 경계에서 항상 필드별 메시지
//! 목록으로 변환됩니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Os dados fornecidos são inválidos",
//!   "errors": {
//!     "password": ["As passwords não coincidem"]
//!   }
//! }
//! ```

use thiserror::Error;
use crate::validation::FieldErrors;

/// 애플리케이션 전역 에러 타입
///
/// 프로젝션/검증 엔진과 그 주변 글루 코드에서 발생할 수 있는 모든 에러를
/// 포괄합니다. 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 잘못 구성된 디스크립터
    ///
    /// 중복된 wire 이름, resolver가 없는 lazy 필드, 실제 레코드에 존재하지 않는
    /// source 이름 등. 치명적이며 사용자에게 노출되지 않습니다.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// 프로젝션 중 발견된 잘못된 스칼라 값
    ///
    /// 파싱할 수 없는 날짜, nullable이 아닌 필드의 null 등.
    /// 사용자가 복구할 수 없는 서버 측 실패입니다.
    #[error("Cast error on field '{field}': {message}")]
    CastError { field: String, message: String },

    /// 입력값 검증 에러 (422 Unprocessable Entity)
    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 저장소 협력자 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 필드 이름과 메시지로 `CastError`를 생성합니다.
    pub fn cast(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::CastError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 클라이언트에게 보여줄 메시지
    ///
    /// 서버 측 결함(스키마, 캐스트, 저장소)은 내부 사정을 숨기고
    /// 일반 메시지로 대체합니다.
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Os dados fornecidos são inválidos".to_string(),
            AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            _ => "Erro interno do servidor".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 서버 측 에러는 원인을 로그로 남기고, 검증 에러는 필드별 메시지 맵을
    /// `errors` 키에 담아 반환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        let mut body = serde_json::json!({
            "success": false,
            "message": self.public_message(),
        });

        if let AppError::ValidationError(errors) = self {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }

        actix_web::HttpResponse::build(status).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
