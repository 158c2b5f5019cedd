//! 블로그 서비스 백엔드
//!
//! 사용자, 게시글, 댓글, 카테고리를 다루는 REST API입니다. 모든 응답은
//! 엔티티 디스크립터 기반의 프로젝션 계층을 거치며, 모든 입력은 같은
//! 디스크립터에 선언된 규칙으로 검증됩니다.
//!
//! # Features
//!
//! - **프로젝션**: 선언 순서가 보존되는 wire 객체, 요청된 관계만 지연 로딩
//! - **include 지시어**: `?include=author,comments.author`로 중첩 관계 선택
//! - **검증 엔진**: 규칙 단락 평가, 필드별 메시지 재정의, `unique`/`exists` 조회
//! - **페이지 봉투**: `data`, `total`, `per_page`, `current_page`, `last_page`, `from`, `to`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Handlers     │ ──→ │    Validation    │ ← 입력 디스크립터 규칙
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Services     │ ──→ │    Projection    │ ← 출력 디스크립터
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 관계 로더 바인딩
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ In-memory DB    │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use blog_service_backend::projection::Projection;
//!
//! let wire = Projection::of(&post).include("author,comments.author").to_wire()?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod projection;
pub mod validation;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
