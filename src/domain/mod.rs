//! # Domain Layer Module
//!
//! 블로그 도메인의 엔티티, 입력 DTO, 인증 모델을 모은 계층입니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - User, Post, Comment, Category 레코드와 출력 디스크립터
//! ├── DTOs      - 입력 디스크립터(검증 규칙)와 타입이 지정된 요청, 응답 봉투
//! └── Models    - 인가 협력자가 만드는 요청 주체
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 디스크립터 등록
//!
//! 엔티티와 입력 DTO는 각자 디스크립터 빌더를 `inventory`로 제출합니다.
//! [`SchemaRegistry`](crate::core::registry::SchemaRegistry)는 처음 요청될 때
//! 한 번만 빌드합니다.
//!
//! | 엔티티 타입 | 용도 |
//! |-------------|------|
//! | `user`, `post`, `comment`, `category` | 출력 프로젝션 |
//! | `create_user`, `update_user` | 사용자 입력 검증 |
//! | `create_post`, `update_post` | 게시글 입력 검증 |
//! | `create_comment` | 댓글 입력 검증 |
//! | `create_category` | 카테고리 입력 검증 |
//!
//! ## 엔티티 관계
//!
//! 관계 필드는 [`Related`](crate::projection::Related) 슬롯입니다. 리포지토리가
//! 지연 로더를 바인딩하고, 프로젝션이 include 된 관계만 강제합니다.
//!
//! ```text
//! User    1 ── * Post * ── * Category
//! User    1 ── * Comment
//! Post    1 ── * Comment
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use models::auth;
