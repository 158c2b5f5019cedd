//! # Core Module
//!
//! 프로젝션/검증 엔진이 공유하는 핵심 기반을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 스키마 레지스트리
//! - **SchemaRegistry**: 엔티티 타입 → 디스크립터 캐시
//! - **자동 등록**: `inventory` 기반 컴파일 타임 디스크립터 수집
//! - **규칙 집합 캐시**: 입력 디스크립터의 컴파일된 검증 규칙
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 구현
//! - **자동 변환**: thiserror 기반 에러 체인 관리

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
