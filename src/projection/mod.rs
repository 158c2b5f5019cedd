//! # Data Projection & Lazy Serialization
//!
//! 도메인 레코드를 wire 객체로 투영하는 계층입니다. 모든 엔티티가 같은
//! 메커니즘을 재사용합니다.
//!
//! ## 구성
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | [`record`] | 프로젝션 가능한 레코드 trait과 관계 슬롯 |
//! | [`descriptor`] | 필드/엔티티 디스크립터와 빌더 |
//! | [`cast`] | 순수 스칼라 캐스트 (날짜 포맷 포함) |
//! | [`evaluator`] | 필드 하나의 eager 평가 또는 지연 핸들 생성 |
//! | [`include`] | include 경로 집합과 접두사 트리 |
//! | [`resolver`] | 디스크립터 순회 및 재귀 투영 |
//! | [`wire`] | 순서가 보존되는 wire 객체 |
//! | [`pagination`] | 페이지 봉투 변환 |
//! | [`facade`] | 호출 측 진입점 |
//!
//! ## 흐름
//!
//! ```text
//! Projection::of(record).include("author.posts")
//!          │
//!          ▼
//! SchemaRegistry::describe(entity)  ← 캐시된 디스크립터
//!          │
//!          ▼
//! resolve_projection(descriptor, record, include tree)
//!          │  ├─ eager 필드: 즉시 평가 + 캐스트
//!          │  └─ lazy 필드: 요청된 경우에만 강제
//!          ▼
//!      WireObject (선언 순서)
//! ```

pub mod cast;
pub mod descriptor;
pub mod evaluator;
pub mod facade;
pub mod include;
pub mod pagination;
pub mod record;
pub mod resolver;
pub mod wire;

pub use cast::Cast;
pub use descriptor::{EntityDescriptor, FieldDescriptor, FieldKind, Laziness};
pub use facade::{project_all, project_all_with, Projection};
pub use include::{IncludeSet, IncludeTree};
pub use pagination::{paginate, PageEnvelope, RawPage};
pub use record::{Loaded, Record, Related, SharedRecord};
pub use wire::{WireObject, WireValue};
