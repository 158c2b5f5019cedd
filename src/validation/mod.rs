//! # Validation Engine
//!
//! 선언적 규칙 집합으로 입력 페이로드를 검증합니다. 규칙과 메시지 오버라이드는
//! 프로젝션과 같은 [`EntityDescriptor`](crate::projection::EntityDescriptor)에
//! 선언되므로 wire ↔ source 이름 변환이 한곳에 모입니다.
//!
//! ```rust,ignore
//! let rules = SchemaRegistry::global().rules("create_comment")?;
//! let payload = rules.validate(&body, db.as_ref()).await?.into_result()?;
//! let post_id = payload.get("post_id");
//! ```

pub mod engine;
pub mod result;
pub mod rules;

pub use engine::{validate, CompiledField, CompiledRule, RecordLookup, RuleSet};
pub use result::{FieldErrors, ValidatedPayload, ValidationResult};
pub use rules::{Rule, RuleKind};
