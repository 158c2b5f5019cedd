//! 필드/엔티티 디스크립터
//!
//! 어노테이션이나 리플렉션 대신, 엔티티마다 한 번 빌더로 명시적인
//! [`EntityDescriptor`]를 만들어 둡니다. 디스크립터는 출력(프로젝션)과
//! 입력(검증) 양쪽에서 같은 필드 메타데이터를 공유합니다.
//!
//! ```rust,ignore
//! let descriptor = EntityDescriptor::builder("comment")
//!     .field(FieldDescriptor::scalar("id"))
//!     .field(FieldDescriptor::scalar("content"))
//!     .field(FieldDescriptor::date("created_at", DATE_FORMAT))
//!     .field(FieldDescriptor::lazy_one::<Comment, _>("author", "user", |c| c.author.load().map(Loaded::one)))
//!     .build()?;
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::projection::cast::Cast;
use crate::projection::record::{Loaded, Record};
use crate::validation::rules::{Rule, RuleKind};

/// 타입 소거된 필드 resolver
pub type Resolver = Arc<dyn Fn(&dyn Record) -> AppResult<Loaded> + Send + Sync>;

/// 필드 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Date,
    /// 단일 중첩 엔티티 (요소 엔티티 타입)
    Nested(&'static str),
    /// 엔티티 컬렉션 (요소 엔티티 타입)
    Collection(&'static str),
}

impl FieldKind {
    pub fn is_relation(&self) -> bool {
        matches!(self, FieldKind::Nested(_) | FieldKind::Collection(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Laziness {
    Eager,
    Lazy,
}

/// 필드 하나의 정적 메타데이터
#[derive(Clone)]
pub struct FieldDescriptor {
    pub wire: &'static str,
    pub source: &'static str,
    pub kind: FieldKind,
    pub laziness: Laziness,
    pub cast: Cast,
    pub nullable: bool,
    pub rules: Vec<Rule>,
    pub optional_on_write: bool,
    pub resolver: Option<Resolver>,
}

impl FieldDescriptor {
    fn new(wire: &'static str, kind: FieldKind, laziness: Laziness) -> Self {
        Self {
            wire,
            source: wire,
            kind,
            laziness,
            cast: Cast::Identity,
            nullable: false,
            rules: Vec::new(),
            optional_on_write: false,
            resolver: None,
        }
    }

    /// eager 스칼라 필드
    pub fn scalar(wire: &'static str) -> Self {
        Self::new(wire, FieldKind::Scalar, Laziness::Eager)
    }

    /// eager 날짜 필드 (포맷 문자열로 파싱/출력)
    pub fn date(wire: &'static str, format: &'static str) -> Self {
        Self {
            cast: Cast::DateTime { format },
            ..Self::new(wire, FieldKind::Date, Laziness::Eager)
        }
    }

    /// 요청될 때만 계산되는 스칼라 필드 (예: `posts_count`)
    pub fn lazy_scalar<R, F>(wire: &'static str, resolve: F) -> Self
    where
        R: Record,
        F: Fn(&R) -> AppResult<Loaded> + Send + Sync + 'static,
    {
        Self::new(wire, FieldKind::Scalar, Laziness::Lazy).resolved_by(resolve)
    }

    /// 요청될 때만 로드되는 단일 관계
    pub fn lazy_one<R, F>(wire: &'static str, entity: &'static str, resolve: F) -> Self
    where
        R: Record,
        F: Fn(&R) -> AppResult<Loaded> + Send + Sync + 'static,
    {
        Self::new(wire, FieldKind::Nested(entity), Laziness::Lazy).resolved_by(resolve)
    }

    /// 요청될 때만 로드되는 컬렉션 관계
    pub fn lazy_many<R, F>(wire: &'static str, entity: &'static str, resolve: F) -> Self
    where
        R: Record,
        F: Fn(&R) -> AppResult<Loaded> + Send + Sync + 'static,
    {
        Self::new(wire, FieldKind::Collection(entity), Laziness::Lazy).resolved_by(resolve)
    }

    /// 항상 포함되는 단일 관계
    pub fn eager_one<R, F>(wire: &'static str, entity: &'static str, resolve: F) -> Self
    where
        R: Record,
        F: Fn(&R) -> AppResult<Loaded> + Send + Sync + 'static,
    {
        Self::new(wire, FieldKind::Nested(entity), Laziness::Eager).resolved_by(resolve)
    }

    /// 타입이 지정된 resolver를 등록합니다.
    ///
    /// 레코드가 기대한 타입이 아니면 `SchemaError`를 반환하도록 감쌉니다.
    pub fn resolved_by<R, F>(mut self, resolve: F) -> Self
    where
        R: Record,
        F: Fn(&R) -> AppResult<Loaded> + Send + Sync + 'static,
    {
        let wire = self.wire;
        self.resolver = Some(Arc::new(move |record: &dyn Record| {
            let typed = record.as_any().downcast_ref::<R>().ok_or_else(|| {
                AppError::SchemaError(format!(
                    "field '{}' expects a different record type, got '{}'",
                    wire,
                    record.entity()
                ))
            })?;
            resolve(typed)
        }));
        self
    }

    /// wire 이름과 다른 source 이름(컬럼)을 지정합니다.
    pub fn source(mut self, source: &'static str) -> Self {
        self.source = source;
        self
    }

    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn rules<I: IntoIterator<Item = Rule>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// 부분 업데이트에서 생략 가능한 필드로 표시합니다.
    pub fn optional(mut self) -> Self {
        self.optional_on_write = true;
        self
    }

    pub fn is_lazy(&self) -> bool {
        self.laziness == Laziness::Lazy
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("wire", &self.wire)
            .field("source", &self.source)
            .field("kind", &self.kind)
            .field("laziness", &self.laziness)
            .field("cast", &self.cast)
            .field("nullable", &self.nullable)
            .field("rules", &self.rules)
            .field("optional_on_write", &self.optional_on_write)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

/// (필드, 규칙 종류) → 메시지 템플릿
pub type MessageOverrides = HashMap<(String, RuleKind), String>;

/// 엔티티 하나의 불변 디스크립터
#[derive(Debug)]
pub struct EntityDescriptor {
    entity: &'static str,
    fields: Vec<FieldDescriptor>,
    messages: MessageOverrides,
}

impl EntityDescriptor {
    pub fn builder(entity: &'static str) -> EntityDescriptorBuilder {
        EntityDescriptorBuilder {
            entity,
            fields: Vec::new(),
            messages: MessageOverrides::new(),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, wire: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire == wire)
    }

    pub fn messages(&self) -> &MessageOverrides {
        &self.messages
    }
}

pub struct EntityDescriptorBuilder {
    entity: &'static str,
    fields: Vec<FieldDescriptor>,
    messages: MessageOverrides,
}

impl EntityDescriptorBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// 특정 필드/규칙 조합의 메시지를 덮어씁니다.
    pub fn message(mut self, field: &str, kind: RuleKind, template: &str) -> Self {
        self.messages.insert((field.to_string(), kind), template.to_string());
        self
    }

    /// 디스크립터를 검증하고 확정합니다.
    ///
    /// # Errors
    ///
    /// * 중복된 wire 이름
    /// * resolver가 없는 lazy 필드 또는 관계 필드
    /// * 존재하지 않는 필드를 가리키는 메시지 오버라이드
    pub fn build(self) -> AppResult<EntityDescriptor> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if !seen.insert(field.wire) {
                return Err(AppError::SchemaError(format!(
                    "entity '{}' declares wire name '{}' twice",
                    self.entity, field.wire
                )));
            }
            if (field.is_lazy() || field.kind.is_relation()) && field.resolver.is_none() {
                return Err(AppError::SchemaError(format!(
                    "field '{}.{}' needs a resolver",
                    self.entity, field.wire
                )));
            }
        }

        if let Some((field, kind)) = self.messages.keys().find(|(field, _)| !seen.contains(field.as_str())) {
            return Err(AppError::SchemaError(format!(
                "message override '{}.{}' names an unknown field of '{}'",
                field,
                kind.as_str(),
                self.entity
            )));
        }

        Ok(EntityDescriptor {
            entity: self.entity,
            fields: self.fields,
            messages: self.messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_wire_names_are_rejected() {
        let result = EntityDescriptor::builder("widget")
            .field(FieldDescriptor::scalar("id"))
            .field(FieldDescriptor::scalar("name").source("id"))
            .field(FieldDescriptor::scalar("id").source("legacy_id"))
            .build();

        assert!(matches!(result, Err(AppError::SchemaError(msg)) if msg.contains("'id' twice")));
    }

    #[test]
    fn test_lazy_field_without_resolver_is_rejected() {
        let mut field = FieldDescriptor::scalar("total");
        field.laziness = Laziness::Lazy;

        let result = EntityDescriptor::builder("widget").field(field).build();

        assert!(matches!(result, Err(AppError::SchemaError(_))));
    }

    #[test]
    fn test_message_override_for_unknown_field_is_rejected() {
        let result = EntityDescriptor::builder("widget")
            .field(FieldDescriptor::scalar("name"))
            .message("nmae", RuleKind::Required, "typo")
            .build();

        assert!(matches!(result, Err(AppError::SchemaError(_))));
    }

    #[test]
    fn test_source_defaults_to_wire_name() {
        let descriptor = EntityDescriptor::builder("widget")
            .field(FieldDescriptor::scalar("name"))
            .field(FieldDescriptor::scalar("postId").source("post_id"))
            .build()
            .unwrap();

        assert_eq!(descriptor.field("name").unwrap().source, "name");
        assert_eq!(descriptor.field("postId").unwrap().source, "post_id");
    }
}
