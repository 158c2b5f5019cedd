//! 프로젝션 파사드
//!
//! 호출 측(서비스, 핸들러)이 사용하는 진입점입니다. 레코드 하나에 디스크립터를
//! 바인딩하고, include 경로를 누적한 뒤 wire 객체로 변환합니다.
//!
//! ```rust,ignore
//! let wire = Projection::of(&post)
//!     .include("author")
//!     .include(["comments_count"])
//!     .to_wire()?;
//! ```

use std::sync::Arc;

use crate::core::errors::AppResult;
use crate::core::registry::SchemaRegistry;
use crate::projection::include::IncludeSet;
use crate::projection::record::Record;
use crate::projection::resolver::resolve_projection;
use crate::projection::wire::WireObject;

/// 레코드 하나에 대한 프로젝션 요청
///
/// `include`는 수신자를 바꾸지 않고 합집합이 적용된 새 값을 반환합니다.
#[derive(Clone)]
pub struct Projection<'a> {
    registry: Arc<SchemaRegistry>,
    record: &'a dyn Record,
    includes: IncludeSet,
}

impl<'a> Projection<'a> {
    /// 전역 레지스트리를 사용하는 프로젝션
    pub fn of(record: &'a dyn Record) -> Self {
        Self::with_registry(SchemaRegistry::global(), record)
    }

    pub fn with_registry(registry: Arc<SchemaRegistry>, record: &'a dyn Record) -> Self {
        Self {
            registry,
            record,
            includes: IncludeSet::new(),
        }
    }

    /// include 경로를 추가한 새 프로젝션을 반환합니다.
    pub fn include(&self, paths: impl Into<IncludeSet>) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            record: self.record,
            includes: self.includes.union(&paths.into()),
        }
    }

    pub fn includes(&self) -> &IncludeSet {
        &self.includes
    }

    /// 디스크립터를 조회하고 포함 해석기를 실행합니다.
    pub fn to_wire(&self) -> AppResult<WireObject> {
        let descriptor = self.registry.describe(self.record.entity())?;
        resolve_projection(&self.registry, &descriptor, self.record, &self.includes.tree())
    }
}

impl<'a, R: Record> From<&'a R> for Projection<'a> {
    fn from(record: &'a R) -> Self {
        Projection::of(record)
    }
}

/// 컬렉션 전체를 같은 include 집합으로 투영합니다. 순서를 유지합니다.
pub fn project_all<R: Record>(records: &[R], includes: &IncludeSet) -> AppResult<Vec<WireObject>> {
    project_all_with(&SchemaRegistry::global(), records, includes)
}

/// 지정한 레지스트리로 컬렉션을 투영합니다.
///
/// include 트리는 한 번만 컴파일되고 모든 요소에 재사용됩니다.
pub fn project_all_with<R: Record>(
    registry: &SchemaRegistry,
    records: &[R],
    includes: &IncludeSet,
) -> AppResult<Vec<WireObject>> {
    let tree = includes.tree();

    records
        .iter()
        .map(|record| {
            let descriptor = registry.describe(record.entity())?;
            resolve_projection(registry, &descriptor, record, &tree)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::descriptor::{EntityDescriptor, FieldDescriptor};
    use crate::projection::record::Loaded;
    use serde_json::{json, Value};
    use std::any::Any;

    struct Tag {
        id: i64,
    }

    impl Record for Tag {
        fn entity(&self) -> &'static str {
            "tag"
        }

        fn attribute(&self, source: &str) -> Option<Value> {
            (source == "id").then(|| json!(self.id))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn registry() -> Arc<SchemaRegistry> {
        let registry = SchemaRegistry::empty();
        registry
            .register("tag", || {
                EntityDescriptor::builder("tag")
                    .field(FieldDescriptor::scalar("id"))
                    .field(FieldDescriptor::lazy_scalar::<Tag, _>("label", |t| {
                        Ok(Loaded::value(format!("#{}", t.id)))
                    }))
                    .build()
            })
            .unwrap();
        Arc::new(registry)
    }

    #[test]
    fn test_include_returns_a_new_projection() {
        let tag = Tag { id: 1 };
        let base = Projection::with_registry(registry(), &tag);
        let extended = base.include("label");

        assert!(base.includes().is_empty());
        assert!(extended.includes().contains("label"));

        assert!(!base.to_wire().unwrap().contains_key("label"));
        assert_eq!(
            extended.to_wire().unwrap().get("label").unwrap().as_scalar(),
            Some(&json!("#1"))
        );
    }

    #[test]
    fn test_project_all_keeps_order() {
        let registry = registry();
        let tags = vec![Tag { id: 3 }, Tag { id: 1 }, Tag { id: 2 }];

        let wire = project_all_with(&registry, &tags, &IncludeSet::new()).unwrap();
        let ids: Vec<_> = wire.iter().map(|w| w.to_value()["id"].clone()).collect();

        assert_eq!(ids, vec![json!(3), json!(1), json!(2)]);
    }
}
