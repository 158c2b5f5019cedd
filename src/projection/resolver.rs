//! 포함 해석기
//!
//! 디스크립터를 레코드에 대해 순회하며 [`WireObject`]를 만듭니다.
//!
//! * 필드는 선언 순서대로 방출됩니다.
//! * eager 필드는 항상, lazy 필드는 include 트리가 요청할 때만 방출됩니다.
//!   요청되지 않은 lazy 필드는 키 자체가 없습니다.
//! * 중첩 필드는 접미사 트리로 재귀하고, 컬렉션은 모든 요소를 같은 접미사로
//!   투영합니다.
//! * 트리의 각 노드는 한 번만 방문되므로, `author`와 `author.posts`가 함께
//!   요청되어도 `author`는 한 번만 강제됩니다.

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::SchemaRegistry;
use crate::projection::descriptor::{EntityDescriptor, FieldDescriptor, FieldKind};
use crate::projection::evaluator::{self, FieldValue};
use crate::projection::include::IncludeTree;
use crate::projection::record::{Loaded, Record, SharedRecord};
use crate::projection::wire::{WireObject, WireValue};

/// 레코드 하나를 wire 객체로 투영합니다.
///
/// 순수 함수입니다. 같은 레코드와 같은 include 트리에 대해 두 번 호출하면
/// 구조적으로 같은 결과를 냅니다.
pub fn resolve_projection(
    registry: &SchemaRegistry,
    descriptor: &EntityDescriptor,
    record: &dyn Record,
    includes: &IncludeTree,
) -> AppResult<WireObject> {
    if record.entity() != descriptor.entity() {
        return Err(AppError::SchemaError(format!(
            "descriptor '{}' applied to a '{}' record",
            descriptor.entity(),
            record.entity()
        )));
    }

    let empty = IncludeTree::default();
    let mut object = WireObject::new();

    for field in descriptor.fields() {
        let loaded = match evaluator::resolve(field, record)? {
            FieldValue::Resolved(loaded) => loaded,
            FieldValue::Deferred(handle) => {
                if !includes.requests(field.wire) {
                    continue;
                }
                handle.force()?.clone()
            }
        };

        let suffix = includes.child(field.wire).unwrap_or(&empty);
        let value = emit(registry, field, loaded, suffix)?;
        object.insert(field.wire, value);
    }

    Ok(object)
}

/// 평가된 값을 wire 값으로 바꿉니다. 관계는 재귀적으로 투영합니다.
fn emit(
    registry: &SchemaRegistry,
    field: &FieldDescriptor,
    loaded: Loaded,
    suffix: &IncludeTree,
) -> AppResult<WireValue> {
    match (&field.kind, loaded) {
        (FieldKind::Scalar | FieldKind::Date, Loaded::Value(value)) => Ok(WireValue::Scalar(value)),
        (FieldKind::Nested(_), Loaded::One(None)) => Ok(WireValue::Scalar(serde_json::Value::Null)),
        (FieldKind::Nested(entity), Loaded::One(Some(related))) => {
            project_related(registry, entity, &related, suffix).map(WireValue::Object)
        }
        (FieldKind::Collection(entity), Loaded::Many(items)) => items
            .iter()
            .map(|item| project_related(registry, entity, item, suffix))
            .collect::<AppResult<Vec<_>>>()
            .map(WireValue::List),
        (kind, other) => Err(AppError::SchemaError(format!(
            "field '{}' of kind {:?} resolved to {:?}",
            field.wire, kind, other
        ))),
    }
}

fn project_related(
    registry: &SchemaRegistry,
    entity: &str,
    record: &SharedRecord,
    suffix: &IncludeTree,
) -> AppResult<WireObject> {
    let descriptor = registry.describe(entity)?;
    resolve_projection(registry, &descriptor, record.as_ref(), suffix)
}
