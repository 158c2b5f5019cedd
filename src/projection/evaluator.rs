//! 필드 평가기
//!
//! 필드 하나의 값을 결정합니다. eager 필드는 즉시 평가되고, lazy 필드는
//! 아무 작업도 하지 않는 [`Deferred`] 핸들로 반환됩니다. 핸들은 포함 해석기가
//! 명시적으로 강제할 때 정확히 한 번만 resolver를 실행합니다.

use log::debug;
use once_cell::unsync::OnceCell;
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::projection::descriptor::FieldDescriptor;
use crate::projection::record::{Loaded, Record};

/// 평가 결과: 이미 계산된 값 또는 지연 핸들
pub enum FieldValue<'a> {
    Resolved(Loaded),
    Deferred(Deferred<'a>),
}

/// 강제되기 전까지 부작용이 없는 지연 핸들
///
/// 요청이 중간에 취소되어 강제되지 않은 핸들은 그대로 버려지며, 관계 로드나
/// 쿼리는 전혀 실행되지 않습니다.
pub struct Deferred<'a> {
    field: &'a FieldDescriptor,
    source: &'a dyn Record,
    cell: OnceCell<Loaded>,
}

impl<'a> Deferred<'a> {
    /// resolver를 실행하고 결과를 메모이즈합니다. 두 번째 호출부터는
    /// 캐시된 값을 돌려줍니다.
    pub fn force(&self) -> AppResult<&Loaded> {
        self.cell.get_or_try_init(|| {
            debug!("⏳ forcing lazy field {}.{}", self.source.entity(), self.field.wire);
            let loaded = run_resolver(self.field, self.source)?;
            finish(self.field, loaded)
        })
    }

    pub fn is_forced(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// 필드 하나를 평가합니다.
pub fn resolve<'a>(field: &'a FieldDescriptor, source: &'a dyn Record) -> AppResult<FieldValue<'a>> {
    if field.is_lazy() {
        return Ok(FieldValue::Deferred(Deferred {
            field,
            source,
            cell: OnceCell::new(),
        }));
    }

    let loaded = match field.resolver {
        Some(_) => run_resolver(field, source)?,
        None => {
            let raw = source.attribute(field.source).ok_or_else(|| {
                AppError::SchemaError(format!(
                    "source '{}' of field '{}' does not exist on record '{}'",
                    field.source,
                    field.wire,
                    source.entity()
                ))
            })?;
            Loaded::Value(raw)
        }
    };

    finish(field, loaded).map(FieldValue::Resolved)
}

fn run_resolver(field: &FieldDescriptor, source: &dyn Record) -> AppResult<Loaded> {
    let resolver = field.resolver.as_ref().ok_or_else(|| {
        AppError::SchemaError(format!("field '{}' has no resolver", field.wire))
    })?;
    resolver(source)
}

/// null 허용 여부를 확인하고 스칼라 캐스트를 적용합니다.
fn finish(field: &FieldDescriptor, loaded: Loaded) -> AppResult<Loaded> {
    match loaded {
        Loaded::Value(Value::Null) | Loaded::One(None) if !field.nullable => {
            Err(AppError::cast(field.wire, "null value on a non-nullable field"))
        }
        Loaded::Value(Value::Null) => Ok(Loaded::Value(Value::Null)),
        Loaded::Value(raw) => field.cast.apply(field.wire, &raw).map(Loaded::Value),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::cast::Cast;
    use serde_json::json;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Gadget {
        calls: Arc<AtomicUsize>,
    }

    impl Record for Gadget {
        fn entity(&self) -> &'static str {
            "gadget"
        }

        fn attribute(&self, source: &str) -> Option<Value> {
            match source {
                "id" => Some(json!(1)),
                "built_at" => Some(json!("2023-12-24 18:00:00")),
                "retired_at" => Some(Value::Null),
                _ => None,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn gadget() -> (Gadget, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Gadget { calls: Arc::clone(&calls) }, calls)
    }

    #[test]
    fn test_lazy_field_does_no_work_until_forced() {
        let (record, calls) = gadget();
        let field = FieldDescriptor::lazy_scalar::<Gadget, _>("usage", |g| {
            g.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Loaded::value(99))
        });

        let value = resolve(&field, &record).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let FieldValue::Deferred(handle) = value else {
            panic!("lazy field should produce a deferred handle");
        };
        assert!(!handle.is_forced());

        handle.force().unwrap();
        handle.force().unwrap();

        assert!(handle.is_forced());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_source_is_a_schema_error() {
        let (record, _) = gadget();
        let field = FieldDescriptor::scalar("colour");

        assert!(matches!(resolve(&field, &record), Err(AppError::SchemaError(_))));
    }

    #[test]
    fn test_null_on_non_nullable_date_is_a_cast_error() {
        let (record, _) = gadget();
        let strict = FieldDescriptor::date("retired_at", "%Y-%m-%d %H:%M:%S");
        let lenient = FieldDescriptor::date("retired_at", "%Y-%m-%d %H:%M:%S").nullable();

        assert!(matches!(resolve(&strict, &record), Err(AppError::CastError { .. })));
        assert!(matches!(
            resolve(&lenient, &record),
            Ok(FieldValue::Resolved(Loaded::Value(Value::Null)))
        ));
    }

    #[test]
    fn test_unparseable_date_is_a_cast_error_not_null() {
        let (record, _) = gadget();
        let field = FieldDescriptor::date("built", "%d/%m/%Y").source("built_at").nullable();

        assert!(matches!(
            resolve(&field, &record),
            Err(AppError::CastError { ref field, .. }) if field == "built"
        ));
    }

    #[test]
    fn test_integer_cast_is_applied_to_eager_scalars() {
        let (record, _) = gadget();
        let field = FieldDescriptor::scalar("id").cast(Cast::Text);

        let FieldValue::Resolved(Loaded::Value(value)) = resolve(&field, &record).unwrap() else {
            panic!("eager field should resolve immediately");
        };

        assert_eq!(value, json!("1"));
    }
}
