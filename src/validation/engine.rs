//! 검증 엔진
//!
//! 입력 디스크립터를 [`RuleSet`]으로 컴파일하고, JSON 페이로드를 필드 단위로
//! 검증합니다.
//!
//! * 필드마다 규칙을 선언 순서대로 평가하고 첫 실패에서 멈춥니다.
//!   따라서 필드당 메시지는 최대 하나입니다.
//! * 부분 업데이트용(optional) 필드가 페이로드에 없으면 규칙을 건너뛰고
//!   "설정되지 않음"으로 기록합니다.
//! * `unique`/`exists`만 저장소 협력자([`RecordLookup`])를 통해 I/O를 수행합니다.

use async_trait::async_trait;
use log::debug;
use serde_json::{Map, Value};

use crate::core::errors::AppResult;
use crate::projection::descriptor::EntityDescriptor;
use crate::validation::result::{FieldErrors, ValidatedPayload, ValidationResult};
use crate::validation::rules::Rule;

/// `unique`/`exists` 규칙을 위한 저장소 조회 협력자
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// `table.column == value`인 레코드가 있는지 확인합니다.
    async fn exists(&self, table: &str, column: &str, value: &Value) -> AppResult<bool>;
}

/// 메시지가 확정된 규칙
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CompiledField {
    pub wire: &'static str,
    pub source: &'static str,
    pub optional: bool,
    /// 명시적 null을 "비우기"로 받아들임
    pub nullable: bool,
    pub rules: Vec<CompiledRule>,
}

/// 입력 디스크립터 하나의 컴파일된 규칙 집합
#[derive(Debug, Clone)]
pub struct RuleSet {
    entity: &'static str,
    fields: Vec<CompiledField>,
}

impl RuleSet {
    /// 디스크립터의 규칙과 메시지 오버라이드를 합쳐 규칙 집합을 만듭니다.
    ///
    /// 메시지는 `(필드, 규칙 종류)` 오버라이드가 있으면 그것을, 없으면 규칙 종류의
    /// 기본 템플릿을 사용합니다.
    pub fn compile(descriptor: &EntityDescriptor) -> Self {
        let overrides = descriptor.messages();

        let fields = descriptor
            .fields()
            .iter()
            .map(|field| CompiledField {
                wire: field.wire,
                source: field.source,
                optional: field.optional_on_write,
                nullable: field.nullable,
                rules: field
                    .rules
                    .iter()
                    .map(|rule| {
                        let kind = rule.kind();
                        let template = overrides
                            .get(&(field.wire.to_string(), kind))
                            .map(String::as_str)
                            .unwrap_or_else(|| kind.default_template());
                        CompiledRule {
                            rule: rule.clone(),
                            message: rule.render(template, field.wire),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            entity: descriptor.entity(),
            fields,
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// 페이로드를 검증합니다.
    ///
    /// 객체가 아닌 페이로드는 모든 필드가 없는 것으로 취급합니다.
    ///
    /// # Errors
    ///
    /// 검증 실패는 `Ok(ValidationResult::Invalid)`로 반환되며, `Err`는 저장소
    /// 협력자가 실패한 경우에만 반환됩니다.
    pub async fn validate(&self, payload: &Value, lookup: &dyn RecordLookup) -> AppResult<ValidationResult> {
        let empty = Map::new();
        let object = payload.as_object().unwrap_or(&empty);

        let mut errors = FieldErrors::default();
        let mut validated = ValidatedPayload::default();

        for field in &self.fields {
            let value = object.get(field.wire);

            if value.is_none() && field.optional {
                validated.set(field.source, None);
                continue;
            }

            if field.nullable && value.is_some_and(Value::is_null) {
                validated.set(field.source, Some(Value::Null));
                continue;
            }

            if let Some(message) = first_failure(field, value, object, lookup).await? {
                errors.push(field.wire, message);
                continue;
            }

            validated.set(field.source, Some(value.cloned().unwrap_or(Value::Null)));
        }

        if errors.is_empty() {
            Ok(ValidationResult::Valid(validated))
        } else {
            debug!("🚫 {} rejected: {}", self.entity, errors);
            Ok(ValidationResult::Invalid(errors))
        }
    }
}

/// 필드 규칙을 순서대로 평가하여 첫 실패 메시지를 반환합니다.
async fn first_failure(
    field: &CompiledField,
    value: Option<&Value>,
    payload: &Map<String, Value>,
    lookup: &dyn RecordLookup,
) -> AppResult<Option<String>> {
    for compiled in &field.rules {
        let passed = if compiled.rule.needs_lookup() {
            passes_lookup(&compiled.rule, value, lookup).await?
        } else {
            compiled.rule.passes_locally(field.wire, value, payload)
        };

        if !passed {
            return Ok(Some(compiled.message.clone()));
        }
    }
    Ok(None)
}

async fn passes_lookup(rule: &Rule, value: Option<&Value>, lookup: &dyn RecordLookup) -> AppResult<bool> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(true);
    };

    match rule {
        Rule::Unique { table, column } => Ok(!lookup.exists(table, column, value).await?),
        Rule::Exists { table, column } => match value {
            Value::Array(items) => {
                for item in items {
                    if !lookup.exists(table, column, item).await? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            single => lookup.exists(table, column, single).await,
        },
        _ => Ok(true),
    }
}

/// 규칙 집합으로 페이로드를 검증합니다.
pub async fn validate(payload: &Value, rules: &RuleSet, lookup: &dyn RecordLookup) -> AppResult<ValidationResult> {
    rules.validate(payload, lookup).await
}
