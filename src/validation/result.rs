//! 검증 결과 타입

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::core::errors::{AppError, AppResult};

/// 필드별 에러 메시지 (필드 선언 순서 유지)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        f.write_str(&rendered.join("; "))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// 검증을 통과한 페이로드
///
/// 선언된 필드마다 source 이름으로 값을 보관합니다. 부분 업데이트에서 생략된
/// 필드는 "설정되지 않음"(`None`)으로 남고, 기본값으로 채워지지 않습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedPayload {
    values: Vec<(&'static str, Option<Value>)>,
}

impl ValidatedPayload {
    pub(crate) fn set(&mut self, source: &'static str, value: Option<Value>) {
        self.values.push((source, value));
    }

    /// 설정된 값 (설정되지 않았거나 선언되지 않은 필드면 `None`)
    pub fn get(&self, source: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(s, _)| *s == source)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn is_set(&self, source: &str) -> bool {
        self.get(source).is_some()
    }

    /// 문자열 값
    pub fn str(&self, source: &str) -> Option<&str> {
        self.get(source).and_then(Value::as_str)
    }

    /// 설정된 필드만 담은 맵. 부분 업데이트에 그대로 사용합니다.
    pub fn changes(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter_map(|(source, value)| value.clone().map(|v| (source.to_string(), v)))
            .collect()
    }

    /// 설정된 필드로 타입이 지정된 구조체를 만듭니다.
    ///
    /// 부분 업데이트 구조체는 `Option<T>` 필드를 사용하면 생략된 필드가 `None`이 됩니다.
    pub fn into_typed<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(Value::Object(self.changes()))
            .map_err(|e| AppError::InternalError(format!("validated payload does not fit target type: {}", e)))
    }
}

/// 검증 결과
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(ValidatedPayload),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// 요청 경계에서 사용하는 변환. 실패는 422 `ValidationError`가 됩니다.
    pub fn into_result(self) -> AppResult<ValidatedPayload> {
        match self {
            ValidationResult::Valid(payload) => Ok(payload),
            ValidationResult::Invalid(errors) => Err(AppError::ValidationError(errors)),
        }
    }
}
