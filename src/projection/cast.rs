//! 필드 캐스트
//!
//! 캐스트는 순수하고 결정적입니다. 같은 입력과 같은 포맷 문자열은 언제나 같은
//! 결과를 냅니다. 파싱할 수 없는 값은 `null`로 바꾸지 않고 `CastError`가 됩니다.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};

/// 사용자 정의 캐스트 함수
pub type CastFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// 스칼라 필드에 적용할 캐스트
#[derive(Clone)]
pub enum Cast {
    /// 값을 그대로 통과
    Identity,
    /// 정수로 변환 (숫자 문자열 허용)
    Integer,
    /// 불리언으로 변환 (`0`/`1` 허용)
    Boolean,
    /// 문자열로 변환
    Text,
    /// 명시적 포맷 문자열로 날짜/시간을 정규화
    DateTime { format: &'static str },
    /// 순수 사용자 정의 함수
    Custom(CastFn),
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cast::Identity => f.write_str("Identity"),
            Cast::Integer => f.write_str("Integer"),
            Cast::Boolean => f.write_str("Boolean"),
            Cast::Text => f.write_str("Text"),
            Cast::DateTime { format } => f.debug_struct("DateTime").field("format", format).finish(),
            Cast::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Cast {
    /// 원시 값에 캐스트를 적용합니다.
    ///
    /// `null` 처리는 호출자(필드 평가기)의 몫이며, 이 함수는 `null`이 아닌
    /// 값만 받는다고 가정합니다.
    pub fn apply(&self, field: &str, raw: &Value) -> AppResult<Value> {
        match self {
            Cast::Identity => Ok(raw.clone()),
            Cast::Integer => match raw {
                Value::Number(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| AppError::cast(field, format!("'{}' is not an integer", s))),
                other => Err(AppError::cast(field, format!("{} is not an integer", other))),
            },
            Cast::Boolean => match raw {
                Value::Bool(_) => Ok(raw.clone()),
                Value::Number(n) if n.as_i64() == Some(0) => Ok(Value::Bool(false)),
                Value::Number(n) if n.as_i64() == Some(1) => Ok(Value::Bool(true)),
                other => Err(AppError::cast(field, format!("{} is not a boolean", other))),
            },
            Cast::Text => match raw {
                Value::String(_) => Ok(raw.clone()),
                Value::Number(n) => Ok(Value::String(n.to_string())),
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                other => Err(AppError::cast(field, format!("{} is not text", other))),
            },
            Cast::DateTime { format } => {
                let text = raw
                    .as_str()
                    .ok_or_else(|| AppError::cast(field, format!("{} is not a date string", raw)))?;
                let parsed = parse_timestamp(text, format)
                    .ok_or_else(|| AppError::cast(field, format!("'{}' does not match '{}'", text, format)))?;
                Ok(Value::String(parsed.format(format).to_string()))
            }
            Cast::Custom(cast) => cast(raw).map_err(|message| AppError::cast(field, message)),
        }
    }
}

/// 날짜 문자열을 정규화된 타임스탬프로 파싱합니다.
///
/// 설정된 포맷을 먼저 시도하고, 저장소가 내보내는 ISO-8601 / RFC 3339 표현도
/// 받아들입니다. 오프셋이 있는 값은 UTC 기준 naive 타임스탬프로 정규화됩니다.
pub fn parse_timestamp(text: &str, format: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
        return Some(parsed);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, format) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.naive_utc())
}
