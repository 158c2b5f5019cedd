//! 검증 규칙
//!
//! 필드에 선언되는 선언적 규칙과, 오버라이드가 없을 때 사용되는 기본 메시지
//! 템플릿을 정의합니다. 템플릿은 `:attribute`(사람이 읽는 필드 이름)와
//! `:min` 자리표시자를 지원합니다.

use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::utils::string_utils::humanize_attribute;

/// 메시지 오버라이드의 키로 쓰이는 규칙 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    Required,
    String,
    Integer,
    Array,
    Min,
    Email,
    Confirmed,
    Unique,
    Exists,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::String => "string",
            RuleKind::Integer => "integer",
            RuleKind::Array => "array",
            RuleKind::Min => "min",
            RuleKind::Email => "email",
            RuleKind::Confirmed => "confirmed",
            RuleKind::Unique => "unique",
            RuleKind::Exists => "exists",
        }
    }

    /// 오버라이드가 없을 때 사용하는 기본 템플릿
    pub fn default_template(&self) -> &'static str {
        match self {
            RuleKind::Required => "The :attribute field is required.",
            RuleKind::String => "The :attribute must be a string.",
            RuleKind::Integer => "The :attribute must be an integer.",
            RuleKind::Array => "The :attribute must be an array.",
            RuleKind::Min => "The :attribute must be at least :min characters.",
            RuleKind::Email => "The :attribute must be a valid email address.",
            RuleKind::Confirmed => "The :attribute confirmation does not match.",
            RuleKind::Unique => "The :attribute has already been taken.",
            RuleKind::Exists => "The selected :attribute is invalid.",
        }
    }
}

/// 필드 하나에 선언되는 검증 규칙
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// 존재하고, null이 아니며, 빈 문자열/빈 배열이 아님
    Required,
    /// 있으면 문자열이어야 함 (null 포함 거부)
    String,
    /// 있으면 i64 범위의 정수여야 함
    Integer,
    /// 있으면 배열이어야 함
    Array,
    /// 문자열 길이(문자 수), 배열 길이, 또는 숫자 값의 최솟값
    Min(usize),
    Email,
    /// `<wire>_confirmation` 필드와 값이 같아야 함
    Confirmed,
    /// 저장소에 같은 값이 없어야 함
    Unique { table: &'static str, column: &'static str },
    /// 저장소에 값이 있어야 함 (배열이면 모든 요소)
    Exists { table: &'static str, column: &'static str },
}

impl Rule {
    pub fn unique(table: &'static str, column: &'static str) -> Self {
        Rule::Unique { table, column }
    }

    pub fn exists(table: &'static str, column: &'static str) -> Self {
        Rule::Exists { table, column }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required => RuleKind::Required,
            Rule::String => RuleKind::String,
            Rule::Integer => RuleKind::Integer,
            Rule::Array => RuleKind::Array,
            Rule::Min(_) => RuleKind::Min,
            Rule::Email => RuleKind::Email,
            Rule::Confirmed => RuleKind::Confirmed,
            Rule::Unique { .. } => RuleKind::Unique,
            Rule::Exists { .. } => RuleKind::Exists,
        }
    }

    /// 저장소 조회가 필요한 규칙인지
    pub fn needs_lookup(&self) -> bool {
        matches!(self, Rule::Unique { .. } | Rule::Exists { .. })
    }

    /// 템플릿의 자리표시자를 채웁니다.
    pub fn render(&self, template: &str, wire: &str) -> String {
        let message = template.replace(":attribute", &humanize_attribute(wire));
        match self {
            Rule::Min(min) => message.replace(":min", &min.to_string()),
            _ => message,
        }
    }

    /// 저장소 조회 없이 판단할 수 있는 규칙을 검사합니다.
    ///
    /// `Required`를 제외한 규칙은 값이 없으면 통과합니다. 타입 규칙은 명시적
    /// null을 거부하고, 나머지 규칙은 null도 통과로 봅니다. nullable 필드의 null은
    /// 엔진이 규칙 평가 전에 받아들입니다.
    /// 조회가 필요한 규칙은 여기서 항상 통과로 보고 엔진이 따로 처리합니다.
    pub fn passes_locally(&self, wire: &str, value: Option<&Value>, payload: &Map<String, Value>) -> bool {
        match (self, value) {
            (Rule::Required, _) => return is_present(value),
            (Rule::String | Rule::Integer | Rule::Array, None) => return true,
            (Rule::String, Some(v)) => return v.is_string(),
            (Rule::Integer, Some(v)) => return v.is_i64(),
            (Rule::Array, Some(v)) => return v.is_array(),
            _ => {}
        }

        let Some(value) = value.filter(|v| !v.is_null()) else {
            return true;
        };

        match self {
            Rule::Min(min) => match value {
                Value::String(s) => s.chars().count() >= *min,
                Value::Array(items) => items.len() >= *min,
                Value::Number(n) => n.as_f64().is_some_and(|n| n >= *min as f64),
                _ => false,
            },
            Rule::Email => value
                .as_str()
                .is_some_and(|s| s.to_owned().validate_email()),
            Rule::Confirmed => payload.get(&format!("{}_confirmation", wire)) == Some(value),
            Rule::Required
            | Rule::String
            | Rule::Integer
            | Rule::Array
            | Rule::Unique { .. }
            | Rule::Exists { .. } => true,
        }
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}
