//! Wire 표현
//!
//! 도메인 엔티티의 외부 직렬화 형태입니다. 키 순서는 디스크립터의 선언 순서를
//! 따르며, 요청되지 않은 lazy 필드는 키 자체가 없습니다(`null`과 구분됩니다).

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// wire 필드 값
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Scalar(Value),
    Object(WireObject),
    List(Vec<WireObject>),
}

impl WireValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            WireValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&WireObject> {
        match self {
            WireValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[WireObject]> {
        match self {
            WireValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Scalar(Value::Null))
    }
}

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WireValue::Scalar(value) => value.serialize(serializer),
            WireValue::Object(object) => object.serialize(serializer),
            WireValue::List(items) => items.serialize(serializer),
        }
    }
}

/// 선언 순서를 유지하는 wire 객체
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireObject {
    entries: Vec<(String, WireValue)>,
}

impl WireObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키를 추가합니다. 디스크립터가 wire 이름의 유일성을 보장하므로
    /// 같은 키가 두 번 들어오면 기존 값을 교체합니다.
    pub fn insert(&mut self, key: impl Into<String>, value: WireValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 순서가 보존된 `serde_json::Value`로 변환합니다.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for WireObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
