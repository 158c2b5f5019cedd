//! 프로젝션 대상 레코드와 관계(relation) 값
//!
//! 프로젝션 엔진은 구체적인 엔티티 타입을 알지 못합니다. 대신 모든 도메인
//! 레코드가 [`Record`]를 구현하여 source 이름으로 스칼라 속성을 노출하고,
//! 관계 필드는 디스크립터에 등록된 resolver가 [`Loaded`] 값으로 돌려줍니다.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::errors::{AppError, AppResult};

/// 프로젝션 가능한 도메인 레코드
///
/// `attribute`는 source 이름에 해당하는 스칼라 값을 반환하며, 레코드에 존재하지
/// 않는 이름이면 `None`을 반환합니다. 엔진은 `None`을 조용히 `null`로 바꾸지 않고
/// `SchemaError`로 보고합니다.
pub trait Record: Any + Send + Sync {
    /// 레지스트리에서 디스크립터를 찾을 때 사용하는 엔티티 타입 식별자
    fn entity(&self) -> &'static str;

    /// source 이름으로 스칼라 속성을 조회합니다.
    fn attribute(&self, source: &str) -> Option<Value>;

    /// 타입이 지정된 resolver로 다운캐스트하기 위한 접근자
    fn as_any(&self) -> &dyn Any;
}

/// 공유 가능한 타입 소거 레코드
pub type SharedRecord = Arc<dyn Record>;

/// 평가가 끝난 필드 값
///
/// eager 필드는 즉시, lazy 필드는 강제(force)된 뒤 이 형태가 됩니다.
#[derive(Clone)]
pub enum Loaded {
    /// 스칼라 값 (캐스트 전 원시 값)
    Value(Value),
    /// 단일 관계 (없으면 `None`)
    One(Option<SharedRecord>),
    /// 컬렉션 관계 (source 순서 유지)
    Many(Vec<SharedRecord>),
}

impl Loaded {
    pub fn value(value: impl Into<Value>) -> Self {
        Loaded::Value(value.into())
    }

    pub fn one<R: Record>(record: Option<R>) -> Self {
        Loaded::One(record.map(|r| Arc::new(r) as SharedRecord))
    }

    pub fn many<R, I>(records: I) -> Self
    where
        R: Record,
        I: IntoIterator<Item = R>,
    {
        Loaded::Many(records.into_iter().map(|r| Arc::new(r) as SharedRecord).collect())
    }
}

impl fmt::Debug for Loaded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loaded::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Loaded::One(r) => f
                .debug_tuple("One")
                .field(&r.as_ref().map(|r| r.entity()))
                .finish(),
            Loaded::Many(rs) => f.debug_tuple("Many").field(&rs.len()).finish(),
        }
    }
}

/// 관계 로더 클로저
pub type RelationLoader<T> = Arc<dyn Fn() -> AppResult<T> + Send + Sync>;

/// 도메인 레코드가 들고 다니는 관계 슬롯
///
/// 저장소가 레코드를 하이드레이트할 때 관계를 미리 읽어두면(`with`) `Loaded`,
/// 필요할 때 읽도록 하면 `Deferred`가 됩니다. `Deferred`는 `load()`가 호출될
/// 때까지 아무 쿼리도 실행하지 않습니다.
pub enum Related<T> {
    /// 저장소에 바인딩되지 않은 관계
    Unbound,
    /// 미리 로드된 관계
    Loaded(T),
    /// 요청 시 로드되는 관계
    Deferred(RelationLoader<T>),
}

impl<T: Clone> Related<T> {
    pub fn deferred<F>(loader: F) -> Self
    where
        F: Fn() -> AppResult<T> + Send + Sync + 'static,
    {
        Related::Deferred(Arc::new(loader))
    }

    /// 관계 값을 반환합니다. `Deferred`이면 이 시점에 로더를 실행합니다.
    pub fn load(&self) -> AppResult<T> {
        match self {
            Related::Loaded(value) => Ok(value.clone()),
            Related::Deferred(loader) => loader(),
            Related::Unbound => Err(AppError::SchemaError(
                "relation accessed on a record that is not bound to a store".to_string(),
            )),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Related::Loaded(_))
    }

    /// 지연 관계를 지금 로드하여 `Loaded`로 바꿉니다. (eager loading)
    ///
    /// 이미 로드된 관계는 다시 읽지 않습니다.
    pub fn preload(&mut self) -> AppResult<()> {
        if let Related::Deferred(loader) = self {
            let value = loader()?;
            *self = Related::Loaded(value);
        }
        Ok(())
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Related::Unbound
    }
}

impl<T: Clone> Clone for Related<T> {
    fn clone(&self) -> Self {
        match self {
            Related::Unbound => Related::Unbound,
            Related::Loaded(value) => Related::Loaded(value.clone()),
            Related::Deferred(loader) => Related::Deferred(Arc::clone(loader)),
        }
    }
}

impl<T> fmt::Debug for Related<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Related::Unbound => f.write_str("Unbound"),
            Related::Loaded(_) => f.write_str("Loaded(..)"),
            Related::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
