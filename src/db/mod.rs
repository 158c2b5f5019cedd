//! In-Memory Storage Module
//!
//! 블로그 도메인의 저장소 협력자입니다. 테이블은 하나의 `RwLock` 뒤에 있고,
//! 모든 읽기/쓰기는 [`Database::read`] / [`Database::write`]를 거치며
//! 쿼리 카운터를 증가시킵니다. 카운터는 eager/lazy 로딩이 실제로 몇 번의
//! 조회를 일으키는지 확인하는 데 쓰입니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::db::Database;
//!
//! let database = Arc::new(Database::new());
//! let seeded = database.seed_demo(&password_hash)?;
//! let user = database.read(|t| t.user(1))?;
//! ```
//!
//! 저장된 레코드는 관계가 바인딩되지 않은 상태입니다. 리포지토리는
//! [`hydrate`]의 함수로 지연 로더를 붙인 사본을 돌려줍니다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use log::info;
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::validation::RecordLookup;

pub mod hydrate;
pub mod seed;
pub mod tables;

pub use tables::Tables;

/// 메모리 데이터베이스
#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<Tables>,
    queries: AtomicU64,
}

impl Database {
    /// 빈 데이터베이스를 생성합니다.
    pub fn new() -> Self {
        info!("🗄️  In-memory database initialized");
        Self::default()
    }

    /// 읽기 쿼리 하나를 실행합니다.
    pub fn read<T, F>(&self, query: F) -> AppResult<T>
    where
        F: FnOnce(&Tables) -> T,
    {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let tables = self
            .tables
            .read()
            .map_err(|e| AppError::DatabaseError(format!("tables lock poisoned: {}", e)))?;
        Ok(query(&tables))
    }

    /// 쓰기 쿼리 하나를 실행합니다.
    pub fn write<T, F>(&self, query: F) -> AppResult<T>
    where
        F: FnOnce(&mut Tables) -> AppResult<T>,
    {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let mut tables = self
            .tables
            .write()
            .map_err(|e| AppError::DatabaseError(format!("tables lock poisoned: {}", e)))?;
        query(&mut tables)
    }

    /// 지금까지 실행된 쿼리 수
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RecordLookup for Database {
    async fn exists(&self, table: &str, column: &str, value: &Value) -> AppResult<bool> {
        self.read(|t| t.contains(table, column, value))?
    }
}
