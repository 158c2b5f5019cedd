//! # 카테고리 리포지토리 구현

use std::sync::Arc;

use crate::core::errors::AppResult;
use crate::db::hydrate::bind_category;
use crate::db::Database;
use crate::domain::entities::Category;

#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// 전체 카테고리 (이름 순)
    pub async fn all(&self) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.db.read(|t| t.categories.values().cloned().collect())?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories.iter().map(|c| bind_category(&self.db, c)).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let category = self.db.read(|t| t.categories.get(&id).cloned())?;
        Ok(category.map(|c| bind_category(&self.db, &c)))
    }

    pub async fn slug_taken(&self, slug: &str) -> AppResult<bool> {
        self.db.read(|t| t.categories.values().any(|c| c.slug == slug))
    }

    pub async fn create(&self, category: Category) -> AppResult<Category> {
        let stored = self.db.write(|t| {
            let mut category = category.detached();
            category.id = t.next_id("categories");
            t.categories.insert(category.id, category.clone());
            Ok(category)
        })?;
        Ok(bind_category(&self.db, &stored))
    }

    /// 카테고리와 게시글 연결을 삭제합니다. 게시글은 남습니다.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.write(|t| {
            let removed = t.categories.remove(&id).is_some();
            t.post_category.retain(|(_, c)| *c != id);
            Ok(removed)
        })
    }
}
