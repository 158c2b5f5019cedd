//! 카테고리 비즈니스 로직 서비스

use chrono::Utc;

use crate::core::errors::AppResult;
use crate::domain::dto::CreateCategoryRequest;
use crate::domain::entities::Category;
use crate::projection::{project_all, IncludeSet, Projection, Related, WireObject};
use crate::repositories::categories::CategoryRepository;
use crate::utils::string_utils::slugify;

#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
}

impl CategoryService {
    pub fn new(categories: CategoryRepository) -> Self {
        Self { categories }
    }

    /// 전체 카테고리 (`posts_count` 포함)
    pub async fn all(&self, includes: &IncludeSet) -> AppResult<Vec<WireObject>> {
        let categories = self.categories.all().await?;
        project_all(&categories, &IncludeSet::from("posts_count").union(includes))
    }

    /// 카테고리 상세 (`posts`, `posts_count` 포함)
    pub async fn find(&self, id: i64, includes: &IncludeSet) -> AppResult<Option<WireObject>> {
        let Some(category) = self.categories.find_by_id(id).await? else {
            return Ok(None);
        };
        let includes = IncludeSet::from(["posts", "posts_count"]).union(includes);
        Ok(Some(Projection::of(&category).include(&includes).to_wire()?))
    }

    /// 이름 중복은 `create_category` 규칙이 이미 확인했습니다.
    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<WireObject> {
        let now = Utc::now().naive_utc();
        let name = request.name.trim().to_string();
        let slug = self.unique_slug(&name).await?;

        let category = self
            .categories
            .create(Category {
                id: 0,
                name,
                slug,
                created_at: now,
                updated_at: now,
                posts: Related::Unbound,
                posts_count: Related::Unbound,
            })
            .await?;

        Projection::of(&category).to_wire()
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        self.categories.delete(id).await
    }

    async fn unique_slug(&self, name: &str) -> AppResult<String> {
        let base = match slugify(name) {
            slug if slug.is_empty() => "category".to_string(),
            slug => slug,
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.categories.slug_taken(&candidate).await? {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        Ok(candidate)
    }
}
