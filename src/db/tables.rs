//! 메모리 테이블과 테이블 단위 조회
//!
//! 테이블에는 관계 슬롯이 비어 있는(`Unbound`) 엔티티만 저장됩니다.
//! 관계 바인딩은 [`hydrate`](crate::db::hydrate)가 담당합니다.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Category, Comment, Post, User};

#[derive(Debug, Default)]
pub struct Tables {
    pub users: BTreeMap<i64, User>,
    pub posts: BTreeMap<i64, Post>,
    pub comments: BTreeMap<i64, Comment>,
    pub categories: BTreeMap<i64, Category>,
    /// (post_id, category_id) 피벗
    pub post_category: BTreeSet<(i64, i64)>,
    sequences: HashMap<&'static str, i64>,
}

impl Tables {
    /// 테이블의 다음 id (1부터 시작, 삭제된 id는 재사용하지 않음)
    pub fn next_id(&mut self, table: &'static str) -> i64 {
        let next = self.sequences.entry(table).or_insert(0);
        *next += 1;
        *next
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    /// 작성자의 게시글 (최근 발행 순)
    pub fn posts_by_user(&self, user_id: i64) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|p| p.user_id == user_id).cloned().collect();
        latest_published(&mut posts);
        posts
    }

    /// 카테고리에 속한 게시글 (최근 발행 순)
    pub fn posts_in_category(&self, category_id: i64) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .post_category
            .iter()
            .filter(|(_, c)| *c == category_id)
            .filter_map(|(p, _)| self.posts.get(p).cloned())
            .collect();
        latest_published(&mut posts);
        posts
    }

    pub fn posts_count(&self, category_id: i64) -> u64 {
        self.post_category.iter().filter(|(_, c)| *c == category_id).count() as u64
    }

    /// 게시글의 카테고리 (id 순)
    pub fn categories_of_post(&self, post_id: i64) -> Vec<Category> {
        self.post_category
            .range((post_id, i64::MIN)..=(post_id, i64::MAX))
            .filter_map(|(_, c)| self.categories.get(c).cloned())
            .collect()
    }

    /// 게시글의 댓글 (최신 순)
    pub fn comments_of_post(&self, post_id: i64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self.comments.values().filter(|c| c.post_id == post_id).cloned().collect();
        latest_comments(&mut comments);
        comments
    }

    pub fn comments_count(&self, post_id: i64) -> u64 {
        self.comments.values().filter(|c| c.post_id == post_id).count() as u64
    }

    /// 게시글의 카테고리를 주어진 목록으로 교체합니다.
    pub fn sync_categories(&mut self, post_id: i64, category_ids: &[i64]) {
        let rows: Vec<(i64, i64)> = category_ids
            .iter()
            .filter(|c| self.categories.contains_key(c))
            .map(|c| (post_id, *c))
            .collect();
        self.post_category.retain(|(p, _)| *p != post_id);
        self.post_category.extend(rows);
    }

    /// 게시글과 딸린 댓글, 피벗 행을 삭제합니다.
    pub fn remove_post(&mut self, post_id: i64) -> bool {
        let removed = self.posts.remove(&post_id).is_some();
        if removed {
            self.comments.retain(|_, c| c.post_id != post_id);
            self.post_category.retain(|(p, _)| *p != post_id);
        }
        removed
    }

    /// `table.column == value`인 행이 있는지 확인합니다.
    ///
    /// id 컬럼은 JSON 정수만, 나머지 컬럼은 문자열만 일치할 수 있습니다.
    pub fn contains(&self, table: &str, column: &str, value: &Value) -> AppResult<bool> {
        let found = match (table, column) {
            ("users", "id") => value.as_i64().is_some_and(|id| self.users.contains_key(&id)),
            ("posts", "id") => value.as_i64().is_some_and(|id| self.posts.contains_key(&id)),
            ("comments", "id") => value.as_i64().is_some_and(|id| self.comments.contains_key(&id)),
            ("categories", "id") => value.as_i64().is_some_and(|id| self.categories.contains_key(&id)),
            ("users", "email") => value
                .as_str()
                .is_some_and(|email| self.users.values().any(|u| u.email.eq_ignore_ascii_case(email.trim()))),
            ("posts", "slug") => value.as_str().is_some_and(|slug| self.posts.values().any(|p| p.slug == slug)),
            ("categories", "slug") => value
                .as_str()
                .is_some_and(|slug| self.categories.values().any(|c| c.slug == slug)),
            ("categories", "name") => value
                .as_str()
                .is_some_and(|name| self.categories.values().any(|c| c.name.eq_ignore_ascii_case(name.trim()))),
            _ => {
                return Err(AppError::SchemaError(format!(
                    "lookup on unknown column '{}.{}'",
                    table, column
                )))
            }
        };
        Ok(found)
    }
}

/// 발행일 내림차순, 미발행은 마지막, 같으면 id 내림차순
pub fn latest_published(posts: &mut [Post]) {
    posts.sort_by_key(|p| (p.published_at.is_none(), Reverse(p.published_at), Reverse(p.id)));
}

/// 작성일 내림차순, 같으면 id 내림차순
pub fn latest_comments(comments: &mut [Comment]) {
    comments.sort_by_key(|c| (Reverse(c.created_at), Reverse(c.id)));
}
