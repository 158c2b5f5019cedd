//! 카테고리 엔티티

use std::any::Any;

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::domain::entities::posts::post::Post;
use crate::domain::entities::{timestamp, DATE_FORMAT};
use crate::projection::{EntityDescriptor, FieldDescriptor, Loaded, Record, Related};

/// 게시글 카테고리
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    pub posts: Related<Vec<Post>>,
    pub posts_count: Related<u64>,
}

impl Category {
    pub fn detached(&self) -> Self {
        Self {
            posts: Related::Unbound,
            posts_count: Related::Unbound,
            ..self.clone()
        }
    }
}

impl Record for Category {
    fn entity(&self) -> &'static str {
        "category"
    }

    fn attribute(&self, source: &str) -> Option<Value> {
        match source {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            "slug" => Some(json!(self.slug)),
            "created_at" => Some(timestamp(&self.created_at)),
            "updated_at" => Some(timestamp(&self.updated_at)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `category` 출력 디스크립터
pub fn category_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("category")
        .field(FieldDescriptor::scalar("id"))
        .field(FieldDescriptor::scalar("name"))
        .field(FieldDescriptor::scalar("slug"))
        .field(FieldDescriptor::date("created_at", DATE_FORMAT))
        .field(FieldDescriptor::date("updated_at", DATE_FORMAT))
        .field(FieldDescriptor::lazy_many::<Category, _>("posts", "post", |category| {
            category.posts.load().map(Loaded::many)
        }))
        .field(FieldDescriptor::lazy_scalar::<Category, _>("posts_count", |category| {
            category.posts_count.load().map(Loaded::value)
        }))
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "category", build: category_descriptor }
}
