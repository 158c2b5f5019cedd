//! 게시글 엔티티

use std::any::Any;

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::domain::entities::categories::category::Category;
use crate::domain::entities::comments::comment::Comment;
use crate::domain::entities::users::user::User;
use crate::domain::entities::{optional_timestamp, timestamp, DATE_FORMAT};
use crate::projection::{EntityDescriptor, FieldDescriptor, Loaded, Record, Related};

/// 게시글
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    pub author: Related<Option<User>>,
    pub categories: Related<Vec<Category>>,
    pub comments: Related<Vec<Comment>>,
    /// 댓글 수 (`withCount`에 해당)
    pub comments_count: Related<u64>,
}

impl Post {
    pub fn detached(&self) -> Self {
        Self {
            author: Related::Unbound,
            categories: Related::Unbound,
            comments: Related::Unbound,
            comments_count: Related::Unbound,
            ..self.clone()
        }
    }
}

impl Record for Post {
    fn entity(&self) -> &'static str {
        "post"
    }

    fn attribute(&self, source: &str) -> Option<Value> {
        match source {
            "id" => Some(json!(self.id)),
            "user_id" => Some(json!(self.user_id)),
            "title" => Some(json!(self.title)),
            "slug" => Some(json!(self.slug)),
            "content" => Some(json!(self.content)),
            "excerpt" => Some(json!(self.excerpt)),
            "published_at" => Some(optional_timestamp(self.published_at.as_ref())),
            "created_at" => Some(timestamp(&self.created_at)),
            "updated_at" => Some(timestamp(&self.updated_at)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `post` 출력 디스크립터
pub fn post_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("post")
        .field(FieldDescriptor::scalar("id"))
        .field(FieldDescriptor::scalar("title"))
        .field(FieldDescriptor::scalar("slug"))
        .field(FieldDescriptor::scalar("content"))
        .field(FieldDescriptor::scalar("excerpt").nullable())
        .field(FieldDescriptor::date("published_at", DATE_FORMAT).nullable())
        .field(FieldDescriptor::date("created_at", DATE_FORMAT))
        .field(FieldDescriptor::date("updated_at", DATE_FORMAT))
        .field(FieldDescriptor::lazy_one::<Post, _>("author", "user", |post| {
            post.author.load().map(Loaded::one)
        }))
        .field(FieldDescriptor::lazy_many::<Post, _>("categories", "category", |post| {
            post.categories.load().map(Loaded::many)
        }))
        .field(FieldDescriptor::lazy_many::<Post, _>("comments", "comment", |post| {
            post.comments.load().map(Loaded::many)
        }))
        .field(FieldDescriptor::lazy_scalar::<Post, _>("comments_count", |post| {
            post.comments_count.load().map(Loaded::value)
        }))
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "post", build: post_descriptor }
}
