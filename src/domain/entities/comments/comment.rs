//! 댓글 엔티티

use std::any::Any;

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::domain::entities::users::user::User;
use crate::domain::entities::{timestamp, DATE_FORMAT};
use crate::projection::{EntityDescriptor, FieldDescriptor, Loaded, Record, Related};

/// 게시글 댓글
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    pub author: Related<Option<User>>,
}

impl Comment {
    pub fn detached(&self) -> Self {
        Self {
            author: Related::Unbound,
            ..self.clone()
        }
    }
}

impl Record for Comment {
    fn entity(&self) -> &'static str {
        "comment"
    }

    fn attribute(&self, source: &str) -> Option<Value> {
        match source {
            "id" => Some(json!(self.id)),
            "user_id" => Some(json!(self.user_id)),
            "post_id" => Some(json!(self.post_id)),
            "content" => Some(json!(self.content)),
            "created_at" => Some(timestamp(&self.created_at)),
            "updated_at" => Some(timestamp(&self.updated_at)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `comment` 출력 디스크립터
pub fn comment_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("comment")
        .field(FieldDescriptor::scalar("id"))
        .field(FieldDescriptor::scalar("content"))
        .field(FieldDescriptor::scalar("post_id"))
        .field(FieldDescriptor::date("created_at", DATE_FORMAT))
        .field(FieldDescriptor::date("updated_at", DATE_FORMAT))
        .field(FieldDescriptor::lazy_one::<Comment, _>("author", "user", |comment| {
            comment.author.load().map(Loaded::one)
        }))
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "comment", build: comment_descriptor }
}
