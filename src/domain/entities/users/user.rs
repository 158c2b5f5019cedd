//! 사용자 엔티티

use std::any::Any;

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::domain::entities::posts::post::Post;
use crate::domain::entities::{optional_timestamp, timestamp, DATE_FORMAT};
use crate::projection::{EntityDescriptor, FieldDescriptor, Loaded, Record, Related};

/// 블로그 사용자
///
/// 비밀번호는 bcrypt 해시로만 보관되며 `attribute`로 노출되지 않으므로
/// 어떤 디스크립터도 투영할 수 없습니다.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verified_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    /// 작성한 게시글 (lazy)
    pub posts: Related<Vec<Post>>,
}

impl User {
    /// 저장 전 새 사용자 (id는 저장소가 부여)
    pub fn new(name: String, email: String, password_hash: String, now: NaiveDateTime) -> Self {
        Self {
            id: 0,
            name,
            email,
            password_hash,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
            posts: Related::Unbound,
        }
    }

    /// 관계 슬롯을 비운 저장용 사본
    pub fn detached(&self) -> Self {
        Self {
            posts: Related::Unbound,
            ..self.clone()
        }
    }
}

impl Record for User {
    fn entity(&self) -> &'static str {
        "user"
    }

    fn attribute(&self, source: &str) -> Option<Value> {
        match source {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            "email" => Some(json!(self.email)),
            "email_verified_at" => Some(optional_timestamp(self.email_verified_at.as_ref())),
            "created_at" => Some(timestamp(&self.created_at)),
            "updated_at" => Some(timestamp(&self.updated_at)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `user` 출력 디스크립터
pub fn user_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("user")
        .field(FieldDescriptor::scalar("id"))
        .field(FieldDescriptor::scalar("name"))
        .field(FieldDescriptor::scalar("email"))
        .field(FieldDescriptor::date("email_verified_at", DATE_FORMAT).nullable())
        .field(FieldDescriptor::date("created_at", DATE_FORMAT))
        .field(FieldDescriptor::date("updated_at", DATE_FORMAT))
        .field(FieldDescriptor::lazy_many::<User, _>("posts", "post", |user| {
            user.posts.load().map(Loaded::many)
        }))
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "user", build: user_descriptor }
}
