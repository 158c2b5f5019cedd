//! # Domain Entities
//!
//! 블로그 도메인의 핵심 엔티티들입니다. 각 엔티티는
//! [`Record`](crate::projection::Record)를 구현하여 source 이름으로 스칼라
//! 속성을 노출하고, 관계는 [`Related`](crate::projection::Related) 슬롯에
//! 담아 저장소가 바인딩합니다.
//!
//! 엔티티마다 출력 디스크립터가 같은 파일에 선언되어 `inventory`로 스키마
//! 레지스트리에 등록됩니다.
//!
//! | 엔티티 | 디스크립터 | lazy 필드 |
//! |--------|------------|-----------|
//! | [`User`] | `user` | `posts` |
//! | [`Post`] | `post` | `author`, `categories`, `comments`, `comments_count` |
//! | [`Comment`] | `comment` | `author` |
//! | [`Category`] | `category` | `posts`, `posts_count` |

use chrono::NaiveDateTime;
use serde_json::Value;

pub mod categories;
pub mod comments;
pub mod posts;
pub mod users;

pub use categories::category::Category;
pub use comments::comment::Comment;
pub use posts::post::Post;
pub use users::user::User;

/// wire 날짜 포맷
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 저장소가 내보내는 원시 타임스탬프 표현 (ISO-8601)
pub(crate) fn timestamp(value: &NaiveDateTime) -> Value {
    Value::String(value.format("%Y-%m-%dT%H:%M:%S").to_string())
}

pub(crate) fn optional_timestamp(value: Option<&NaiveDateTime>) -> Value {
    value.map(timestamp).unwrap_or(Value::Null)
}
