//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리포지토리는 [`Database`](crate::db::Database) 협력자 위에서 엔티티별 조회와
//! 쓰기를 제공합니다. 돌려주는 레코드는 모두 관계 로더가 바인딩된 상태이므로
//! 프로젝션 레이어에 그대로 넘길 수 있습니다.
//!
//! * **lazy**: 관계는 프로젝션이 요청할 때 로드됩니다.
//! * **eager (`with`)**: 목록 조회처럼 관계가 항상 필요한 경우 리포지토리가
//!   [`Related::preload`](crate::projection::Related::preload)로 미리 읽어 둡니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::posts::PostRepository;
//!
//! let posts = PostRepository::new(db.clone());
//! let page = posts.paginate(PageRequest::new(1, 15)).await?;
//! let post = posts.find_by_slug("introducao-ao-rust", &["author"]).await?;
//! ```

pub mod categories;
pub mod comments;
pub mod page;
pub mod posts;
pub mod users;

pub use page::PageRequest;
