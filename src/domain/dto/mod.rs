//! # Data Transfer Objects (DTO) Module
//!
//! API 경계의 입력 계약을 정의합니다. 요청마다 두 가지를 함께 둡니다.
//!
//! * **입력 디스크립터**: 필드별 검증 규칙과 포르투갈어 메시지 오버라이드.
//!   `inventory`로 스키마 레지스트리에 등록되어 검증 엔진이 컴파일합니다.
//! * **요청 구조체**: 검증을 통과한 페이로드를
//!   [`ValidatedPayload::into_typed`](crate::validation::ValidatedPayload::into_typed)로
//!   역직렬화한 결과. 부분 업데이트는 `Option<T>` 필드를 사용합니다.
//!
//! 응답은 DTO 대신 프로젝션 레이어가 만든 wire 객체를 [`ApiResponse`]로 감쌉니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── users/request/   # create_user, update_user
//! ├── posts/           # create_post, update_post
//! ├── comments/        # create_comment
//! ├── categories/      # create_category
//! └── response.rs      # ApiResponse
//! ```
//!
//! | 입력 디스크립터 | 필드 |
//! |-----------------|------|
//! | `create_user` | name (required, min 3), email (required, email, unique), password (required, min 8, confirmed) |
//! | `update_user` | name/email/password, 모두 optional |
//! | `create_comment` | content (required, min 5), postId → post_id (required, exists) |
//! | `create_post` | title (required, min 5), content (required, min 10), excerpt, category_ids (exists) |
//! | `update_post` | create_post와 같은 필드, 모두 optional |
//! | `create_category` | name (required, min 3, unique) |

pub mod categories;
pub mod comments;
pub mod posts;
pub mod response;
pub mod users;

pub use categories::CreateCategoryRequest;
pub use comments::CreateCommentRequest;
pub use posts::{CreatePostRequest, UpdatePostRequest};
pub use response::ApiResponse;
pub use users::{CreateUserRequest, UpdateUserRequest};
