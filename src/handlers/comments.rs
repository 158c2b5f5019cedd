//! 댓글 핸들러

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde_json::{json, Value};

use crate::config::PaginationConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{ApiResponse, CreateCommentRequest};
use crate::handlers::{requested_includes, validated, PageQuery};
use crate::services::comments::CommentService;
use crate::validation::RecordLookup;

/// `GET /api/v1/posts/{post_id}/comments`
#[get("/{post_id}/comments")]
pub async fn post_comments(
    req: HttpRequest,
    post_id: web::Path<i64>,
    query: web::Query<PageQuery>,
    pagination: web::Data<PaginationConfig>,
    lookup: web::Data<dyn RecordLookup>,
    comments: web::Data<CommentService>,
) -> AppResult<HttpResponse> {
    if !lookup.exists("posts", "id", &json!(*post_id)).await? {
        return Err(AppError::NotFound("Post não encontrado".to_string()));
    }

    let page = comments
        .by_post(*post_id, query.resolve(&pagination), &requested_includes(&req))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

#[post("")]
pub async fn create_comment(
    principal: AuthenticatedUser,
    payload: web::Json<Value>,
    lookup: web::Data<dyn RecordLookup>,
    comments: web::Data<CommentService>,
) -> AppResult<HttpResponse> {
    let request: CreateCommentRequest = validated("create_comment", &payload, lookup.get_ref()).await?;
    let comment = comments.create(principal, request).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message("Comentário criado com sucesso", comment)))
}

#[delete("/{id}")]
pub async fn delete_comment(
    id: web::Path<i64>,
    principal: AuthenticatedUser,
    comments: web::Data<CommentService>,
) -> AppResult<HttpResponse> {
    if !comments.delete(*id, principal).await? {
        return Err(AppError::NotFound("Comentário não encontrado ou não autorizado".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Comentário eliminado com sucesso")))
}
