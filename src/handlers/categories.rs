//! 카테고리 핸들러

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::config::PaginationConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{ApiResponse, CreateCategoryRequest};
use crate::handlers::{requested_includes, validated, PageQuery};
use crate::services::categories::CategoryService;
use crate::services::posts::PostService;
use crate::validation::RecordLookup;

#[get("")]
pub async fn list_categories(req: HttpRequest, categories: web::Data<CategoryService>) -> AppResult<HttpResponse> {
    let all = categories.all(&requested_includes(&req)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(all)))
}

#[post("")]
pub async fn create_category(
    _principal: AuthenticatedUser,
    payload: web::Json<Value>,
    lookup: web::Data<dyn RecordLookup>,
    categories: web::Data<CategoryService>,
) -> AppResult<HttpResponse> {
    let request: CreateCategoryRequest = validated("create_category", &payload, lookup.get_ref()).await?;
    let category = categories.create(request).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message("Categoria criada com sucesso", category)))
}

#[get("/{id}")]
pub async fn get_category(
    req: HttpRequest,
    id: web::Path<i64>,
    categories: web::Data<CategoryService>,
) -> AppResult<HttpResponse> {
    let category = categories
        .find(*id, &requested_includes(&req))
        .await?
        .ok_or_else(|| AppError::NotFound("Categoria não encontrada".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

#[delete("/{id}")]
pub async fn delete_category(
    id: web::Path<i64>,
    _principal: AuthenticatedUser,
    categories: web::Data<CategoryService>,
) -> AppResult<HttpResponse> {
    if !categories.delete(*id).await? {
        return Err(AppError::NotFound("Categoria não encontrada".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Categoria eliminada com sucesso")))
}

#[get("/{id}/posts")]
pub async fn category_posts(
    req: HttpRequest,
    id: web::Path<i64>,
    query: web::Query<PageQuery>,
    pagination: web::Data<PaginationConfig>,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    let page = posts
        .by_category(*id, query.resolve(&pagination), &requested_includes(&req))
        .await?
        .ok_or_else(|| AppError::NotFound("Categoria não encontrada".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}
