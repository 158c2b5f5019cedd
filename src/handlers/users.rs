//! 사용자 핸들러

use actix_web::{delete, get, put, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::config::PaginationConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{ApiResponse, UpdateUserRequest};
use crate::handlers::{requested_includes, validated, PageQuery};
use crate::services::posts::PostService;
use crate::services::users::UserService;
use crate::validation::RecordLookup;

#[get("")]
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    pagination: web::Data<PaginationConfig>,
    users: web::Data<UserService>,
) -> AppResult<HttpResponse> {
    let page = users.list(query.resolve(&pagination), &requested_includes(&req)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

#[get("/{id}")]
pub async fn get_user(
    req: HttpRequest,
    id: web::Path<i64>,
    users: web::Data<UserService>,
) -> AppResult<HttpResponse> {
    let user = users
        .find(*id, &requested_includes(&req))
        .await?
        .ok_or_else(|| AppError::NotFound("Utilizador não encontrado".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

#[put("/{id}")]
pub async fn update_user(
    id: web::Path<i64>,
    principal: AuthenticatedUser,
    payload: web::Json<Value>,
    lookup: web::Data<dyn RecordLookup>,
    users: web::Data<UserService>,
) -> AppResult<HttpResponse> {
    let request: UpdateUserRequest = validated("update_user", &payload, lookup.get_ref()).await?;
    let user = users
        .update(*id, principal, request)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilizador não encontrado ou não autorizado".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Utilizador atualizado com sucesso", user)))
}

#[delete("/{id}")]
pub async fn delete_user(
    id: web::Path<i64>,
    principal: AuthenticatedUser,
    users: web::Data<UserService>,
) -> AppResult<HttpResponse> {
    if !users.delete(*id, principal).await? {
        return Err(AppError::NotFound("Utilizador não encontrado ou não autorizado".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Utilizador eliminado com sucesso")))
}

#[get("/{id}/posts")]
pub async fn user_posts(
    req: HttpRequest,
    id: web::Path<i64>,
    query: web::Query<PageQuery>,
    pagination: web::Data<PaginationConfig>,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    let page = posts
        .by_user(*id, query.resolve(&pagination), &requested_includes(&req))
        .await?
        .ok_or_else(|| AppError::NotFound("Utilizador não encontrado".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::handlers::testing::seeded_services;
    use crate::routes::configure_all_routes;

    #[actix_web::test]
    async fn test_list_users_is_paginated() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/users?per_page=1&page=2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let page = &body["data"];
        assert_eq!(page["total"], 2);
        assert_eq!(page["per_page"], 1);
        assert_eq!(page["current_page"], 2);
        assert_eq!(page["last_page"], 2);
        assert_eq!(page["from"], 2);
        assert_eq!(page["to"], 2);
        assert_eq!(page["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_user_is_404() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/users/99").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Utilizador não encontrado");
    }

    #[actix_web::test]
    async fn test_update_of_another_user_is_404() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/v1/users/1")
            .insert_header(("X-User-Id", "2"))
            .set_json(json!({ "name": "Outro Nome" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_partial_update_keeps_other_fields() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/v1/users/1")
            .insert_header(("X-User-Id", "1"))
            .set_json(json!({ "name": "Ana Maria Silva" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["name"], "Ana Maria Silva");
        assert_eq!(body["data"]["email"], "ana@example.com");
    }

    #[actix_web::test]
    async fn test_user_posts_for_unknown_user_is_404() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/users/42/posts").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::get().uri("/api/v1/users/2/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["data"][0]["author"]["name"], "João Pereira");
    }
}
