//! 게시글 핸들러
//!
//! `GET /{slug}`와 `PUT|DELETE /{id}`는 같은 경로 패턴을 메서드로 구분합니다.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::config::PaginationConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{ApiResponse, CreatePostRequest, UpdatePostRequest};
use crate::handlers::{requested_includes, validated, PageQuery};
use crate::services::posts::PostService;
use crate::validation::RecordLookup;

#[get("")]
pub async fn list_posts(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    pagination: web::Data<PaginationConfig>,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    let page = posts.list(query.resolve(&pagination), &requested_includes(&req)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

#[post("")]
pub async fn create_post(
    principal: AuthenticatedUser,
    payload: web::Json<Value>,
    lookup: web::Data<dyn RecordLookup>,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    let request: CreatePostRequest = validated("create_post", &payload, lookup.get_ref()).await?;
    let post = posts.create(principal, request).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message("Post criado com sucesso", post)))
}

#[get("/{slug}")]
pub async fn get_post(
    req: HttpRequest,
    slug: web::Path<String>,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    let post = posts
        .find_by_slug(&slug, &requested_includes(&req))
        .await?
        .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

#[put("/{id}")]
pub async fn update_post(
    id: web::Path<i64>,
    principal: AuthenticatedUser,
    payload: web::Json<Value>,
    lookup: web::Data<dyn RecordLookup>,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    let request: UpdatePostRequest = validated("update_post", &payload, lookup.get_ref()).await?;
    let post = posts
        .update(*id, principal, request)
        .await?
        .ok_or_else(|| AppError::NotFound("Post não encontrado ou não autorizado".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Post atualizado com sucesso", post)))
}

#[delete("/{id}")]
pub async fn delete_post(
    id: web::Path<i64>,
    principal: AuthenticatedUser,
    posts: web::Data<PostService>,
) -> AppResult<HttpResponse> {
    if !posts.delete(*id, principal).await? {
        return Err(AppError::NotFound("Post não encontrado ou não autorizado".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Post eliminado com sucesso")))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::handlers::testing::seeded_services;
    use crate::routes::configure_all_routes;

    #[actix_web::test]
    async fn test_list_includes_defaults_and_client_includes() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/posts?include=categories").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let first = &body["data"]["data"][0];
        assert_eq!(first["title"], "Roteiro por Lisboa");
        assert_eq!(first["author"]["name"], "João Pereira");
        assert_eq!(first["comments_count"], 1);
        assert_eq!(first["categories"][0]["name"], "Viagens");
        assert!(first.get("comments").is_none());
    }

    #[actix_web::test]
    async fn test_huge_page_number_is_an_empty_page() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/posts?page=922337203685477580&per_page=100")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["data"]["total"], 3);
        assert!(body["data"]["from"].is_null());
    }

    #[actix_web::test]
    async fn test_show_by_slug_loads_comment_authors() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/posts/introducao-ao-rust").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let post = &body["data"];
        assert_eq!(post["comments_count"], 2);
        assert_eq!(post["comments"][0]["author"]["name"], "Ana Silva");
        assert!(post["comments"][0]["author"].get("posts").is_none());
    }

    #[actix_web::test]
    async fn test_create_requires_principal_then_validates() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let anonymous = test::TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Novo post", "content": "Conteúdo suficiente" }))
            .to_request();
        assert_eq!(test::call_service(&app, anonymous).await.status(), 401);

        let invalid = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(("X-User-Id", "2"))
            .set_json(json!({ "title": "Novo", "content": "curto", "category_ids": [1, 77] }))
            .to_request();
        let resp = test::call_service(&app, invalid).await;
        assert_eq!(resp.status(), 422);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["errors"]["title"].is_array());
        assert!(body["errors"]["content"].is_array());
        assert_eq!(body["errors"]["category_ids"][0], "Categoria não encontrada");
    }

    #[actix_web::test]
    async fn test_create_then_delete_as_owner() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(("X-User-Id", "2"))
            .set_json(json!({
                "title": "Receitas do Porto",
                "content": "Francesinha e tripas à moda do Porto.",
                "category_ids": [2, 3]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["slug"], "receitas-do-porto");
        assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 2);
        let id = body["data"]["id"].as_i64().unwrap();

        let stranger = test::TestRequest::delete()
            .uri(&format!("/api/v1/posts/{}", id))
            .insert_header(("X-User-Id", "1"))
            .to_request();
        assert_eq!(test::call_service(&app, stranger).await.status(), 404);

        let owner = test::TestRequest::delete()
            .uri(&format!("/api/v1/posts/{}", id))
            .insert_header(("X-User-Id", "2"))
            .to_request();
        assert_eq!(test::call_service(&app, owner).await.status(), 200);
    }

    #[actix_web::test]
    async fn test_unknown_principal_cannot_create_post() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(("X-User-Id", "999"))
            .set_json(json!({ "title": "Post sem autor", "content": "Conteúdo suficiente para passar" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let list = test::TestRequest::get().uri("/api/v1/posts").to_request();
        let resp = test::call_service(&app, list).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 3);
    }

    #[actix_web::test]
    async fn test_wrong_json_type_is_field_error() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(("X-User-Id", "2"))
            .set_json(json!({ "title": 123456, "content": "Conteúdo suficiente para passar" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 422);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["title"][0], "O título deve ser um texto");
    }

    #[actix_web::test]
    async fn test_update_with_null_excerpt_clears_it() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let create = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(("X-User-Id", "1"))
            .set_json(json!({
                "title": "Post com resumo",
                "content": "Conteúdo suficiente para passar",
                "excerpt": "resumo curto"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, create).await;
        assert_eq!(body["data"]["excerpt"], "resumo curto");
        let id = body["data"]["id"].as_i64().unwrap();

        let rename = test::TestRequest::put()
            .uri(&format!("/api/v1/posts/{}", id))
            .insert_header(("X-User-Id", "1"))
            .set_json(json!({ "title": "Post com outro nome" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, rename).await;
        assert_eq!(body["data"]["excerpt"], "resumo curto");

        let clear = test::TestRequest::put()
            .uri(&format!("/api/v1/posts/{}", id))
            .insert_header(("X-User-Id", "1"))
            .set_json(json!({ "excerpt": null }))
            .to_request();
        let resp = test::call_service(&app, clear).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["data"]["excerpt"].is_null());
        assert_eq!(body["data"]["title"], "Post com outro nome");
    }
}
