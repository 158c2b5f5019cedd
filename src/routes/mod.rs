//! API 라우트 구성 모듈
//!
//! 모든 `/api/v1` 경로는 선택적 인증 미들웨어 아래에 있습니다. 요청 주체가
//! 필요한 핸들러는 [`AuthenticatedUser`](crate::domain::auth::AuthenticatedUser)
//! 추출자로 401을 반환합니다.
//!
//! ```text
//! /health
//! /api/v1/auth         POST /register, GET /user
//! /api/v1/users        GET, GET|PUT|DELETE /{id}, GET /{id}/posts
//! /api/v1/posts        GET, POST, GET /{slug}, PUT|DELETE /{id}, GET /{post_id}/comments
//! /api/v1/comments     POST, DELETE /{id}
//! /api/v1/categories   GET, POST, GET|DELETE /{id}, GET /{id}/posts
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::core::registry::SchemaRegistry;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .wrap(AuthMiddleware::optional())
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_post_routes)
            .configure(configure_comment_routes)
            .configure(configure_category_routes),
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::current_user),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::list_users)
            .service(handlers::users::user_posts)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .service(handlers::posts::list_posts)
            .service(handlers::posts::create_post)
            .service(handlers::comments::post_comments)
            .service(handlers::posts::get_post)
            .service(handlers::posts::update_post)
            .service(handlers::posts::delete_post),
    );
}

fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .service(handlers::comments::create_comment)
            .service(handlers::comments::delete_comment),
    );
}

fn configure_category_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .service(handlers::categories::list_categories)
            .service(handlers::categories::create_category)
            .service(handlers::categories::category_posts)
            .service(handlers::categories::get_category)
            .service(handlers::categories::delete_category),
    );
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "blog_service_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "schemas": SchemaRegistry::global().entities(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "blog_service_backend");
    }

    #[actix_web::test]
    async fn test_malformed_principal_header_is_rejected() {
        let services = crate::handlers::testing::seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/posts")
            .insert_header(("X-User-Id", "abc"))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }
}
