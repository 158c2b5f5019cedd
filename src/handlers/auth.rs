//! 등록 및 현재 사용자 핸들러

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{ApiResponse, CreateUserRequest};
use crate::handlers::{requested_includes, validated};
use crate::services::users::UserService;
use crate::validation::RecordLookup;

#[post("/register")]
pub async fn register(
    payload: web::Json<Value>,
    lookup: web::Data<dyn RecordLookup>,
    users: web::Data<UserService>,
) -> AppResult<HttpResponse> {
    let request: CreateUserRequest = validated("create_user", &payload, lookup.get_ref()).await?;
    let user = users.register(request).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message("Utilizador registado com sucesso", user)))
}

#[get("/user")]
pub async fn current_user(
    req: HttpRequest,
    principal: AuthenticatedUser,
    users: web::Data<UserService>,
) -> AppResult<HttpResponse> {
    let user = users
        .current(principal, &requested_includes(&req))
        .await?
        .ok_or_else(|| AppError::NotFound("Utilizador não encontrado".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::handlers::testing::seeded_services;
    use crate::routes::configure_all_routes;

    #[actix_web::test]
    async fn test_register_returns_created_user_without_password() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "name": "Rita Costa",
                "email": "rita@example.com",
                "password": "segredo123",
                "password_confirmation": "segredo123"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Utilizador registado com sucesso");
        assert_eq!(body["data"]["email"], "rita@example.com");
        assert!(body["data"].get("password").is_none());
    }

    #[actix_web::test]
    async fn test_register_reports_field_errors() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "name": "Al",
                "email": "ana@example.com",
                "password": "segredo123",
                "password_confirmation": "outra"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 422);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"]["name"][0], "O nome deve ter no mínimo 3 caracteres");
        assert_eq!(body["errors"]["password"][0], "As passwords não coincidem");
        assert_eq!(body["errors"]["email"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_current_user_requires_principal() {
        let services = seeded_services();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/api/v1/auth/user").to_request();
        assert_eq!(test::call_service(&app, anonymous).await.status(), 401);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/user?include=posts")
            .insert_header(("X-User-Id", "1"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["name"], "Ana Silva");
        assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 2);
    }
}
