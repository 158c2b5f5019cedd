//! 사용자 등록 요청
//!
//! 입력 디스크립터 `create_user`와, 검증을 통과한 페이로드를 담는
//! [`CreateUserRequest`]를 정의합니다.

use serde::Deserialize;

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::projection::{EntityDescriptor, FieldDescriptor};
use crate::validation::{Rule, RuleKind};

/// 검증된 사용자 등록 요청
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `create_user` 입력 디스크립터
///
/// `password`는 같은 값의 `password_confirmation`을 요구합니다.
pub fn create_user_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("create_user")
        .field(FieldDescriptor::scalar("name").rules([Rule::Required, Rule::String, Rule::Min(3)]))
        .field(FieldDescriptor::scalar("email").rules([
            Rule::Required,
            Rule::String,
            Rule::Email,
            Rule::unique("users", "email"),
        ]))
        .field(FieldDescriptor::scalar("password").rules([
            Rule::Required,
            Rule::String,
            Rule::Min(8),
            Rule::Confirmed,
        ]))
        .message("name", RuleKind::Required, "O nome é obrigatório")
        .message("name", RuleKind::String, "O nome deve ser um texto")
        .message("email", RuleKind::String, "O email deve ser válido")
        .message("password", RuleKind::String, "A password deve ser um texto")
        .message("name", RuleKind::Min, "O nome deve ter no mínimo :min caracteres")
        .message("email", RuleKind::Required, "O email é obrigatório")
        .message("email", RuleKind::Email, "O email deve ser válido")
        .message("email", RuleKind::Unique, "Este email já está registado")
        .message("password", RuleKind::Required, "A password é obrigatória")
        .message("password", RuleKind::Min, "A password deve ter no mínimo :min caracteres")
        .message("password", RuleKind::Confirmed, "As passwords não coincidem")
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "create_user", build: create_user_descriptor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RecordLookup, RuleSet, ValidationResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct TakenEmails(Vec<&'static str>);

    #[async_trait]
    impl RecordLookup for TakenEmails {
        async fn exists(&self, _table: &str, _column: &str, value: &Value) -> AppResult<bool> {
            Ok(value.as_str().is_some_and(|v| self.0.contains(&v)))
        }
    }

    fn rules() -> RuleSet {
        RuleSet::compile(&create_user_descriptor().unwrap())
    }

    #[actix_web::test]
    async fn test_password_confirmation_mismatch_uses_override() {
        let payload = json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret123",
            "password_confirmation": "secret124"
        });

        let result = rules().validate(&payload, &TakenEmails(vec![])).await.unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first("password"), Some("As passwords não coincidem"));
    }

    #[actix_web::test]
    async fn test_min_placeholder_is_rendered_in_override() {
        let payload = json!({
            "name": "Al",
            "email": "al@example.com",
            "password": "secret123",
            "password_confirmation": "secret123"
        });

        let result = rules().validate(&payload, &TakenEmails(vec![])).await.unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.first("name"), Some("O nome deve ter no mínimo 3 caracteres"));
    }

    #[actix_web::test]
    async fn test_taken_email_is_rejected() {
        let payload = json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret123",
            "password_confirmation": "secret123"
        });

        let result = rules()
            .validate(&payload, &TakenEmails(vec!["ana@example.com"]))
            .await
            .unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.first("email"), Some("Este email já está registado"));
    }

    #[actix_web::test]
    async fn test_valid_payload_becomes_typed_request() {
        let payload = json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret123",
            "password_confirmation": "secret123"
        });

        let validated = rules()
            .validate(&payload, &TakenEmails(vec![]))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        let request: CreateUserRequest = validated.into_typed().unwrap();

        assert_eq!(request.name, "Ana");
        assert_eq!(request.password, "secret123");
    }
}
