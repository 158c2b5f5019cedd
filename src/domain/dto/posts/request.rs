//! 게시글 생성/수정 요청

use serde::Deserialize;

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::projection::{EntityDescriptor, FieldDescriptor};
use crate::utils::string_utils::{deserialize_nullable_string, deserialize_optional_string};
use crate::validation::{Rule, RuleKind};

/// 검증된 게시글 생성 요청
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category_ids: Option<Vec<i64>>,
}

/// 검증된 게시글 부분 업데이트 요청
///
/// `excerpt`는 생략(`None`)과 명시적 null(`Some(None)`, 비우기)을 구분합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub excerpt: Option<Option<String>>,
    #[serde(default)]
    pub category_ids: Option<Vec<i64>>,
}

pub fn create_post_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("create_post")
        .field(FieldDescriptor::scalar("title").rules([Rule::Required, Rule::String, Rule::Min(5)]))
        .field(FieldDescriptor::scalar("content").rules([Rule::Required, Rule::String, Rule::Min(10)]))
        .field(FieldDescriptor::scalar("excerpt").optional().nullable().rules([Rule::String]))
        .field(
            FieldDescriptor::scalar("category_ids")
                .optional()
                .rules([Rule::Array, Rule::exists("categories", "id")]),
        )
        .message("title", RuleKind::Required, "O título é obrigatório")
        .message("title", RuleKind::String, "O título deve ser um texto")
        .message("content", RuleKind::String, "O conteúdo deve ser um texto")
        .message("excerpt", RuleKind::String, "O resumo deve ser um texto")
        .message("category_ids", RuleKind::Array, "As categorias devem ser uma lista")
        .message("title", RuleKind::Min, "O título deve ter no mínimo :min caracteres")
        .message("content", RuleKind::Required, "O conteúdo é obrigatório")
        .message("content", RuleKind::Min, "O conteúdo deve ter no mínimo :min caracteres")
        .message("category_ids", RuleKind::Exists, "Categoria não encontrada")
        .build()
}

pub fn update_post_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("update_post")
        .field(FieldDescriptor::scalar("title").optional().rules([Rule::String, Rule::Min(5)]))
        .field(FieldDescriptor::scalar("content").optional().rules([Rule::String, Rule::Min(10)]))
        .field(FieldDescriptor::scalar("excerpt").optional().nullable().rules([Rule::String]))
        .field(
            FieldDescriptor::scalar("category_ids")
                .optional()
                .rules([Rule::Array, Rule::exists("categories", "id")]),
        )
        .message("title", RuleKind::String, "O título deve ser um texto")
        .message("content", RuleKind::String, "O conteúdo deve ser um texto")
        .message("excerpt", RuleKind::String, "O resumo deve ser um texto")
        .message("category_ids", RuleKind::Array, "As categorias devem ser uma lista")
        .message("title", RuleKind::Min, "O título deve ter no mínimo :min caracteres")
        .message("content", RuleKind::Min, "O conteúdo deve ter no mínimo :min caracteres")
        .message("category_ids", RuleKind::Exists, "Categoria não encontrada")
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "create_post", build: create_post_descriptor }
}

inventory::submit! {
    DescriptorRegistration { entity: "update_post", build: update_post_descriptor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RecordLookup, RuleSet, ValidationResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// 카테고리 1, 2만 존재하는 저장소
    struct Categories;

    #[async_trait]
    impl RecordLookup for Categories {
        async fn exists(&self, _table: &str, _column: &str, value: &Value) -> AppResult<bool> {
            Ok(matches!(value.as_i64(), Some(1) | Some(2)))
        }
    }

    #[actix_web::test]
    async fn test_every_category_id_must_exist() {
        let rules = RuleSet::compile(&create_post_descriptor().unwrap());
        let payload = json!({
            "title": "Rust em produção",
            "content": "Um texto suficientemente longo.",
            "category_ids": [1, 9]
        });

        let result = rules.validate(&payload, &Categories).await.unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.first("category_ids"), Some("Categoria não encontrada"));
    }

    #[actix_web::test]
    async fn test_blank_excerpt_becomes_none() {
        let rules = RuleSet::compile(&create_post_descriptor().unwrap());
        let payload = json!({
            "title": "Rust em produção",
            "content": "Um texto suficientemente longo.",
            "excerpt": "   ",
            "category_ids": [2]
        });

        let request: CreatePostRequest = rules
            .validate(&payload, &Categories)
            .await
            .unwrap()
            .into_result()
            .unwrap()
            .into_typed()
            .unwrap();

        assert_eq!(request.excerpt, None);
        assert_eq!(request.category_ids, Some(vec![2]));
    }

    #[actix_web::test]
    async fn test_empty_update_is_valid_and_changes_nothing() {
        let rules = RuleSet::compile(&update_post_descriptor().unwrap());

        let validated = rules
            .validate(&json!({}), &Categories)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        assert!(validated.changes().is_empty());
    }

    #[actix_web::test]
    async fn test_update_distinguishes_null_excerpt_from_absent() {
        let rules = RuleSet::compile(&update_post_descriptor().unwrap());

        let cleared: UpdatePostRequest = rules
            .validate(&json!({"excerpt": null}), &Categories)
            .await
            .unwrap()
            .into_result()
            .unwrap()
            .into_typed()
            .unwrap();
        let untouched: UpdatePostRequest = rules
            .validate(&json!({"title": "Outro título"}), &Categories)
            .await
            .unwrap()
            .into_result()
            .unwrap()
            .into_typed()
            .unwrap();

        assert_eq!(cleared.excerpt, Some(None));
        assert_eq!(untouched.excerpt, None);
    }

    #[actix_web::test]
    async fn test_wrong_json_types_are_field_errors() {
        let rules = RuleSet::compile(&create_post_descriptor().unwrap());
        let payload = json!({
            "title": 123456,
            "content": "Um texto suficientemente longo.",
            "excerpt": 42,
            "category_ids": 1
        });

        let result = rules.validate(&payload, &Categories).await.unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.first("title"), Some("O título deve ser um texto"));
        assert_eq!(errors.first("excerpt"), Some("O resumo deve ser um texto"));
        assert_eq!(errors.first("category_ids"), Some("As categorias devem ser uma lista"));
    }
}
