//! 댓글 생성 요청

use serde::Deserialize;

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::projection::{EntityDescriptor, FieldDescriptor};
use crate::validation::{Rule, RuleKind};

/// 검증된 댓글 생성 요청
///
/// 페이로드의 `postId`는 source 이름 `post_id`로 전달됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: i64,
}

pub fn create_comment_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("create_comment")
        .field(FieldDescriptor::scalar("content").rules([Rule::Required, Rule::String, Rule::Min(5)]))
        .field(
            FieldDescriptor::scalar("postId")
                .source("post_id")
                .rules([Rule::Required, Rule::Integer, Rule::exists("posts", "id")]),
        )
        .message("content", RuleKind::Required, "O comentário é obrigatório")
        .message("content", RuleKind::Min, "O comentário deve ter no mínimo :min caracteres")
        .message("content", RuleKind::String, "O comentário deve ser um texto")
        .message("postId", RuleKind::Required, "O post é obrigatório")
        .message("postId", RuleKind::Integer, "O post deve ser um identificador numérico")
        .message("postId", RuleKind::Exists, "Post não encontrado")
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "create_comment", build: create_comment_descriptor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RecordLookup, RuleSet, ValidationResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct OnlyPost(i64);

    #[async_trait]
    impl RecordLookup for OnlyPost {
        async fn exists(&self, table: &str, column: &str, value: &Value) -> AppResult<bool> {
            Ok(table == "posts" && column == "id" && value.as_i64() == Some(self.0))
        }
    }

    #[actix_web::test]
    async fn test_short_content_reports_only_the_first_failure() {
        let rules = RuleSet::compile(&create_comment_descriptor().unwrap());

        let result = rules
            .validate(&json!({ "content": "ok", "postId": 7 }), &OnlyPost(7))
            .await
            .unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.get("content").unwrap(), ["O comentário deve ter no mínimo 5 caracteres"]);
        assert!(errors.get("postId").is_none());
    }

    #[actix_web::test]
    async fn test_unknown_post_uses_override() {
        let rules = RuleSet::compile(&create_comment_descriptor().unwrap());

        let result = rules
            .validate(&json!({ "content": "Ótimo artigo!", "postId": 8 }), &OnlyPost(7))
            .await
            .unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.first("postId"), Some("Post não encontrado"));
    }

    #[actix_web::test]
    async fn test_post_id_is_translated_to_source_name() {
        let rules = RuleSet::compile(&create_comment_descriptor().unwrap());

        let request: CreateCommentRequest = rules
            .validate(&json!({ "content": "Ótimo artigo!", "postId": 7 }), &OnlyPost(7))
            .await
            .unwrap()
            .into_result()
            .unwrap()
            .into_typed()
            .unwrap();

        assert_eq!(request.post_id, 7);
    }

    #[actix_web::test]
    async fn test_string_post_id_is_rejected_before_lookup() {
        let rules = RuleSet::compile(&create_comment_descriptor().unwrap());

        let result = rules
            .validate(&json!({ "content": "Ótimo artigo!", "postId": "7" }), &OnlyPost(7))
            .await
            .unwrap();

        let ValidationResult::Invalid(errors) = result else {
            panic!("expected invalid payload");
        };
        assert_eq!(errors.first("postId"), Some("O post deve ser um identificador numérico"));
    }
}
