//! 카테고리 생성 요청

use serde::Deserialize;

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::projection::{EntityDescriptor, FieldDescriptor};
use crate::validation::{Rule, RuleKind};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

pub fn create_category_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("create_category")
        .field(FieldDescriptor::scalar("name").rules([
            Rule::Required,
            Rule::String,
            Rule::Min(3),
            Rule::unique("categories", "name"),
        ]))
        .message("name", RuleKind::Required, "O nome é obrigatório")
        .message("name", RuleKind::String, "O nome deve ser um texto")
        .message("name", RuleKind::Min, "O nome deve ter no mínimo :min caracteres")
        .message("name", RuleKind::Unique, "Esta categoria já existe")
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "create_category", build: create_category_descriptor }
}
