//! 사용자 부분 업데이트 요청

use serde::Deserialize;

use crate::core::errors::AppResult;
use crate::core::registry::DescriptorRegistration;
use crate::projection::{EntityDescriptor, FieldDescriptor};
use crate::validation::{Rule, RuleKind};

/// 검증된 사용자 업데이트 요청. 생략된 필드는 `None`이며 변경하지 않습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

pub fn update_user_descriptor() -> AppResult<EntityDescriptor> {
    EntityDescriptor::builder("update_user")
        .field(FieldDescriptor::scalar("name").optional().rules([Rule::String, Rule::Min(3)]))
        .field(FieldDescriptor::scalar("email").optional().rules([Rule::String, Rule::Email]))
        .field(FieldDescriptor::scalar("password").optional().rules([Rule::String, Rule::Min(8)]))
        .message("name", RuleKind::String, "O nome deve ser um texto")
        .message("email", RuleKind::String, "O email deve ser válido")
        .message("password", RuleKind::String, "A password deve ser um texto")
        .message("name", RuleKind::Min, "O nome deve ter no mínimo :min caracteres")
        .message("email", RuleKind::Email, "O email deve ser válido")
        .message("password", RuleKind::Min, "A password deve ter no mínimo :min caracteres")
        .build()
}

inventory::submit! {
    DescriptorRegistration { entity: "update_user", build: update_user_descriptor }
}
