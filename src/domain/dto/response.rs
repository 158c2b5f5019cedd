//! 공통 응답 봉투

use serde::Serialize;

/// 성공 응답 봉투
///
/// ```json
/// { "success": true, "message": "Post criado com sucesso", "data": { ... } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 데이터 없이 메시지만 담은 응답
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_only_response_omits_data() {
        let body = serde_json::to_value(ApiResponse::message("Comentário eliminado com sucesso")).unwrap();

        assert_eq!(body, json!({ "success": true, "message": "Comentário eliminado com sucesso" }));
    }

    #[test]
    fn test_data_response_omits_message() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();

        assert_eq!(body, json!({ "success": true, "data": [1, 2] }));
    }
}
