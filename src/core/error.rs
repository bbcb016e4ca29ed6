//! 核心错误处理模块

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::infrastructure::executor::ExecutorError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    /// 只写日志，不返回给调用方
    #[error("persistence failure: {0}")]
    Persistence(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Something went wrong";

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, user_message) = match self {
            CoreError::Validation(msg) => ("BAD_REQUEST", msg),
            CoreError::Conflict(msg) => ("CONFLICT", msg),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg),
            CoreError::Persistence(detail) => {
                error!("Persistence error: {}", detail);
                ("INTERNAL_SERVER_ERROR", PERSISTENCE_FAILURE_MESSAGE.to_string())
            }
        };

        let error_response = ErrorResponse {
            error: error_code.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<ExecutorError> for CoreError {
    fn from(err: ExecutorError) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

/// 请求体无法解析（JSON 语法或字段类型错误）按校验错误处理
impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for CoreError {
    fn from(rejection: QueryRejection) -> Self {
        CoreError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages(&err, &mut messages);
        messages.sort();
        messages.dedup();

        if messages.is_empty() {
            messages.push("Payload is invalid".to_string());
        }

        CoreError::Validation(messages.join(", "))
    }
}

/// 嵌套结构和列表中的错误一并收集
fn collect_validation_messages(errors: &validator::ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Field '{}' is invalid", field))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_validation_messages(nested, out);
                }
            }
        }
    }
}
