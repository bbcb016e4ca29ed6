//! 核心响应处理模块

use serde::Serialize;

/// 创建资源后的响应
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
    pub timestamp: String,
}

impl CreatedResponse {
    pub fn new(kind: &str, id: String) -> Self {
        Self {
            message: format!("{} id:{} has been added!", kind, id),
            id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(database_connected: bool) -> Self {
        Self {
            status: "healthy",
            database: if database_connected {
                "connected"
            } else {
                "unavailable"
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
