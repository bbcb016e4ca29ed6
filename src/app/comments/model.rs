//! 评论数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub email: String,
    pub body: String,
    pub product_id: String,
}

/// 创建或更新评论的请求体，所有字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
    pub product_id: Option<String>,
    /// 其余未识别的键
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentPayload {
    /// 请求体里一个键都没有；只带未知键的不算空
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.body.is_none()
            && self.product_id.is_none()
            && self.extra.is_empty()
    }

    /// 用请求体中出现的字段覆盖已有评论
    pub fn merge_into(self, existing: Comment) -> Comment {
        Comment {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            email: self.email.unwrap_or(existing.email),
            body: self.body.unwrap_or(existing.body),
            product_id: self.product_id.unwrap_or(existing.product_id),
        }
    }
}
