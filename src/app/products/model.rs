//! 商品数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::comments::model::Comment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub url: String,
    pub main: bool,
}

/// 搜索参数，全部可选
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Field 'price' must not be negative"))]
    pub price: Option<f64>,
    #[validate(nested)]
    pub images: Option<Vec<ImagePayload>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImagePayload {
    #[validate(length(min = 1, message = "Field 'url' is absent"))]
    pub url: String,
    #[serde(default)]
    pub main: bool,
}
