//! 行映射：数据库行（snake_case，可为空）转换为领域对象
//!
//! 所有映射都是全函数，缺失或无法解析的字段取默认值，不会失败。

use serde_json::Value;

use crate::app::comments::model::Comment;
use crate::app::products::model::{Product, ProductImage};
use crate::infrastructure::executor::Row;

fn text(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or_empty(row: &Row, key: &str) -> String {
    text(row, key).unwrap_or_default()
}

/// 数字或数字字符串，其余情况为 0
fn number_or_zero(row: &Row, key: &str) -> f64 {
    let parsed = match row.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn flag(row: &Row, key: &str) -> bool {
    match row.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            !(s.is_empty()
                || s == "0"
                || s.eq_ignore_ascii_case("false")
                || s.eq_ignore_ascii_case("f"))
        }
        _ => false,
    }
}

pub fn map_comment(row: &Row) -> Comment {
    Comment {
        id: text_or_empty(row, "comment_id"),
        name: text_or_empty(row, "name"),
        email: text_or_empty(row, "email"),
        body: text_or_empty(row, "body"),
        product_id: text_or_empty(row, "product_id"),
    }
}

pub fn map_comments(rows: &[Row]) -> Vec<Comment> {
    rows.iter().map(map_comment).collect()
}

/// 关联字段（comments/images/thumbnail）即使出现在行里也会被丢弃
pub fn map_product(row: &Row) -> Product {
    Product {
        id: text_or_empty(row, "product_id"),
        title: text_or_empty(row, "title"),
        description: text_or_empty(row, "description"),
        price: number_or_zero(row, "price"),
        comments: None,
        images: None,
        thumbnail: None,
    }
}

pub fn map_products(rows: &[Row]) -> Vec<Product> {
    rows.iter().map(map_product).collect()
}

pub fn map_image(row: &Row) -> ProductImage {
    ProductImage {
        id: text_or_empty(row, "image_id"),
        product_id: text_or_empty(row, "product_id"),
        url: text_or_empty(row, "url"),
        main: flag(row, "main"),
    }
}

pub fn map_images(rows: &[Row]) -> Vec<ProductImage> {
    rows.iter().map(map_image).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("test row must be an object"),
        }
    }

    #[test]
    fn test_map_comment_renames_keys() {
        let comment = map_comment(&row(json!({
            "comment_id": "c1",
            "product_id": "p1",
            "name": "Ann",
            "email": "ann@example.com",
            "body": "Nice"
        })));

        assert_eq!(
            comment,
            Comment {
                id: "c1".into(),
                name: "Ann".into(),
                email: "ann@example.com".into(),
                body: "Nice".into(),
                product_id: "p1".into(),
            }
        );
    }

    #[test]
    fn test_map_product_keeps_price_precision() {
        let product = map_product(&row(json!({
            "product_id": "p1",
            "title": "Lamp",
            "description": "Desk lamp",
            "price": 19.99
        })));

        assert_eq!(product.id, "p1");
        assert_eq!(product.price, 19.99);
    }

    #[test]
    fn test_map_product_defaults() {
        let product = map_product(&row(json!({
            "product_id": "p1",
            "title": null,
            "price": "not a number"
        })));

        assert_eq!(product.title, "");
        assert_eq!(product.description, "");
        assert_eq!(product.price, 0.0);

        let product = map_product(&row(json!({ "product_id": "p2" })));
        assert_eq!(product.price, 0.0);
    }

    #[test]
    fn test_map_product_parses_numeric_string() {
        let product = map_product(&row(json!({ "product_id": "p1", "price": "42.50" })));
        assert_eq!(product.price, 42.5);
    }

    #[test]
    fn test_map_product_drops_nested_fields() {
        let product = map_product(&row(json!({
            "product_id": "p1",
            "comments": [{ "comment_id": "c1" }],
            "images": [],
            "thumbnail": { "image_id": "i1" }
        })));

        assert!(product.comments.is_none());
        assert!(product.images.is_none());
        assert!(product.thumbnail.is_none());
    }

    #[test]
    fn test_map_image_main_flag() {
        let numeric = map_image(&row(json!({
            "image_id": "i1",
            "product_id": "p1",
            "url": "https://cdn/1.png",
            "main": 1
        })));
        assert_eq!(numeric.id, "i1");
        assert_eq!(numeric.product_id, "p1");
        assert!(numeric.main);

        assert!(!map_image(&row(json!({ "image_id": "i2", "main": 0 }))).main);
        assert!(!map_image(&row(json!({ "image_id": "i3", "main": null }))).main);
        assert!(map_image(&row(json!({ "image_id": "i4", "main": true }))).main);
    }

    #[test]
    fn test_map_rows_preserves_length_and_order() {
        let rows = vec![
            row(json!({ "product_id": "p1" })),
            row(json!({ "product_id": "p2" })),
            row(json!({ "product_id": "p1" })),
        ];

        let ids: Vec<String> = map_products(&rows).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p2", "p1"]);
    }
}
