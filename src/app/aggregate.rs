//! 关联聚合：按 product_id 把评论、图片挂到商品上
//!
//! 没有子记录的商品不设置关联字段（None，而不是空列表）；
//! 找不到父商品的子记录直接忽略。

use std::collections::HashMap;

use crate::app::comments::model::Comment;
use crate::app::mapping::{map_comment, map_image};
use crate::app::products::model::{Product, ProductImage};
use crate::infrastructure::executor::Row;

/// 一次遍历完成分组，组内保持行的原始顺序
fn group_by_product<T>(
    rows: &[Row],
    map: impl Fn(&Row) -> T,
    product_id: impl Fn(&T) -> &str,
) -> HashMap<String, Vec<T>> {
    let mut groups: HashMap<String, Vec<T>> = HashMap::new();
    for row in rows {
        let child = map(row);
        let key = product_id(&child).to_string();
        groups.entry(key).or_default().push(child);
    }
    groups
}

pub fn attach_comments(products: Vec<Product>, comment_rows: &[Row]) -> Vec<Product> {
    let by_product =
        group_by_product(comment_rows, map_comment, |c: &Comment| c.product_id.as_str());

    products
        .into_iter()
        .map(|product| match by_product.get(&product.id) {
            Some(comments) => Product {
                comments: Some(comments.clone()),
                ..product
            },
            None => product,
        })
        .collect()
}

pub fn attach_images(products: Vec<Product>, image_rows: &[Row]) -> Vec<Product> {
    let by_product =
        group_by_product(image_rows, map_image, |i: &ProductImage| i.product_id.as_str());

    products
        .into_iter()
        .map(|product| match by_product.get(&product.id) {
            Some(images) => Product {
                thumbnail: select_thumbnail(images),
                images: Some(images.clone()),
                ..product
            },
            None => product,
        })
        .collect()
}

/// 第一张 main 图片，没有则取第一张
pub fn select_thumbnail(images: &[ProductImage]) -> Option<ProductImage> {
    images
        .iter()
        .find(|image| image.main)
        .or_else(|| images.first())
        .cloned()
}

pub fn assemble(products: Vec<Product>, comment_rows: &[Row], image_rows: &[Row]) -> Vec<Product> {
    attach_images(attach_comments(products, comment_rows), image_rows)
}
