//! 商品业务服务

use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use super::filter::build_filter_query;
use super::model::{Product, ProductCreatePayload, SearchFilter};
use crate::app::aggregate::assemble;
use crate::app::mapping::map_products;
use crate::core::error::CoreError;
use crate::infrastructure::executor::{QueryExecutor, Row, SqlParam};
use crate::infrastructure::id::IdGenerator;

const SELECT_PRODUCTS: &str = "SELECT * FROM products";
const SELECT_COMMENTS: &str = "SELECT * FROM comments";
const SELECT_IMAGES: &str = "SELECT * FROM images";
const SELECT_PRODUCT_BY_ID: &str = "SELECT * FROM products WHERE product_id = $1";
const SELECT_COMMENTS_BY_PRODUCT: &str = "SELECT * FROM comments WHERE product_id = $1";
const SELECT_IMAGES_BY_PRODUCT: &str = "SELECT * FROM images WHERE product_id = $1";
const INSERT_PRODUCT: &str =
    "INSERT INTO products (product_id, title, description, price) VALUES ($1, $2, $3, $4)";
const INSERT_IMAGE: &str =
    "INSERT INTO images (image_id, url, product_id, main) VALUES ($1, $2, $3, $4)";
const DELETE_IMAGES_BY_PRODUCT: &str = "DELETE FROM images WHERE product_id = $1";
const DELETE_COMMENTS_BY_PRODUCT: &str = "DELETE FROM comments WHERE product_id = $1";
const DELETE_PRODUCT: &str = "DELETE FROM products WHERE product_id = $1";

#[derive(Clone)]
pub struct ProductService {
    executor: Arc<dyn QueryExecutor>,
    ids: Arc<dyn IdGenerator>,
}

impl ProductService {
    pub fn new(executor: Arc<dyn QueryExecutor>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { executor, ids }
    }

    pub async fn list(&self) -> Result<Vec<Product>, CoreError> {
        let rows = self.executor.fetch(SELECT_PRODUCTS, &[]).await?;
        self.with_associations(&rows).await
    }

    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Product>, CoreError> {
        let query = build_filter_query(filter);
        debug!(sql = %query.sql, "Searching products");

        let rows = self.executor.fetch(&query.sql, &query.params).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        self.with_associations(&rows).await
    }

    pub async fn get(&self, id: &str) -> Result<Product, CoreError> {
        let by_id = [SqlParam::from(id)];

        let rows = self.executor.fetch(SELECT_PRODUCT_BY_ID, &by_id).await?;
        if rows.is_empty() {
            return Err(not_found(id));
        }

        let comment_rows = self
            .executor
            .fetch(SELECT_COMMENTS_BY_PRODUCT, &by_id)
            .await?;
        let image_rows = self
            .executor
            .fetch(SELECT_IMAGES_BY_PRODUCT, &by_id)
            .await?;

        assemble(map_products(&rows[..1]), &comment_rows, &image_rows)
            .into_iter()
            .next()
            .ok_or_else(|| not_found(id))
    }

    /// 插入商品及其图片，返回新商品的 id
    pub async fn create(&self, payload: ProductCreatePayload) -> Result<String, CoreError> {
        payload.validate()?;

        let product_id = self.ids.next_id();
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        self.executor
            .execute(
                INSERT_PRODUCT,
                &[
                    SqlParam::from(product_id.as_str()),
                    SqlParam::from(non_empty(payload.title)),
                    SqlParam::from(non_empty(payload.description)),
                    SqlParam::from(payload.price),
                ],
            )
            .await?;

        for image in payload.images.unwrap_or_default() {
            self.executor
                .execute(
                    INSERT_IMAGE,
                    &[
                        SqlParam::from(self.ids.next_id()),
                        SqlParam::from(image.url),
                        SqlParam::from(product_id.as_str()),
                        SqlParam::from(image.main),
                    ],
                )
                .await?;
        }

        info!("Created product: {}", product_id);
        Ok(product_id)
    }

    /// 先删图片和评论，再删商品；中途失败不会回滚已删除的数据
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let by_id = [SqlParam::from(id)];

        let rows = self.executor.fetch(SELECT_PRODUCT_BY_ID, &by_id).await?;
        if rows.is_empty() {
            return Err(not_found(id));
        }

        for statement in [DELETE_IMAGES_BY_PRODUCT, DELETE_COMMENTS_BY_PRODUCT, DELETE_PRODUCT] {
            self.executor.execute(statement, &by_id).await?;
        }

        info!("Deleted product: {}", id);
        Ok(())
    }

    async fn with_associations(&self, product_rows: &[Row]) -> Result<Vec<Product>, CoreError> {
        let comment_rows = self.executor.fetch(SELECT_COMMENTS, &[]).await?;
        let image_rows = self.executor.fetch(SELECT_IMAGES, &[]).await?;

        Ok(assemble(map_products(product_rows), &comment_rows, &image_rows))
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound(format!("Product with id {} is not found", id))
}
