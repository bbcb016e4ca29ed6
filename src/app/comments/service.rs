//! 评论业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{Comment, CommentPayload};
use super::validation::{is_comment_unique, validate_comment};
use crate::app::mapping::{map_comment, map_comments};
use crate::core::error::CoreError;
use crate::infrastructure::executor::{QueryExecutor, SqlParam};
use crate::infrastructure::id::IdGenerator;

const SELECT_COMMENTS: &str = "SELECT * FROM comments";
const SELECT_COMMENT_BY_ID: &str = "SELECT * FROM comments WHERE comment_id = $1";
const INSERT_COMMENT: &str = "INSERT INTO comments (comment_id, email, name, body, product_id) \
                              VALUES ($1, $2, $3, $4, $5)";
const UPDATE_COMMENT: &str = "UPDATE comments SET name = $1, email = $2, body = $3, product_id = $4 \
                              WHERE comment_id = $5";
const DELETE_COMMENT: &str = "DELETE FROM comments WHERE comment_id = $1";

pub const DUPLICATE_COMMENT_MESSAGE: &str = "Comment with the same fields already exists";

/// PATCH 的结果：更新了已有评论还是新建了评论
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted {
    Updated(Comment),
    Created(Comment),
}

#[derive(Clone)]
pub struct CommentService {
    executor: Arc<dyn QueryExecutor>,
    ids: Arc<dyn IdGenerator>,
}

impl CommentService {
    pub fn new(executor: Arc<dyn QueryExecutor>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { executor, ids }
    }

    pub async fn list(&self) -> Result<Vec<Comment>, CoreError> {
        let rows = self.executor.fetch(SELECT_COMMENTS, &[]).await?;
        Ok(map_comments(&rows))
    }

    async fn find(&self, id: &str) -> Result<Option<Comment>, CoreError> {
        let rows = self
            .executor
            .fetch(SELECT_COMMENT_BY_ID, &[SqlParam::from(id)])
            .await?;
        Ok(rows.first().map(map_comment))
    }

    pub async fn get(&self, id: &str) -> Result<Comment, CoreError> {
        self.find(id).await?.ok_or_else(|| not_found(id))
    }

    /// 校验、查重后插入，返回新评论的 id
    pub async fn create(&self, payload: CommentPayload) -> Result<String, CoreError> {
        validate_comment(&payload).map_err(|e| CoreError::Validation(e.to_string()))?;

        // 查重和插入之间没有事务保护
        let existing = self.list().await?;
        if !is_comment_unique(&payload, &existing) {
            return Err(CoreError::Conflict(DUPLICATE_COMMENT_MESSAGE.to_string()));
        }

        let comment = self.insert(payload).await?;
        Ok(comment.id)
    }

    /// 按 id 更新已有评论；找不到时校验后以新 id 插入（不查重）
    pub async fn upsert(&self, payload: CommentPayload) -> Result<Upserted, CoreError> {
        if let Some(id) = payload.id.as_deref() {
            if let Some(existing) = self.find(id).await? {
                let updated = payload.merge_into(existing);
                self.executor
                    .execute(
                        UPDATE_COMMENT,
                        &[
                            SqlParam::from(updated.name.as_str()),
                            SqlParam::from(updated.email.as_str()),
                            SqlParam::from(updated.body.as_str()),
                            SqlParam::from(updated.product_id.as_str()),
                            SqlParam::from(updated.id.as_str()),
                        ],
                    )
                    .await?;
                info!("Updated comment: {}", updated.id);
                return Ok(Upserted::Updated(updated));
            }
        }

        validate_comment(&payload).map_err(|e| CoreError::Validation(e.to_string()))?;
        let created = self.insert(payload).await?;
        Ok(Upserted::Created(created))
    }

    pub async fn delete(&self, id: &str) -> Result<Comment, CoreError> {
        let comment = self.get(id).await?;
        self.executor
            .execute(DELETE_COMMENT, &[SqlParam::from(id)])
            .await?;
        info!("Deleted comment: {}", id);
        Ok(comment)
    }

    async fn insert(&self, payload: CommentPayload) -> Result<Comment, CoreError> {
        let comment = Comment {
            id: self.ids.next_id(),
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            body: payload.body.unwrap_or_default(),
            product_id: payload.product_id.unwrap_or_default(),
        };

        self.executor
            .execute(
                INSERT_COMMENT,
                &[
                    SqlParam::from(comment.id.as_str()),
                    SqlParam::from(comment.email.as_str()),
                    SqlParam::from(comment.name.as_str()),
                    SqlParam::from(comment.body.as_str()),
                    SqlParam::from(comment.product_id.as_str()),
                ],
            )
            .await?;

        info!("Created comment: {} for product {}", comment.id, comment.product_id);
        Ok(comment)
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound(format!("Comment with id {} is not found", id))
}
