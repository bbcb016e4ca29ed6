//! 应用层：商品、评论及其共享状态

pub mod aggregate;
pub mod comments;
pub mod health;
pub mod mapping;
pub mod products;

use std::sync::Arc;

use crate::core::error::CoreError;
use crate::infrastructure::executor::QueryExecutor;
use crate::infrastructure::id::IdGenerator;
use comments::service::CommentService;
use products::service::ProductService;

/// 所有处理器共享的状态；数据库连接可能不存在
#[derive(Clone)]
pub struct AppState {
    executor: Option<Arc<dyn QueryExecutor>>,
    ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new(executor: Option<Arc<dyn QueryExecutor>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { executor, ids }
    }

    pub fn executor(&self) -> Result<Arc<dyn QueryExecutor>, CoreError> {
        self.executor
            .clone()
            .ok_or_else(|| CoreError::Persistence("database connection is not established".into()))
    }

    pub fn products(&self) -> Result<ProductService, CoreError> {
        Ok(ProductService::new(self.executor()?, self.ids.clone()))
    }

    pub fn comments(&self) -> Result<CommentService, CoreError> {
        Ok(CommentService::new(self.executor()?, self.ids.clone()))
    }
}
