//! 查询执行器
//!
//! 业务层只依赖 [`QueryExecutor`]，真实实现基于 sqlx 的 PostgreSQL 连接池，
//! 测试中可以替换为内存替身。

use async_trait::async_trait;
use serde_json::{Map, Value};

/// 数据库返回的一行记录，键为列名（snake_case）
pub type Row = Map<String, Value>;

/// 位置参数，带类型以便 NULL 也能正确绑定
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(Option<String>),
    Number(Option<f64>),
    Bool(Option<bool>),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(Some(value.to_string()))
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(Some(value))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(value: Option<String>) -> Self {
        SqlParam::Text(value)
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Number(Some(value))
    }
}

impl From<Option<f64>> for SqlParam {
    fn from(value: Option<f64>) -> Self {
        SqlParam::Number(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(Some(value))
    }
}

/// 执行器错误，消息只用于日志
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("query failed: {0}")]
    Query(String),
    #[error("unexpected row shape: {0}")]
    RowShape(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for ExecutorError {
    fn from(err: sqlx::Error) -> Self {
        ExecutorError::Query(err.to_string())
    }
}

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// 执行查询语句，返回所有行
    async fn fetch(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, ExecutorError>;

    /// 执行写语句，返回受影响的行数
    async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<u64, ExecutorError>;
}

#[cfg(feature = "database")]
pub use postgres::PgExecutor;

#[cfg(feature = "database")]
mod postgres {
    use super::{ExecutorError, QueryExecutor, Row, SqlParam};
    use async_trait::async_trait;
    use serde_json::Value;
    use sqlx::postgres::PgPool;
    use tracing::debug;

    pub struct PgExecutor {
        pool: PgPool,
    }

    impl PgExecutor {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl QueryExecutor for PgExecutor {
        async fn fetch(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, ExecutorError> {
            // 每行转成 JSON 对象，列名即键
            let wrapped = format!("SELECT to_jsonb(r) AS row FROM ({sql}) AS r");
            debug!(sql = %sql, params = params.len(), "fetch");

            let mut query = sqlx::query_scalar::<sqlx::Postgres, Value>(&wrapped);
            for param in params {
                query = match param {
                    SqlParam::Text(v) => query.bind(v.clone()),
                    SqlParam::Number(v) => query.bind(*v),
                    SqlParam::Bool(v) => query.bind(*v),
                };
            }

            let values = query.fetch_all(&self.pool).await?;
            values
                .into_iter()
                .map(|value| match value {
                    Value::Object(row) => Ok(row),
                    other => Err(ExecutorError::RowShape(other.to_string())),
                })
                .collect()
        }

        async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<u64, ExecutorError> {
            debug!(sql = %sql, params = params.len(), "execute");

            let mut query = sqlx::query(sql);
            for param in params {
                query = match param {
                    SqlParam::Text(v) => query.bind(v.clone()),
                    SqlParam::Number(v) => query.bind(*v),
                    SqlParam::Bool(v) => query.bind(*v),
                };
            }

            let result = query.execute(&self.pool).await?;
            Ok(result.rows_affected())
        }
    }
}
