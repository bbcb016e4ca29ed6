//! 集成测试公共工具：内存执行器替身、顺序 id 生成器、请求辅助函数
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use product_catalog::infrastructure::executor::{ExecutorError, QueryExecutor, Row, SqlParam};
use product_catalog::infrastructure::id::IdGenerator;
use product_catalog::{create_app, AppState};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub params: Vec<SqlParam>,
    pub write: bool,
}

/// 按 SQL 文本返回预设的行，并记录每次调用
#[derive(Default)]
pub struct FakeExecutor {
    responses: Mutex<HashMap<String, Vec<Row>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, sql: &str, rows: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(sql.to_string(), to_rows(rows));
        self
    }

    pub fn failing_on(self, sql: &str) -> Self {
        self.failing.lock().unwrap().insert(sql.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.write).collect()
    }

    fn record(&self, sql: &str, params: &[SqlParam], write: bool) -> Result<(), ExecutorError> {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
            write,
        });
        if self.failing.lock().unwrap().contains(sql) {
            return Err(ExecutorError::Query(format!("injected failure for {sql}")));
        }
        Ok(())
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn fetch(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, ExecutorError> {
        self.record(sql, params, false)?;
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(sql)
            .cloned()
            .unwrap_or_default())
    }

    async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<u64, ExecutorError> {
        self.record(sql, params, true)?;
        Ok(1)
    }
}

pub fn to_rows(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => row,
                other => panic!("row must be an object, got {other}"),
            })
            .collect(),
        other => panic!("rows must be an array, got {other}"),
    }
}

/// 生成 id-1, id-2, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

pub fn app(executor: Arc<FakeExecutor>) -> Router {
    create_app(
        AppState::new(
            Some(executor as Arc<dyn QueryExecutor>),
            Arc::new(SequentialIds::default()),
        ),
        Duration::from_secs(5),
    )
}

pub fn disconnected_app() -> Router {
    create_app(
        AppState::new(None, Arc::new(SequentialIds::default())),
        Duration::from_secs(5),
    )
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
