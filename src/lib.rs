//! # 商品目录服务
//!
//! 提供商品、评论、图片的 REST 接口：
//! - 按可选条件构造参数化搜索语句
//! - 从 products / comments / images 三张表读取行并映射为领域对象
//! - 按 product_id 聚合评论和图片，选出缩略图

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{middleware, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub use app::AppState;

/// 组装路由和中间件
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(app::health::health_check))
        .nest("/api/products", app::products::routes())
        .nest("/api/comments", app::comments::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(middleware::from_fn(
                    crate::core::middleware::request_logging_middleware,
                )),
        )
        .with_state(state)
}
