use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use product_catalog::infrastructure::config::Config;
use product_catalog::infrastructure::executor::QueryExecutor;
use product_catalog::infrastructure::id::UuidGenerator;
use product_catalog::infrastructure::logger::Logger;
use product_catalog::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    Logger::init(&config.logging.level);

    info!("Starting product catalog server...");

    let executor = connect(&config).await;
    let state = AppState::new(executor, Arc::new(UuidGenerator));
    let app = create_app(state, Duration::from_secs(config.http.timeout_seconds));

    let listener = TcpListener::bind(config.listen_address())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_address()))?;
    info!("Product catalog listening on http://{}", listener.local_addr()?);
    info!("   GET    /api/products            - List products");
    info!("   GET    /api/products/search     - Search products");
    info!("   GET    /api/products/:id        - Get product");
    info!("   POST   /api/products            - Create product");
    info!("   DELETE /api/products/:id        - Delete product with images and comments");
    info!("   GET    /api/comments[/:id]      - List / get comments");
    info!("   POST   /api/comments            - Create comment");
    info!("   PATCH  /api/comments            - Update or create comment");
    info!("   DELETE /api/comments/:id        - Delete comment");

    axum::serve(listener, app).await?;
    Ok(())
}

/// 连接失败时服务照常启动，请求会得到统一的 500 响应
#[cfg(feature = "database")]
async fn connect(config: &Config) -> Option<Arc<dyn QueryExecutor>> {
    use product_catalog::infrastructure::database::DatabaseManager;
    use tracing::error;

    let manager = match DatabaseManager::new(&config.database).await {
        Ok(manager) => manager,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return None;
        }
    };

    if let Err(e) = manager.ensure_schema().await {
        error!("Failed to prepare database schema: {}", e);
        return None;
    }

    info!("Connection to database established");
    Some(Arc::new(manager.into_executor()))
}

#[cfg(not(feature = "database"))]
async fn connect(_config: &Config) -> Option<Arc<dyn QueryExecutor>> {
    tracing::warn!("Built without the `database` feature, running without persistence");
    None
}
