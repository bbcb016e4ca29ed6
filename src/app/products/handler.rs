//! 商品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::model::{Product, ProductCreatePayload, SearchFilter};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::response::CreatedResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/:id", get(get_product).delete(delete_product))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.products()?.list().await?;
    Ok(Json(products))
}

pub async fn search_products(
    State(state): State<AppState>,
    filter: Result<Query<SearchFilter>, QueryRejection>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let Query(filter) = filter?;
    let products = state.products()?.search(&filter).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let product = state.products()?.get(&id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductCreatePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), CoreError> {
    let Json(payload) = payload?;
    let id = state.products()?.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new("Product", id))))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.products()?.delete(&id).await?;
    Ok(StatusCode::OK)
}
