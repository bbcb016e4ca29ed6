//! 评论处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::model::{Comment, CommentPayload};
use super::service::Upserted;
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::response::CreatedResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_comments).post(create_comment).patch(upsert_comment),
        )
        .route("/:id", get(get_comment).delete(delete_comment))
}

pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, CoreError> {
    let comments = state.comments()?.list().await?;
    Ok(Json(comments))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Comment>, CoreError> {
    let comment = state.comments()?.get(&id).await?;
    Ok(Json(comment))
}

pub async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), CoreError> {
    let Json(payload) = payload?;
    let id = state.comments()?.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new("Comment", id))))
}

pub async fn upsert_comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), CoreError> {
    let Json(payload) = payload?;
    match state.comments()?.upsert(payload).await? {
        Upserted::Updated(comment) => Ok((StatusCode::OK, Json(comment))),
        Upserted::Created(comment) => Ok((StatusCode::CREATED, Json(comment))),
    }
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Comment>, CoreError> {
    let comment = state.comments()?.delete(&id).await?;
    Ok(Json(comment))
}
