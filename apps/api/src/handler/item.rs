//! # アイテムハンドラ
//!
//! 任意の JSON オブジェクトを扱う。ID はパスで受け取り、本体の `id` は無視する。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::Value;

use crate::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    usecase::ItemUseCaseImpl,
};

/// アイテムハンドラの共有状態
pub struct ItemState {
    pub usecase: Arc<ItemUseCaseImpl>,
}

/// GET /items
pub async fn list_items(State(state): State<Arc<ItemState>>) -> Json<Vec<Value>> {
    Json(state.usecase.list().await)
}

/// POST /items
pub async fn create_item(
    State(state): State<Arc<ItemState>>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.usecase.create(body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{id}
///
/// 指定したフィールドのみ上書きする。
pub async fn update_item(
    State(state): State<Arc<ItemState>>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(patch): ApiJson<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.usecase.update(id, patch).await?))
}

/// DELETE /items/{id}
///
/// 削除したアイテムを返す。
pub async fn delete_item(
    State(state): State<Arc<ItemState>>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.usecase.delete(id).await?))
}
