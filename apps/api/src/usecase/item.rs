//! # アイテムユースケース
//!
//! 任意の JSON オブジェクトを ID 付きで管理する。レスポンス表現には必ず `id` を含める。

use std::sync::Arc;

use gourmet_domain::item::{ItemBody, ItemId};
use gourmet_infra::repository::ItemRepository;
use serde_json::Value;

use crate::error::ApiError;

const ITEM_NOT_FOUND: &str = "item not found";

pub struct ItemUseCaseImpl {
    item_repository: Arc<dyn ItemRepository>,
}

impl ItemUseCaseImpl {
    pub fn new(item_repository: Arc<dyn ItemRepository>) -> Self {
        Self { item_repository }
    }

    pub async fn list(&self) -> Vec<Value> {
        self.item_repository
            .find_all()
            .await
            .iter()
            .map(|item| item.to_json())
            .collect()
    }

    pub async fn create(&self, body: Value) -> Result<Value, ApiError> {
        let body = ItemBody::from_value(body)?;
        Ok(self.item_repository.insert(body).await.to_json())
    }

    pub async fn update(&self, id: u64, patch: Value) -> Result<Value, ApiError> {
        let patch = ItemBody::from_value(patch)?;
        self.item_repository
            .update(ItemId::from_u64(id), patch)
            .await
            .map(|item| item.to_json())
            .ok_or_else(|| ApiError::not_found(ITEM_NOT_FOUND))
    }

    pub async fn delete(&self, id: u64) -> Result<Value, ApiError> {
        self.item_repository
            .delete(ItemId::from_u64(id))
            .await
            .map(|item| item.to_json())
            .ok_or_else(|| ApiError::not_found(ITEM_NOT_FOUND))
    }
}
