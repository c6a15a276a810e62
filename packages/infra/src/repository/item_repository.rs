//! # ItemRepository
//!
//! アイテムをプロセスメモリ上で管理する。再起動で消える。
//!
//! ID の採番カウンタとアイテムの Map を 1 つの `RwLock` で保護し、
//! 読み取り→変更→書き込みの一連の操作を書き込みロック内で完結させる。

use std::collections::BTreeMap;

use async_trait::async_trait;
use gourmet_domain::item::{Item, ItemBody, ItemId};
use tokio::sync::RwLock;

/// アイテムリポジトリトレイト
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// 全件を ID 順（= 作成順）で返す
    async fn find_all(&self) -> Vec<Item>;

    /// 次の ID を採番して作成する
    async fn insert(&self, body: ItemBody) -> Item;

    /// パッチを浅くマージする。存在しなければ `None`
    async fn update(&self, id: ItemId, patch: ItemBody) -> Option<Item>;

    /// 削除して削除前のアイテムを返す。存在しなければ `None`
    async fn delete(&self, id: ItemId) -> Option<Item>;
}

#[derive(Debug)]
struct ItemStore {
    next_id: ItemId,
    items:   BTreeMap<ItemId, Item>,
}

/// インメモリ実装の ItemRepository
#[derive(Debug)]
pub struct InMemoryItemRepository {
    store: RwLock<ItemStore>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(ItemStore {
                next_id: ItemId::FIRST,
                items:   BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> Vec<Item> {
        self.store.read().await.items.values().cloned().collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, body: ItemBody) -> Item {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id = id.next();

        let item = Item::new(id, body);
        store.items.insert(id, item.clone());
        tracing::debug!(%id, "アイテムを作成しました");
        item
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: ItemId, patch: ItemBody) -> Option<Item> {
        let mut store = self.store.write().await;
        let item = store.items.get_mut(&id)?;
        item.merge(patch);
        Some(item.clone())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: ItemId) -> Option<Item> {
        self.store.write().await.items.remove(&id)
    }
}
