//! # アイテム
//!
//! プロセスメモリ上でのみ管理される任意の JSON オブジェクト。
//!
//! ## 識別子
//!
//! アイテムは単調増加する [`ItemId`] で識別する。ID は 0 から始まり、
//! 削除されても再利用されず、他のアイテムの ID がずれることもない。
//!
//! サーバーが採番した `id` はレスポンス表現に必ず含まれ、
//! クライアントが本体に含めた `id` キーは無視する。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DomainError;

/// レスポンス表現で ID を格納するキー
pub const ITEM_ID_KEY: &str = "id";

/// アイテム ID
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct ItemId(u64);

impl ItemId {
    pub const FIRST: Self = Self(0);

    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// 次に採番する ID
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// アイテム本体（`id` キーを除いた JSON オブジェクト）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemBody(Map<String, Value>);

impl ItemBody {
    /// JSON 値から本体を作る
    ///
    /// オブジェクト以外はバリデーションエラー。`id` キーは取り除く。
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(mut fields) => {
                fields.remove(ITEM_ID_KEY);
                Ok(Self(fields))
            }
            _ => Err(DomainError::validation("request body must be a JSON object")),
        }
    }
}

/// ID 付きのアイテム
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id:   ItemId,
    body: ItemBody,
}

impl Item {
    pub fn new(id: ItemId, body: ItemBody) -> Self {
        Self { id, body }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// パッチのキーを浅くマージする
    ///
    /// パッチに含まれるキーは上書き、含まれないキーは維持する。
    pub fn merge(&mut self, patch: ItemBody) {
        self.body.0.extend(patch.0);
    }

    /// `id` を含めたレスポンス表現
    pub fn to_json(&self) -> Value {
        let mut fields = self.body.0.clone();
        fields.insert(ITEM_ID_KEY.to_string(), Value::from(self.id.as_u64()));
        Value::Object(fields)
    }
}
