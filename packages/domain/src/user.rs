//! # ユーザー
//!
//! `/register` で作成され、`/login` で照合される登録ユーザー。
//! 作成後に更新・削除されることはない。

use serde::{Deserialize, Serialize};

use crate::password::PasswordHash;

/// ユーザー ID（`users.id` の自動採番値）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

define_validated_string! {
    /// ユーザー名（前後空白を除去して 1〜80 文字、一意）
    pub struct Username {
        label: "username",
        max_length: 80,
    }
}

/// 登録ユーザー
#[derive(Debug, Clone)]
pub struct User {
    id:            UserId,
    username:      Username,
    password_hash: PasswordHash,
}

impl User {
    /// 永続化済みの値から復元する
    pub fn from_db(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
