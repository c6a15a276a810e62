//! # Basic 認証用の資格情報ストア
//!
//! 設定（`BASIC_AUTH_USERS`）で与えられたユーザー名とパスワードの組を、
//! 起動時にハッシュ化してメモリ上に保持する。平文は保持しない。

use std::collections::HashMap;

use gourmet_domain::{
    password::{PasswordHash, PlainPassword},
    user::Username,
};

use crate::{InfraError, password::PasswordChecker};

/// インメモリの資格情報ストア
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    hashes: HashMap<String, PasswordHash>,
}

impl InMemoryCredentialStore {
    /// ユーザー名とパスワードの組からストアを作成する
    ///
    /// 同じユーザー名が複数回現れた場合は後の値を採用する。
    #[tracing::instrument(skip_all, level = "debug", fields(count = pairs.len()))]
    pub fn from_pairs(
        pairs: &[(Username, PlainPassword)],
        checker: &dyn PasswordChecker,
    ) -> Result<Self, InfraError> {
        let hashes = pairs
            .iter()
            .map(|(username, password)| {
                checker
                    .hash(password)
                    .map(|hash| (username.as_str().to_string(), hash))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { hashes })
    }

    /// ユーザー名に対応するハッシュを取得する
    pub fn find_password_hash(&self, username: &str) -> Option<&PasswordHash> {
        self.hashes.get(username)
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }
}
